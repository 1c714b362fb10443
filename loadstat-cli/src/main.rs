fn main() {
    if let Err(err) = loadstat_cli::run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
