//! Aggregation Pipeline
//!
//! Turns result trees into a finished report.
//!
//! ## Pipeline Overview
//!
//! ```text
//! results root (+ optional baseline root)
//!       │
//!       ▼
//! ┌─────────────┐
//! │    load     │  Walk, dispatch, extract into a MetricStore
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │  summarize  │  Per-key statistics and baseline tests (parallel)
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │   report    │  Attach provenance and methodology
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │ formatting  │  Human-readable summary table
//! └─────────────┘
//! ```

mod formatting;
mod load;
mod report;
mod summarize;

pub use formatting::format_human_output;
pub use load::{KeyFilter, load_store};
pub use report::{ReportInputs, build_report};
pub use summarize::{AggregationConfig, build_rows, derive_seed};
