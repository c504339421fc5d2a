//! Batch splicing of observation files through an external tool (teqc).
//!
//! Each entry of the input list produces one tool invocation and one line in
//! the output list, in input order.

pub mod job;
pub mod runner;
pub mod tool;
pub mod window;

pub use job::{SpliceJob, read_jobs};
pub use runner::{JobReport, SpliceReport, run_splice, run_splice_with};
pub use tool::{DryRunner, Invocation, ProcessRunner, ToolOutcome, ToolRunner};
pub use window::TimeWindow;

use serde::{Deserialize, Serialize};

/// What to do when the tool exits non-zero or cannot be launched.
///
/// `Ignore` and `Warn` both still record the output path; only `Abort` stops
/// the batch.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    Ignore,
    #[default]
    Warn,
    Abort,
}
