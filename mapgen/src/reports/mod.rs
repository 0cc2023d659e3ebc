//! Report data structures for commands.
//!
//! This module separates data collection from rendering. Operations build
//! reports, commands render them to an Output target.

mod check;
mod explain;
mod generate;
mod list;
mod output;

pub use check::{CheckReport, PlannedFile};
pub use explain::{ExplainReport, LintInfo, PhaseInfo, SelectionInfo};
pub use generate::{GenerateReport, GenerationResult, PreviewFile, PreviewResult, WrittenResult};
pub use list::{ClassEntry, ListReport};
pub use output::{Report, TerminalOutput};
