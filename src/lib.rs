pub mod analyzers;
pub mod cli;
pub mod corpus;
pub mod error;
pub mod manifest;
pub mod matcher;
pub mod report;
pub mod reporter;
pub mod rules;
pub mod scoring;

pub use cli::{Cli, OutputFormat};
pub use error::{AuditError, Result};
pub use report::{ReportBuilder, SecurityReport};
pub use reporter::{json::JsonReporter, terminal::TerminalReporter, Reporter};
pub use rules::{Issue, Severity, SeverityCounts};
pub use scoring::{composite_score, ScoreWeights};
