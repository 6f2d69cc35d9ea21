pub mod analyzer;
pub mod report;

pub use analyzer::{AnalysisError, TokenAnalyzer};
pub use report::{write_report, PairInfo, ReportError, TokenReport, REPORT_FILE_NAME};
