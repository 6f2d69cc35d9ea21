use crate::config::ConfigError;
use crate::orchestration::analyzer::AnalysisError;
use crate::orchestration::report::ReportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Analysis failed: {0}")]
    Analysis(#[from] AnalysisError),
    #[error("Report error: {0}")]
    Report(#[from] ReportError),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
