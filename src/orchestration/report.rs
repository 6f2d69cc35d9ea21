//! The token report and its JSON output.

use crate::domain::{Address, QuoteAsset, TokenMetadata};
use crate::engine::{MintHeuristic, PricingResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const REPORT_FILE_NAME: &str = "report.json";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Liquidity pair the token was priced against.
///
/// Raw integers are kept as decimal strings; they routinely exceed `u64`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairInfo {
    pub address: Address,
    pub quote: QuoteAsset,
    /// Whether the analyzed token is the pair's `token0`.
    pub token_is_token0: bool,
    pub base_reserve_raw: String,
    pub quote_reserve_raw: String,
    pub lp_total_supply_raw: String,
    pub block_timestamp_last: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenReport {
    pub generated_at: DateTime<Utc>,
    /// Every chain read in the report was made at this height.
    pub block_number: u64,
    pub token: TokenMetadata,
    pub total_supply_raw: String,
    pub pair: PairInfo,
    /// `None` when the price is undefined (e.g. a drained pool).
    pub pricing: Option<PricingResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing_error: Option<String>,
    pub mint: MintHeuristic,
}

/// Write `report` as pretty JSON to `<output_dir>/report.json`, creating the directory.
pub async fn write_report(
    report: &TokenReport,
    output_dir: &Path,
) -> Result<PathBuf, ReportError> {
    tokio::fs::create_dir_all(output_dir).await?;
    let path = output_dir.join(REPORT_FILE_NAME);
    let body = serde_json::to_vec_pretty(report)?;
    tokio::fs::write(&path, body).await?;
    Ok(path)
}
