pub mod config;
pub mod datasource;
pub mod domain;
pub mod engine;
pub mod error;
pub mod orchestration;

pub use config::Config;
pub use datasource::{ChainSource, ChainSourceError, JsonRpcChainSource, MockChainSource};
pub use domain::{Address, BlockTag, Decimal, PairSnapshot, QuoteAsset, TokenReserve};
pub use engine::{MintHeuristic, PricingError, PricingResult};
pub use error::AppError;
pub use orchestration::{AnalysisError, ReportError, TokenAnalyzer, TokenReport};
