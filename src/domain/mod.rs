//! Domain types for on-chain pair analysis.
//!
//! This module provides:
//! - Lossless numeric handling via the Decimal wrapper
//! - Raw reserve and snapshot types fed to the pricing engine
//! - Primitives: BlockTag, TokenMetadata, QuoteAsset

pub mod decimal;
pub mod primitives;
pub mod reserve;

pub use alloy_primitives::Address;
pub use decimal::Decimal;
pub use primitives::{BlockTag, QuoteAsset, TokenMetadata};
pub use reserve::{PairSnapshot, Reserves, TokenReserve};
