//! Domain primitives: BlockTag, TokenMetadata, QuoteAsset.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// Block at which a chain read executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockTag {
    /// Whatever the node considers the head.
    Latest,
    /// A fixed height; used to keep every read of one report consistent.
    Number(u64),
}

impl BlockTag {
    /// JSON-RPC block parameter (`"latest"` or a hex quantity).
    pub fn to_rpc_param(&self) -> String {
        match self {
            BlockTag::Latest => "latest".to_string(),
            BlockTag::Number(n) => format!("0x{:x}", n),
        }
    }
}

impl std::fmt::Display for BlockTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlockTag::Latest => write!(f, "latest"),
            BlockTag::Number(n) => write!(f, "{}", n),
        }
    }
}

/// ERC-20 metadata of the token being analyzed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub address: Address,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// An asset a token may be paired against (USDC, WETH).
///
/// `decimals` is set for well-known assets so the report run can skip the read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteAsset {
    pub symbol: String,
    pub address: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u8>,
}

impl QuoteAsset {
    pub fn new(symbol: &str, address: Address, decimals: Option<u8>) -> Self {
        Self {
            symbol: symbol.to_string(),
            address,
            decimals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_tag_rpc_param() {
        assert_eq!(BlockTag::Latest.to_rpc_param(), "latest");
        assert_eq!(BlockTag::Number(0).to_rpc_param(), "0x0");
        assert_eq!(BlockTag::Number(21_000_000).to_rpc_param(), "0x1406f40");
    }

    #[test]
    fn test_block_tag_display() {
        assert_eq!(BlockTag::Latest.to_string(), "latest");
        assert_eq!(BlockTag::Number(42).to_string(), "42");
    }

    #[test]
    fn test_quote_asset_serialization_skips_unknown_decimals() {
        let quote = QuoteAsset::new("FOO", Address::ZERO, None);
        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["symbol"], "FOO");
        assert!(json.get("decimals").is_none());
    }
}
