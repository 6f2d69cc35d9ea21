use crate::domain::{Address, QuoteAsset};
use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_RPC_URL: &str = "https://base.drpc.org";
/// Uniswap V2 factory on Base.
const DEFAULT_FACTORY_ADDRESS: &str = "0x8909Dc15e40173Ff4699343b6eB8132c65e18eC6";
const DEFAULT_USDC_ADDRESS: &str = "0xd9AA594F65d163C22072c0eDFC7923A7F3470cC1";
const DEFAULT_WETH_ADDRESS: &str = "0x4200000000000000000000000000000000000006";
const DEFAULT_OUTPUT_DIR: &str = "/data/outputs";

const USDC_DECIMALS: u8 = 6;
const WETH_DECIMALS: u8 = 18;

#[derive(Debug, Clone)]
pub struct Config {
    pub rpc_url: String,
    pub factory_address: Address,
    pub token_address: Address,
    pub usdc_address: Address,
    pub weth_address: Address,
    pub output_dir: PathBuf,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let rpc_url = env_map
            .get("RPC_URL")
            .cloned()
            .unwrap_or_else(|| DEFAULT_RPC_URL.to_string());
        if !(rpc_url.starts_with("http://") || rpc_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue(
                "RPC_URL".to_string(),
                format!("must be an http(s) URL, got {}", rpc_url),
            ));
        }

        let factory_address =
            parse_address(&env_map, "FACTORY_ADDRESS", Some(DEFAULT_FACTORY_ADDRESS))?;
        let token_address = parse_address(&env_map, "TOKEN_ADDRESS", None)?;
        let usdc_address = parse_address(&env_map, "USDC_ADDRESS", Some(DEFAULT_USDC_ADDRESS))?;
        let weth_address = parse_address(&env_map, "WETH_ADDRESS", Some(DEFAULT_WETH_ADDRESS))?;

        let output_dir = PathBuf::from(
            env_map
                .get("OUTPUT_DIR")
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_OUTPUT_DIR),
        );

        Ok(Config {
            rpc_url,
            factory_address,
            token_address,
            usdc_address,
            weth_address,
            output_dir,
        })
    }

    /// Quote assets in pair discovery order: USDC first, then WETH.
    ///
    /// Decimals are only fixed for the canonical Base deployments. An overridden
    /// address gets `None` and its decimals are read from chain.
    pub fn quote_assets(&self) -> Vec<QuoteAsset> {
        vec![
            QuoteAsset::new(
                "USDC",
                self.usdc_address,
                known_decimals(self.usdc_address, DEFAULT_USDC_ADDRESS, USDC_DECIMALS),
            ),
            QuoteAsset::new(
                "WETH",
                self.weth_address,
                known_decimals(self.weth_address, DEFAULT_WETH_ADDRESS, WETH_DECIMALS),
            ),
        ]
    }
}

fn known_decimals(address: Address, known: &str, decimals: u8) -> Option<u8> {
    match Address::from_str(known) {
        Ok(known) if known == address => Some(decimals),
        _ => None,
    }
}

fn parse_address(
    env_map: &HashMap<String, String>,
    key: &str,
    default: Option<&str>,
) -> Result<Address, ConfigError> {
    let raw = match (env_map.get(key), default) {
        (Some(value), _) => value.trim(),
        (None, Some(default)) => default,
        (None, None) => return Err(ConfigError::MissingEnv(key.to_string())),
    };

    let address = Address::from_str(raw).map_err(|e| {
        ConfigError::InvalidValue(key.to_string(), format!("not a valid address: {}", e))
    })?;
    if address == Address::ZERO {
        return Err(ConfigError::InvalidValue(
            key.to_string(),
            "must not be the zero address".to_string(),
        ));
    }
    Ok(address)
}
