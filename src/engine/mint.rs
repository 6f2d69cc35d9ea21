//! Best-effort mint capability heuristic.
//!
//! A token is probed by simulating a zero-argument `mint()` call. Success
//! suggests anyone can grow the supply; any failure is read as "fixed supply".
//! This is a heuristic, not a proof: a revert may come from access control on a
//! mint function that exists, and a token may mint through a function with a
//! different name or signature.

use crate::datasource::ChainSourceError;
use serde::{Deserialize, Serialize};

/// Outcome of the mint probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MintHeuristic {
    /// The `mint()` simulation succeeded; total supply is likely not fixed.
    LikelyMintable,
    /// The simulation failed; total supply is likely fixed.
    LikelyFixed { reason: String },
}

impl MintHeuristic {
    pub fn is_likely_mintable(&self) -> bool {
        matches!(self, MintHeuristic::LikelyMintable)
    }
}

/// Classify the result of a `mint()` simulation.
pub fn classify_mint_probe(probe: &Result<(), ChainSourceError>) -> MintHeuristic {
    match probe {
        Ok(()) => MintHeuristic::LikelyMintable,
        Err(e) => MintHeuristic::LikelyFixed {
            reason: e.to_string(),
        },
    }
}

impl std::fmt::Display for MintHeuristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MintHeuristic::LikelyMintable => write!(f, "likely mintable (supply not fixed)"),
            MintHeuristic::LikelyFixed { .. } => write!(f, "likely not mintable (supply fixed)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successful_probe_is_mintable() {
        let heuristic = classify_mint_probe(&Ok(()));
        assert_eq!(heuristic, MintHeuristic::LikelyMintable);
        assert!(heuristic.is_likely_mintable());
    }

    #[test]
    fn test_revert_is_fixed() {
        let probe = Err(ChainSourceError::Reverted("execution reverted".to_string()));
        match classify_mint_probe(&probe) {
            MintHeuristic::LikelyFixed { reason } => {
                assert_eq!(reason, "Execution reverted: execution reverted")
            }
            other => panic!("Expected LikelyFixed, got {:?}", other),
        }
    }

    #[test]
    fn test_any_failure_is_fixed() {
        let probe = Err(ChainSourceError::NetworkError("timeout".to_string()));
        assert!(!classify_mint_probe(&probe).is_likely_mintable());
    }

    #[test]
    fn test_serialization_tags_status() {
        let json = serde_json::to_value(MintHeuristic::LikelyFixed {
            reason: "nope".to_string(),
        })
        .unwrap();
        assert_eq!(json["status"], "likely_fixed");
        assert_eq!(json["reason"], "nope");

        let json = serde_json::to_value(MintHeuristic::LikelyMintable).unwrap();
        assert_eq!(json["status"], "likely_mintable");
    }
}
