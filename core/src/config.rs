//! Solver configuration
//!
//! Typed configuration for the Edmonds-Karp solver, loadable from JSON and
//! also reachable through the string parameter interface of
//! [`Algorithm`](crate::algorithm::traits::Algorithm).

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::FlowError;

/// Policy for runs whose source and sink are the same node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoincidentEndpoints {
    /// Fail with `CoincidentEndpoints`
    Reject,
    /// Return zero flow, a single zero snapshot and an empty cut
    #[default]
    Trivial,
}

impl fmt::Display for CoincidentEndpoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoincidentEndpoints::Reject => f.write_str("reject"),
            CoincidentEndpoints::Trivial => f.write_str("trivial"),
        }
    }
}

impl FromStr for CoincidentEndpoints {
    type Err = FlowError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "reject" => Ok(CoincidentEndpoints::Reject),
            "trivial" => Ok(CoincidentEndpoints::Trivial),
            other => Err(FlowError::InvalidParameter {
                name: SolverConfig::COINCIDENT_ENDPOINTS.to_string(),
                reason: format!("expected \"reject\" or \"trivial\", got \"{}\"", other),
            }),
        }
    }
}

/// Edmonds-Karp solver configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Behavior when source and sink coincide
    pub coincident_endpoints: CoincidentEndpoints,

    /// Keep the arcs of every augmenting path in the result
    pub record_paths: bool,

    /// Check every flow invariant before returning a result
    pub verify_invariants: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            coincident_endpoints: CoincidentEndpoints::default(),
            record_paths: true,
            verify_invariants: false,
        }
    }
}

impl SolverConfig {
    pub const COINCIDENT_ENDPOINTS: &'static str = "coincident_endpoints";
    pub const RECORD_PATHS: &'static str = "record_paths";
    pub const VERIFY_INVARIANTS: &'static str = "verify_invariants";

    /// Parses a JSON configuration; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, FlowError> {
        serde_json::from_str(json).map_err(|e| FlowError::InvalidParameter {
            name: "config".to_string(),
            reason: e.to_string(),
        })
    }

    /// Sets a field from its string form
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), FlowError> {
        match name {
            Self::COINCIDENT_ENDPOINTS => {
                self.coincident_endpoints = value.parse()?;
            }
            Self::RECORD_PATHS => {
                self.record_paths = parse_bool(name, value)?;
            }
            Self::VERIFY_INVARIANTS => {
                self.verify_invariants = parse_bool(name, value)?;
            }
            _ => {
                return Err(FlowError::InvalidParameter {
                    name: name.to_string(),
                    reason: "unknown parameter".to_string(),
                })
            }
        }
        Ok(())
    }

    /// Gets a field in its string form
    pub fn get(&self, name: &str) -> Option<String> {
        match name {
            Self::COINCIDENT_ENDPOINTS => Some(self.coincident_endpoints.to_string()),
            Self::RECORD_PATHS => Some(self.record_paths.to_string()),
            Self::VERIFY_INVARIANTS => Some(self.verify_invariants.to_string()),
            _ => None,
        }
    }

    /// Every field in string form
    pub fn to_parameters(&self) -> HashMap<String, String> {
        [
            Self::COINCIDENT_ENDPOINTS,
            Self::RECORD_PATHS,
            Self::VERIFY_INVARIANTS,
        ]
        .into_iter()
        .filter_map(|name| self.get(name).map(|value| (name.to_string(), value)))
        .collect()
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool, FlowError> {
    value.parse::<bool>().map_err(|_| FlowError::InvalidParameter {
        name: name.to_string(),
        reason: format!("expected \"true\" or \"false\", got \"{}\"", value),
    })
}
