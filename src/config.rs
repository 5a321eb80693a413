//! # Flowchart Configuration

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Options applied when compiling a flowchart
///
/// Every field has a default, so an empty JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowchartConfig {
    /// Display name of the synthetic entry node
    pub request_name: String,
    /// Display name of the synthetic exit node
    pub response_name: String,
    /// Which predictor of a deployment to draw
    pub predictor: usize,
    /// Keep `option[i]`/`element[i]` labels and bidirectional flags
    pub edge_labels: bool,
}

impl Default for FlowchartConfig {
    fn default() -> Self {
        Self {
            request_name: "Request".to_string(),
            response_name: "Response".to_string(),
            predictor: 0,
            edge_labels: true,
        }
    }
}

impl FlowchartConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
