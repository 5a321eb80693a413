//! # Deployment Documents
//!
//! Decoding of SeldonDeployment manifests (JSON form). Only the fields the
//! flowchart needs are read; everything else in the manifest is ignored.

use crate::error::{FlowchartError, Result};
use crate::tree::NodeSpec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeldonDeployment {
    pub spec: DeploymentSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentSpec {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub predictors: Vec<Predictor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predictor {
    #[serde(default)]
    pub name: String,
    pub graph: NodeSpec,
}

impl SeldonDeployment {
    pub fn from_json(json: &str) -> Result<Self> {
        let deployment: SeldonDeployment = serde_json::from_str(json)?;
        tracing::debug!(
            "[DEPLOYMENT] Decoded '{}' with {} predictors",
            deployment.spec.name,
            deployment.spec.predictors.len()
        );
        Ok(deployment)
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    /// Graph of the predictor at `index`
    pub fn predictor_graph(&self, index: usize) -> Result<&NodeSpec> {
        let predictors = &self.spec.predictors;
        if predictors.is_empty() {
            return Err(FlowchartError::NoPredictors(self.spec.name.clone()));
        }

        predictors
            .get(index)
            .map(|predictor| &predictor.graph)
            .ok_or_else(|| FlowchartError::PredictorNotFound {
                deployment: self.spec.name.clone(),
                index,
                available: predictors.len(),
            })
    }
}
