use crate::error::EstimateError;
use crate::estimators::Strategy;
use crate::report::ReportFormat;
use crate::streams::tsv::DEFAULT_MAX_NODE_ID;
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_PROGRESS_FREQUENCY: u64 = 10_000;

fn default_progress_frequency() -> u64 {
    DEFAULT_PROGRESS_FREQUENCY
}

fn default_max_node_id() -> u64 {
    DEFAULT_MAX_NODE_ID
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EstimationParams {
    #[schemars(
        title = "Column",
        description = "Zero-based index of the first node-id field on each line",
        range(min = 0)
    )]
    pub column: usize,

    #[serde(default)]
    #[schemars(
        title = "Strategy",
        description = "Exposure normalization: naive rescans every class each step, \
                       fast records activity switches"
    )]
    pub strategy: Strategy,

    #[serde(default = "default_progress_frequency")]
    #[schemars(
        title = "Progress Frequency",
        description = "Report progress every N steps",
        range(min = 1),
        default = "default_progress_frequency"
    )]
    pub progress_frequency: u64,

    #[serde(default)]
    #[schemars(
        title = "Max Steps",
        description = "Stop after this many steps (None = whole stream)"
    )]
    pub max_steps: Option<u64>,

    #[serde(default = "default_max_node_id")]
    #[schemars(
        title = "Max Node Id",
        description = "Largest node id accepted from the input",
        default = "default_max_node_id"
    )]
    pub max_node_id: u64,

    #[serde(default)]
    #[schemars(title = "Format", description = "Output format of the kernel table")]
    pub format: ReportFormat,
}

impl EstimationParams {
    pub fn new(column: usize) -> Self {
        Self {
            column,
            strategy: Strategy::default(),
            progress_frequency: DEFAULT_PROGRESS_FREQUENCY,
            max_steps: None,
            max_node_id: DEFAULT_MAX_NODE_ID,
            format: ReportFormat::default(),
        }
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, EstimateError> {
        let text = fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&text)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), EstimateError> {
        if self.progress_frequency == 0 {
            return Err(EstimateError::InvalidParameter(
                "progress_frequency must be > 0".into(),
            ));
        }
        Ok(())
    }

    pub fn schema() -> Schema {
        schema_for!(EstimationParams)
    }
}
