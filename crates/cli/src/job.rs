//! JSON job files: request and response types.

use std::fs;
use std::path::Path;

use cutlist_core::{
    BalanceReport, CutList, CuttingAssignment, Error, Optimizer, OptimizerConfig, Plan,
    PlanSummary,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Version of the job format, taken from Cargo.toml.
pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Errors that can occur when loading or saving job files.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("Failed to access file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A cutting job read from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRequest {
    /// Job format version.
    #[serde(default)]
    pub version: Option<String>,

    /// Parts to cut.
    pub parts: Vec<PartRequest>,

    /// Available stock.
    #[serde(default)]
    pub stock: Vec<StockRequest>,

    /// Kerf in millimeters.
    #[serde(default)]
    pub kerf: Option<f64>,

    /// Length of synthesized overflow stock.
    #[serde(default)]
    pub default_stock_length: Option<f64>,

    /// Upper bound on waste balancing rounds.
    #[serde(default)]
    pub max_balance_rounds: Option<usize>,
}

/// Part entry of a job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartRequest {
    /// Length in millimeters.
    pub length: f64,

    /// Number of identical parts.
    #[serde(default = "default_quantity")]
    pub quantity: usize,

    /// Label for the parts; generated when absent.
    #[serde(default)]
    pub name: Option<String>,
}

/// Stock entry of a job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockRequest {
    /// Length in millimeters.
    pub length: f64,

    /// Number of identical pieces.
    #[serde(default = "default_quantity")]
    pub quantity: usize,

    /// Whether the pieces are default-length stock.
    #[serde(default)]
    pub is_default: bool,
}

fn default_quantity() -> usize {
    1
}

/// Response for a cutting job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResponse {
    /// Job format version.
    pub version: String,

    /// Whether the job succeeded.
    pub success: bool,

    /// Error message if failed.
    pub error: Option<String>,

    /// One entry per stock piece used.
    #[serde(default)]
    pub assignments: Vec<CuttingAssignment>,

    /// Plan statistics; absent when there was nothing to plan.
    #[serde(default)]
    pub summary: Option<PlanSummary>,

    /// What the balancing pass did.
    #[serde(default)]
    pub balance: Option<BalanceReport>,
}

impl PlanResponse {
    /// Successful response for a plan.
    pub fn from_plan(plan: Plan, balance: Option<BalanceReport>) -> Self {
        Self {
            version: API_VERSION.to_string(),
            success: true,
            error: None,
            summary: Some(plan.summary()),
            assignments: plan.assignments,
            balance,
        }
    }

    /// Successful response with nothing to plan.
    pub fn empty() -> Self {
        Self {
            version: API_VERSION.to_string(),
            success: true,
            error: None,
            assignments: Vec::new(),
            summary: None,
            balance: None,
        }
    }

    /// Failure response.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            ..Self::empty()
        }
    }
}

impl JobRequest {
    /// Builds the cut list this job describes.
    pub fn to_cut_list(&self) -> cutlist_core::Result<CutList> {
        let mut config = OptimizerConfig::new();
        if let Some(kerf) = self.kerf {
            config = config.with_kerf(kerf);
        }
        if let Some(length) = self.default_stock_length {
            config = config.with_default_stock_length(length);
        }
        if let Some(rounds) = self.max_balance_rounds {
            config = config.with_max_balance_rounds(rounds);
        }
        config.validate()?;

        let mut job = CutList::new(config);
        for entry in &self.parts {
            ensure_quantity(entry.quantity)?;
            for _ in 0..entry.quantity {
                let id = job.parts.add_length(entry.length)?.id.clone();
                if let Some(name) = &entry.name {
                    job.parts.rename(&id, name)?;
                }
            }
        }
        for entry in &self.stock {
            ensure_quantity(entry.quantity)?;
            for _ in 0..entry.quantity {
                if entry.is_default {
                    job.stock.add_default(entry.length)?;
                } else {
                    job.stock.add_length(entry.length)?;
                }
            }
        }
        Ok(job)
    }
}

fn ensure_quantity(quantity: usize) -> cutlist_core::Result<()> {
    if quantity == 0 {
        Err(Error::invalid("quantity must be at least 1"))
    } else {
        Ok(())
    }
}

/// Runs the job and wraps the outcome in a response.
pub fn run_job(request: &JobRequest) -> PlanResponse {
    let job = match request.to_cut_list() {
        Ok(job) => job,
        Err(e) => return PlanResponse::failure(e.to_string()),
    };

    if job.parts.is_empty() || job.stock.is_empty() {
        log::info!("job has no parts or no stock; nothing to plan");
        return PlanResponse::empty();
    }

    match Optimizer::new(job.config.clone())
        .solve_with_report(job.parts.as_slice(), job.stock.as_slice())
    {
        Ok((plan, report)) => PlanResponse::from_plan(plan, Some(report)),
        Err(e) => PlanResponse::failure(e.to_string()),
    }
}

/// Parses a JSON job and runs it. Parse errors become failure responses.
pub fn run_job_json(json: &str) -> PlanResponse {
    match serde_json::from_str::<JobRequest>(json) {
        Ok(request) => run_job(&request),
        Err(e) => PlanResponse::failure(format!("Invalid job JSON: {e}")),
    }
}

/// Writes a response as pretty JSON.
pub fn save_response(response: &PlanResponse, path: impl AsRef<Path>) -> Result<(), JobError> {
    let json = serde_json::to_string_pretty(response)?;
    fs::write(path, json)?;
    Ok(())
}
