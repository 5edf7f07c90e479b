use crate::models::domain::CandidateResult;
use serde::{Deserialize, Serialize};

/// Response for the rank candidates endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankCandidatesResponse {
    pub candidates: Vec<CandidateResult>,
    pub total_candidates: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Record proposal response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordProposalResponse {
    pub success: bool,
    pub proposal_id: String,
}
