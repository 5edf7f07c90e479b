use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to rank candidates for a mission
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankCandidatesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "mission_id", rename = "missionId")]
    pub mission_id: String,
    /// Falls back to the configured matching.default_limit when omitted
    #[serde(default)]
    pub limit: Option<u16>,
    #[serde(default)]
    #[serde(alias = "excludeTalentIds", rename = "excludeTalentIds")]
    pub exclude_talent_ids: Vec<String>,
}

/// Request to record a proposal outcome
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordProposalRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "mission_id", rename = "missionId")]
    pub mission_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "talent_id", rename = "talentId")]
    pub talent_id: String,
    #[serde(alias = "status", rename = "status")]
    pub status: String,
}
