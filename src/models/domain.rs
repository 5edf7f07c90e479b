use serde::{Deserialize, Serialize};

/// Urgency of a relief-staffing mission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UrgencyLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl UrgencyLevel {
    /// Candidate pool over-fetch factor: more urgent missions pull a
    /// wider pool from the marketplace so the scorer has more to rank.
    pub fn pool_multiplier(&self) -> usize {
        match self {
            UrgencyLevel::Low => 3,
            UrgencyLevel::Medium => 5,
            UrgencyLevel::High => 5,
            UrgencyLevel::Critical => 8,
        }
    }
}

impl Default for UrgencyLevel {
    fn default() -> Self {
        UrgencyLevel::Medium
    }
}

/// A relief-staffing mission posted by a client establishment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionRequest {
    #[serde(rename = "missionId")]
    pub mission_id: String,
    pub title: String,
    #[serde(rename = "requiredSkills", default)]
    pub required_skills: Vec<String>,
    #[serde(rename = "requiredDiplomas", default)]
    pub required_diplomas: Vec<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "radiusKm")]
    pub radius_km: f64,
    #[serde(rename = "startsAt")]
    pub starts_at: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "endsAt")]
    pub ends_at: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub urgency: UrgencyLevel,
    #[serde(rename = "hourlyRate", default)]
    pub hourly_rate: f64,
}

/// A care professional's profile as served by the marketplace core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(rename = "talentId")]
    pub talent_id: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub diplomas: Vec<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Historical average rating, 0-5
    #[serde(default)]
    pub rating: f64,
    #[serde(rename = "completedMissions", default)]
    pub completed_missions: u32,
    #[serde(rename = "isAvailable", default = "default_true")]
    pub is_available: bool,
    #[serde(rename = "hourlyRate", default)]
    pub hourly_rate: f64,
}

fn default_true() -> bool {
    true
}

/// A proposal outcome for a (mission, talent) pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalEvent {
    pub mission_id: String,
    pub talent_id: String,
    pub status: ProposalStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    Proposed,
    Accepted,
    Declined,
    Booked,
}

/// Ranked candidate produced by the scorer - derived per request, never
/// persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateResult {
    #[serde(rename = "talentId")]
    pub talent_id: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
    #[serde(rename = "matchScore")]
    pub match_score: f64,
    #[serde(rename = "sharedSkills")]
    pub shared_skills: Vec<String>,
    pub rating: f64,
    #[serde(rename = "completedMissions")]
    pub completed_missions: u32,
    #[serde(rename = "hourlyRate")]
    pub hourly_rate: f64,
    #[serde(rename = "isAvailable")]
    pub is_available: bool,
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Scoring weights for the four ranking factors
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub skills: f64,
    pub distance: f64,
    pub rating: f64,
    pub experience: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skills: 0.40,
            distance: 0.30,
            rating: 0.20,
            experience: 0.10,
        }
    }
}
