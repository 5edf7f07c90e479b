//! Extras Match - mission-matching service for the Les Extras care
//! marketplace
//!
//! This library provides the ranking algorithm used to match relief-staffing
//! missions with available care professionals ("talents"). It implements a
//! filter-then-score pipeline over a candidate pool supplied by the
//! marketplace core API.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    distance::{calculate_bounding_box, haversine_distance},
    MatchError, MatchScorer,
};
pub use models::{
    CandidateProfile, CandidateResult, MissionRequest, RankCandidatesRequest,
    RankCandidatesResponse, ScoringWeights, UrgencyLevel,
};
