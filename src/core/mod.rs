// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod matcher;
pub mod scoring;

pub use distance::{calculate_bounding_box, haversine_distance, is_within_bounding_box};
pub use filters::{holds_required_diplomas, is_eligible, shared_skills};
pub use matcher::{MatchError, MatchScorer, RankOutcome};
pub use scoring::calculate_match_score;
