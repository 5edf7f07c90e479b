use crate::core::distance::is_valid_coordinate;
use crate::models::{CandidateProfile, MissionRequest};

/// Check if a candidate is eligible for a mission before any scoring
///
/// A candidate is excluded when flagged unavailable, when their profile
/// carries malformed coordinates, or when the mission names diploma tags
/// the candidate does not hold. Candidates with low-quality data degrade
/// to exclusion, never to an error.
#[inline]
pub fn is_eligible(profile: &CandidateProfile, mission: &MissionRequest) -> bool {
    if !profile.is_available {
        return false;
    }

    if !is_valid_coordinate(profile.latitude, profile.longitude) {
        return false;
    }

    if !holds_required_diplomas(profile, mission) {
        return false;
    }

    true
}

/// Check that the candidate holds every diploma the mission requires
///
/// An empty requirement list matches everyone.
#[inline]
pub fn holds_required_diplomas(profile: &CandidateProfile, mission: &MissionRequest) -> bool {
    mission
        .required_diplomas
        .iter()
        .all(|diploma| profile.diplomas.contains(diploma))
}

/// Collect the skills a candidate shares with the mission's requirements
///
/// Preserves the mission's requirement order.
#[inline]
pub fn shared_skills(profile: &CandidateProfile, mission: &MissionRequest) -> Vec<String> {
    mission
        .required_skills
        .iter()
        .filter(|skill| profile.skills.contains(skill))
        .cloned()
        .collect()
}
