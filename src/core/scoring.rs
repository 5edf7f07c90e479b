use crate::core::filters::shared_skills;
use crate::models::{CandidateProfile, MissionRequest, ScoringWeights};

/// Completed-mission count at which the experience factor saturates
const EXPERIENCE_CAP: f64 = 50.0;

/// Calculate a match score (0-100) for a candidate against a mission
///
/// Scoring formula:
/// score = (
///     skill_factor * 0.40 +        # Required-skill overlap ratio
///     proximity_factor * 0.30 +    # Closer = higher score
///     rating_factor * 0.20 +       # Average rating, normalized
///     experience_factor * 0.10     # Log-scaled mission count
/// ) * 100
pub fn calculate_match_score(
    profile: &CandidateProfile,
    mission: &MissionRequest,
    distance_km: f64,
    weights: &ScoringWeights,
) -> (f64, Vec<String>) {
    let shared = shared_skills(profile, mission);

    let skill_factor = skill_overlap_factor(shared.len(), mission.required_skills.len());
    let proximity = proximity_factor(distance_km, mission.radius_km);
    let rating = rating_factor(profile.rating);
    let experience = experience_factor(profile.completed_missions);

    let total_score = (skill_factor * weights.skills
        + proximity * weights.distance
        + rating * weights.rating
        + experience * weights.experience)
        * 100.0;

    (total_score.clamp(0.0, 100.0), shared)
}

/// Skill-overlap factor (0-1)
///
/// A mission with no required skills is neutral: every candidate gets
/// the full factor rather than a division by zero.
#[inline]
pub fn skill_overlap_factor(shared_count: usize, required_count: usize) -> f64 {
    if required_count == 0 {
        return 1.0;
    }
    shared_count as f64 / required_count as f64
}

/// Proximity factor (0-1)
///
/// Inverse-linear decay: 1.0 at the mission location, 0.0 at the edge
/// of the search radius.
#[inline]
pub fn proximity_factor(distance_km: f64, radius_km: f64) -> f64 {
    if radius_km <= 0.0 || distance_km >= radius_km {
        return 0.0;
    }
    1.0 - distance_km / radius_km
}

/// Rating factor (0-1), normalized from the 0-5 marketplace scale
#[inline]
pub fn rating_factor(rating: f64) -> f64 {
    (rating / 5.0).clamp(0.0, 1.0)
}

/// Experience factor (0-1)
///
/// Log-scaled so the first missions count the most, saturating at
/// EXPERIENCE_CAP completed missions.
#[inline]
pub fn experience_factor(completed_missions: u32) -> f64 {
    let scaled = (1.0 + completed_missions as f64).ln() / (1.0 + EXPERIENCE_CAP).ln();
    scaled.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UrgencyLevel;
    use chrono::Utc;

    fn create_test_profile(skills: Vec<&str>, rating: f64, missions: u32) -> CandidateProfile {
        CandidateProfile {
            talent_id: "talent_1".to_string(),
            display_name: "Test Talent".to_string(),
            skills: skills.into_iter().map(String::from).collect(),
            diplomas: vec![],
            latitude: 48.8566,
            longitude: 2.3522,
            rating,
            completed_missions: missions,
            is_available: true,
            hourly_rate: 25.0,
        }
    }

    fn create_test_mission(skills: Vec<&str>) -> MissionRequest {
        MissionRequest {
            mission_id: "mission_1".to_string(),
            title: "Night-shift nurse".to_string(),
            required_skills: skills.into_iter().map(String::from).collect(),
            required_diplomas: vec![],
            latitude: 48.8566,
            longitude: 2.3522,
            radius_km: 30.0,
            starts_at: Utc::now(),
            ends_at: Utc::now() + chrono::Duration::hours(8),
            urgency: UrgencyLevel::Medium,
            hourly_rate: 28.0,
        }
    }

    #[test]
    fn test_calculate_match_score() {
        let profile = create_test_profile(vec!["geriatrics", "palliative-care"], 4.5, 20);
        let mission = create_test_mission(vec!["geriatrics", "palliative-care"]);
        let weights = ScoringWeights::default();

        let (score, shared) = calculate_match_score(&profile, &mission, 2.0, &weights);

        assert!(score >= 0.0 && score <= 100.0);
        assert_eq!(shared, vec!["geriatrics", "palliative-care"]);
    }

    #[test]
    fn test_skill_overlap_factor() {
        assert_eq!(skill_overlap_factor(2, 4), 0.5);
        assert_eq!(skill_overlap_factor(0, 4), 0.0);
        assert_eq!(skill_overlap_factor(4, 4), 1.0);

        // No required skills is neutral, not a division by zero
        assert_eq!(skill_overlap_factor(0, 0), 1.0);
    }

    #[test]
    fn test_proximity_factor() {
        // At the mission location = full factor
        assert!((proximity_factor(0.0, 30.0) - 1.0).abs() < f64::EPSILON);

        // At the radius edge = zero
        assert_eq!(proximity_factor(30.0, 30.0), 0.0);

        // Halfway = half
        assert!((proximity_factor(15.0, 30.0) - 0.5).abs() < 1e-9);

        // Degenerate radius never divides by zero
        assert_eq!(proximity_factor(1.0, 0.0), 0.0);
    }

    #[test]
    fn test_rating_factor() {
        assert_eq!(rating_factor(5.0), 1.0);
        assert_eq!(rating_factor(0.0), 0.0);
        assert!((rating_factor(2.5) - 0.5).abs() < f64::EPSILON);

        // Out-of-scale ratings are clamped
        assert_eq!(rating_factor(7.0), 1.0);
        assert_eq!(rating_factor(-1.0), 0.0);
    }

    #[test]
    fn test_experience_factor_log_scaled() {
        assert_eq!(experience_factor(0), 0.0);

        let early = experience_factor(5) - experience_factor(0);
        let late = experience_factor(50) - experience_factor(45);
        assert!(early > late, "Early missions should count more than late ones");

        // Saturates at the cap
        assert!((experience_factor(50) - 1.0).abs() < 1e-9);
        assert_eq!(experience_factor(500), 1.0);
    }

    #[test]
    fn test_higher_rating_scores_higher() {
        let strong = create_test_profile(vec!["geriatrics"], 5.0, 10);
        let weak = create_test_profile(vec!["geriatrics"], 2.0, 10);
        let mission = create_test_mission(vec!["geriatrics"]);
        let weights = ScoringWeights::default();

        let (strong_score, _) = calculate_match_score(&strong, &mission, 5.0, &weights);
        let (weak_score, _) = calculate_match_score(&weak, &mission, 5.0, &weights);

        assert!(strong_score > weak_score);
    }
}
