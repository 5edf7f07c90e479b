use crate::core::{
    distance::{haversine_distance, is_valid_coordinate},
    filters::is_eligible,
    scoring::calculate_match_score,
};
use crate::models::{CandidateProfile, CandidateResult, MissionRequest, ScoringWeights};
use thiserror::Error;

/// Errors for malformed mission input
///
/// Low-quality candidate data never errors; ineligible candidates are
/// dropped from the result instead.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Mission {mission_id} has invalid coordinates: ({latitude}, {longitude})")]
    InvalidCoordinates {
        mission_id: String,
        latitude: f64,
        longitude: f64,
    },

    #[error("Mission {mission_id} has invalid search radius: {radius_km} km")]
    InvalidRadius { mission_id: String, radius_km: f64 },
}

/// Result of a ranking pass
#[derive(Debug)]
pub struct RankOutcome {
    pub candidates: Vec<CandidateResult>,
    pub total_candidates: usize,
}

/// Mission-matching scorer - a pure, read-only transform over a candidate
/// pool
///
/// # Pipeline Stages
/// 1. Eligibility filter (availability, diplomas, coordinate sanity)
/// 2. Radius filter (haversine distance)
/// 3. Scoring (skills, proximity, rating, experience)
/// 4. Ranking (score desc, distance asc, rating desc) and limit
#[derive(Debug, Clone)]
pub struct MatchScorer {
    weights: ScoringWeights,
}

impl MatchScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    /// Rank a candidate pool for a mission
    ///
    /// Never mutates its inputs; recomputed on every call, so identical
    /// inputs always produce identical output.
    ///
    /// # Arguments
    /// * `mission` - The mission's requirements
    /// * `candidates` - The candidate pool loaded by the persistence layer
    /// * `limit` - Maximum number of results to return
    ///
    /// # Errors
    /// Returns `MatchError` only when the mission itself is malformed:
    /// non-finite or out-of-range coordinates, or a non-positive radius.
    /// An empty pool or `limit = 0` yields an empty result, not an error.
    pub fn rank(
        &self,
        mission: &MissionRequest,
        candidates: Vec<CandidateProfile>,
        limit: usize,
    ) -> Result<RankOutcome, MatchError> {
        if !is_valid_coordinate(mission.latitude, mission.longitude) {
            return Err(MatchError::InvalidCoordinates {
                mission_id: mission.mission_id.clone(),
                latitude: mission.latitude,
                longitude: mission.longitude,
            });
        }

        if !mission.radius_km.is_finite() || mission.radius_km <= 0.0 {
            return Err(MatchError::InvalidRadius {
                mission_id: mission.mission_id.clone(),
                radius_km: mission.radius_km,
            });
        }

        let total_candidates = candidates.len();

        let mut results: Vec<CandidateResult> = candidates
            .into_iter()
            // Stage 1: eligibility pre-filter
            .filter(|profile| is_eligible(profile, mission))
            // Stage 2 & 3: radius filter and scoring
            .filter_map(|profile| {
                let distance_km = haversine_distance(
                    mission.latitude,
                    mission.longitude,
                    profile.latitude,
                    profile.longitude,
                );

                if distance_km > mission.radius_km {
                    return None;
                }

                let (score, shared) =
                    calculate_match_score(&profile, mission, distance_km, &self.weights);

                Some(CandidateResult {
                    talent_id: profile.talent_id,
                    display_name: profile.display_name,
                    distance_km,
                    match_score: score,
                    shared_skills: shared,
                    rating: profile.rating,
                    completed_missions: profile.completed_missions,
                    hourly_rate: profile.hourly_rate,
                    is_available: profile.is_available,
                })
            })
            .collect();

        // Stage 4: rank by score (descending), break ties by distance
        // (ascending), then rating (descending)
        results.sort_by(|a, b| {
            b.match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| {
                    a.distance_km
                        .partial_cmp(&b.distance_km)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .then_with(|| {
                    b.rating
                        .partial_cmp(&a.rating)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
        });

        results.truncate(limit);

        Ok(RankOutcome {
            candidates: results,
            total_candidates,
        })
    }
}

impl Default for MatchScorer {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UrgencyLevel;
    use chrono::Utc;

    fn create_candidate(id: &str, lat: f64, lon: f64, rating: f64, available: bool) -> CandidateProfile {
        CandidateProfile {
            talent_id: id.to_string(),
            display_name: format!("Talent {}", id),
            skills: vec!["geriatrics".to_string()],
            diplomas: vec!["nursing-degree".to_string()],
            latitude: lat,
            longitude: lon,
            rating,
            completed_missions: 10,
            is_available: available,
            hourly_rate: 25.0,
        }
    }

    fn create_mission() -> MissionRequest {
        MissionRequest {
            mission_id: "mission_1".to_string(),
            title: "Night-shift nurse".to_string(),
            required_skills: vec!["geriatrics".to_string()],
            required_diplomas: vec!["nursing-degree".to_string()],
            latitude: 48.8566, // Paris
            longitude: 2.3522,
            radius_km: 30.0,
            starts_at: Utc::now(),
            ends_at: Utc::now() + chrono::Duration::hours(8),
            urgency: UrgencyLevel::High,
            hourly_rate: 28.0,
        }
    }

    #[test]
    fn test_rank_basic() {
        let scorer = MatchScorer::with_default_weights();
        let mission = create_mission();

        let candidates = vec![
            create_candidate("1", 48.86, 2.35, 4.5, true),  // Close, available
            create_candidate("2", 48.86, 2.35, 4.5, false), // Unavailable
            create_candidate("3", 45.76, 4.84, 4.5, true),  // Lyon, out of radius
        ];

        let outcome = scorer.rank(&mission, candidates, 10).unwrap();

        assert_eq!(outcome.candidates.len(), 1);
        assert_eq!(outcome.candidates[0].talent_id, "1");
        assert_eq!(outcome.total_candidates, 3);
    }

    #[test]
    fn test_results_sorted_by_score() {
        let scorer = MatchScorer::with_default_weights();
        let mission = create_mission();

        let candidates = vec![
            create_candidate("1", 48.86, 2.35, 4.8, true), // Close, highly rated
            create_candidate("2", 48.95, 2.45, 3.0, true), // Further, lower rated
        ];

        let outcome = scorer.rank(&mission, candidates, 10).unwrap();

        assert_eq!(outcome.candidates.len(), 2);
        assert!(outcome.candidates[0].match_score >= outcome.candidates[1].match_score);
    }

    #[test]
    fn test_nearer_candidate_ranks_first_when_otherwise_equal() {
        let scorer = MatchScorer::with_default_weights();
        let mut mission = create_mission();
        // Neutralize skill and diploma differences
        mission.required_skills = vec![];
        mission.required_diplomas = vec![];

        let candidates = vec![
            create_candidate("far", 48.95, 2.45, 4.5, true),
            create_candidate("near", 48.86, 2.36, 4.5, true),
        ];

        let outcome = scorer.rank(&mission, candidates, 10).unwrap();

        assert_eq!(outcome.candidates[0].talent_id, "near");
        assert!(outcome.candidates[0].distance_km <= outcome.candidates[1].distance_km);
    }

    #[test]
    fn test_higher_rated_candidate_ranks_first_at_same_distance() {
        let scorer = MatchScorer::with_default_weights();
        let mut mission = create_mission();
        mission.required_skills = vec![];
        mission.required_diplomas = vec![];

        // Identical location and experience, only rating differs
        let candidates = vec![
            create_candidate("lower", 48.86, 2.36, 3.0, true),
            create_candidate("higher", 48.86, 2.36, 4.8, true),
        ];

        let outcome = scorer.rank(&mission, candidates, 10).unwrap();

        assert_eq!(outcome.candidates[0].talent_id, "higher");
    }

    #[test]
    fn test_respects_limit() {
        let scorer = MatchScorer::with_default_weights();
        let mission = create_mission();

        let candidates: Vec<CandidateProfile> = (0..20)
            .map(|i| {
                create_candidate(
                    &i.to_string(),
                    48.86 + (i as f64 * 0.001),
                    2.35,
                    4.0,
                    true,
                )
            })
            .collect();

        let outcome = scorer.rank(&mission, candidates, 5).unwrap();

        assert_eq!(outcome.candidates.len(), 5);
        assert_eq!(outcome.total_candidates, 20);
    }

    #[test]
    fn test_zero_limit_yields_empty() {
        let scorer = MatchScorer::with_default_weights();
        let mission = create_mission();
        let candidates = vec![create_candidate("1", 48.86, 2.35, 4.5, true)];

        let outcome = scorer.rank(&mission, candidates, 0).unwrap();

        assert!(outcome.candidates.is_empty());
        assert_eq!(outcome.total_candidates, 1);
    }

    #[test]
    fn test_empty_pool_yields_empty() {
        let scorer = MatchScorer::with_default_weights();
        let mission = create_mission();

        let outcome = scorer.rank(&mission, vec![], 10).unwrap();

        assert!(outcome.candidates.is_empty());
        assert_eq!(outcome.total_candidates, 0);
    }

    #[test]
    fn test_invalid_mission_coordinates_rejected() {
        let scorer = MatchScorer::with_default_weights();
        let mut mission = create_mission();
        mission.latitude = f64::NAN;

        let result = scorer.rank(&mission, vec![], 10);

        assert!(matches!(result, Err(MatchError::InvalidCoordinates { .. })));
    }

    #[test]
    fn test_invalid_radius_rejected() {
        let scorer = MatchScorer::with_default_weights();
        let mut mission = create_mission();
        mission.radius_km = 0.0;

        let result = scorer.rank(&mission, vec![], 10);

        assert!(matches!(result, Err(MatchError::InvalidRadius { .. })));
    }

    #[test]
    fn test_deterministic_ranking() {
        let scorer = MatchScorer::with_default_weights();
        let mission = create_mission();

        let candidates: Vec<CandidateProfile> = (0..10)
            .map(|i| create_candidate(&i.to_string(), 48.86 + (i as f64 * 0.002), 2.35, 4.0, true))
            .collect();

        let first = scorer.rank(&mission, candidates.clone(), 10).unwrap();
        let second = scorer.rank(&mission, candidates, 10).unwrap();

        let first_ids: Vec<_> = first.candidates.iter().map(|c| &c.talent_id).collect();
        let second_ids: Vec<_> = second.candidates.iter().map(|c| &c.talent_id).collect();
        assert_eq!(first_ids, second_ids);
    }
}
