use crate::config::MatchingSettings;
use crate::core::MatchScorer;
use crate::models::{
    ErrorResponse, HealthResponse, MissionRequest, ProposalEvent, ProposalStatus,
    RankCandidatesRequest, RankCandidatesResponse, RecordProposalRequest, RecordProposalResponse,
};
use crate::services::{CacheKey, CacheManager, MarketplaceClient, PostgresClient, ProposalState};
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub marketplace: Arc<MarketplaceClient>,
    pub cache: Arc<CacheManager>,
    pub postgres: Arc<PostgresClient>,
    pub scorer: MatchScorer,
    pub matching: MatchingSettings,
}

/// Resolve the effective result limit from the request and the configured
/// matching limits
fn resolve_limit(requested: Option<u16>, matching: &MatchingSettings) -> usize {
    let default_limit = u16::from(matching.default_limit.unwrap_or(20));
    let max_limit = u16::from(matching.max_limit.unwrap_or(100));
    requested.unwrap_or(default_limit).min(max_limit) as usize
}

/// Configure all mission-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/missions/rank", web::post().to(rank_candidates))
        .route("/missions/event", web::post().to(record_proposal))
        .route("/missions/proposed", web::get().to(get_proposed_talents));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    // Check PostgreSQL health
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Rank candidates endpoint
///
/// POST /api/v1/missions/rank
///
/// Request body:
/// ```json
/// {
///   "missionId": "string",
///   "limit": 20,
///   "excludeTalentIds": ["string"]
/// }
/// ```
async fn rank_candidates(
    state: web::Data<AppState>,
    req: web::Json<RankCandidatesRequest>,
) -> impl Responder {
    // Validate request
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for rank request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let mission_id = &req.mission_id;
    let limit = resolve_limit(req.limit, &state.matching);

    tracing::info!("Ranking candidates for mission: {}, limit: {}", mission_id, limit);

    // Served rankings are cached per (mission, limit) and reused only for
    // requests without caller-side exclusions, so cached entries stay
    // canonical; proposal events invalidate them
    let rankings_key = CacheKey::rankings(mission_id, limit);
    let reuse_rankings = req.exclude_talent_ids.is_empty();

    if reuse_rankings {
        if let Ok(cached) = state.cache.get::<RankCandidatesResponse>(&rankings_key).await {
            tracing::debug!("Serving cached rankings for mission {}", mission_id);
            return HttpResponse::Ok().json(cached);
        }
    }

    // Fetch the mission, with a short-lived cache in front of the core API
    let mission_key = CacheKey::mission(mission_id);
    let mission: MissionRequest = match state.cache.get(&mission_key).await {
        Ok(cached) => cached,
        Err(_) => match state.marketplace.get_mission(mission_id).await {
            Ok(mission) => {
                if let Err(e) = state.cache.set(&mission_key, &mission).await {
                    tracing::warn!("Failed to cache mission {}: {}", mission_id, e);
                }
                mission
            }
            Err(e) => {
                tracing::error!("Failed to fetch mission {}: {}", mission_id, e);
                return HttpResponse::InternalServerError().json(ErrorResponse {
                    error: "Failed to fetch mission".to_string(),
                    message: e.to_string(),
                    status_code: 500,
                });
            }
        },
    };

    // Exclude talents already proposed for this mission
    let mut exclude_ids = match state.postgres.get_proposed_talents(mission_id).await {
        Ok(ids) => ids,
        Err(e) => {
            tracing::warn!(
                "Failed to fetch proposed talents for {}, proceeding without filtering: {}",
                mission_id,
                e
            );
            vec![]
        }
    };

    // Add client-provided exclude IDs (if any)
    exclude_ids.extend(req.exclude_talent_ids.clone());

    tracing::debug!(
        "Excluding {} talents for mission {}",
        exclude_ids.len(),
        mission_id
    );

    // Over-fetch the pool so ineligible candidates still leave enough to rank;
    // urgent missions pull a wider pool
    let pool_limit = limit * mission.urgency.pool_multiplier();

    let candidates = match state
        .marketplace
        .query_candidates(&mission, &exclude_ids, pool_limit)
        .await
    {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::error!("Failed to query candidates for {}: {}", mission_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to query candidates".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    tracing::debug!("Found {} candidates for {}", candidates.len(), mission_id);

    // Run the scorer
    let outcome = match state.scorer.rank(&mission, candidates, limit) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::info!("Mission {} rejected by scorer: {}", mission_id, e);
            return HttpResponse::UnprocessableEntity().json(ErrorResponse {
                error: "Invalid mission data".to_string(),
                message: e.to_string(),
                status_code: 422,
            });
        }
    };

    let response = RankCandidatesResponse {
        candidates: outcome.candidates,
        total_candidates: outcome.total_candidates,
    };

    if reuse_rankings {
        if let Err(e) = state.cache.set(&rankings_key, &response).await {
            tracing::warn!("Failed to cache rankings for {}: {}", mission_id, e);
        }
    }

    tracing::info!(
        "Returning {} candidates for mission {} (from {} in pool)",
        response.candidates.len(),
        mission_id,
        response.total_candidates
    );

    HttpResponse::Ok().json(response)
}

/// Record proposal event endpoint
///
/// POST /api/v1/missions/event
///
/// Request body:
/// ```json
/// {
///   "missionId": "string",
///   "talentId": "string",
///   "status": "proposed|accepted|declined|booked"
/// }
/// ```
async fn record_proposal(
    state: web::Data<AppState>,
    req: web::Json<RecordProposalRequest>,
) -> impl Responder {
    // Validate request
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    // Parse proposal status
    let status = match req.status.to_lowercase().as_str() {
        "proposed" => ProposalStatus::Proposed,
        "accepted" => ProposalStatus::Accepted,
        "declined" => ProposalStatus::Declined,
        "booked" => ProposalStatus::Booked,
        _ => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid proposal status".to_string(),
                message: "Status must be one of: proposed, accepted, declined, booked".to_string(),
                status_code: 400,
            });
        }
    };

    let event = ProposalEvent {
        mission_id: req.mission_id.clone(),
        talent_id: req.talent_id.clone(),
        status,
        created_at: chrono::Utc::now(),
    };

    // Record in PostgreSQL for proposal tracking (primary source)
    let pg_state = ProposalState::from(event.status);
    let postgres_result = state
        .postgres
        .record_proposal(&req.mission_id, &req.talent_id, pg_state)
        .await;

    // Mirror to the marketplace core (best-effort, for the activity feed)
    let marketplace_result = state.marketplace.record_proposal(&event).await;

    match postgres_result {
        Ok(_) => {
            if let Err(e) = &marketplace_result {
                // Log the mirror failure but don't fail the request
                tracing::warn!(
                    "Proposal recorded in PostgreSQL but marketplace mirror failed: {}",
                    e
                );
            } else {
                tracing::debug!(
                    "Recorded proposal: {} -> {} ({})",
                    req.mission_id,
                    req.talent_id,
                    req.status
                );
            }

            // Invalidate served rankings for this mission, at every limit
            let pattern = CacheKey::rankings_pattern(&req.mission_id);
            if let Err(e) = state.cache.invalidate_pattern(&pattern).await {
                tracing::warn!("Failed to invalidate cache: {}", e);
            }

            HttpResponse::Ok().json(RecordProposalResponse {
                success: true,
                proposal_id: uuid::Uuid::new_v4().to_string(),
            })
        }
        Err(e) => {
            tracing::error!("Failed to record proposal in PostgreSQL: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to record proposal".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Get talents already proposed for a mission
///
/// GET /api/v1/missions/proposed?missionId={missionId}
///
/// Returns the talent IDs already proposed for a mission, for client-side
/// synchronization and debugging purposes.
async fn get_proposed_talents(
    state: web::Data<AppState>,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> impl Responder {
    let mission_id = match query.get("missionId") {
        Some(id) => id,
        None => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Missing missionId parameter".to_string(),
                message: "missionId query parameter is required".to_string(),
                status_code: 400,
            });
        }
    };

    match state.postgres.get_proposed_talents(mission_id).await {
        Ok(talent_ids) => HttpResponse::Ok().json(serde_json::json!({
            "missionId": mission_id,
            "proposedTalents": talent_ids,
            "count": talent_ids.len(),
        })),
        Err(e) => {
            tracing::error!("Failed to fetch proposed talents for {}: {}", mission_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch proposed talents".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
