use crate::models::{CandidateProfile, MissionRequest, ProposalEvent};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the marketplace core API
#[derive(Debug, Error)]
pub enum MarketplaceError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid service token")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Client for the Les Extras core REST API
///
/// The marketplace core stays the system of record for missions and
/// talent profiles; this client handles:
/// - Fetching mission documents
/// - Querying the candidate talent pool with server-side pre-filters
/// - Mirroring proposal events for analytics
pub struct MarketplaceClient {
    base_url: String,
    service_token: String,
    client: Client,
}

impl MarketplaceClient {
    /// Create a new marketplace client
    pub fn new(base_url: String, service_token: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            service_token,
            client,
        }
    }

    /// Fetch a mission by its ID
    pub async fn get_mission(&self, mission_id: &str) -> Result<MissionRequest, MarketplaceError> {
        let url = format!(
            "{}/missions/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(mission_id)
        );

        tracing::debug!("Fetching mission from: {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.service_token)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(MarketplaceError::NotFound(format!(
                "Mission not found: {}",
                mission_id
            )));
        }
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(MarketplaceError::Unauthorized);
        }
        if !status.is_success() {
            return Err(MarketplaceError::ApiError(format!(
                "Failed to fetch mission: {}",
                status
            )));
        }

        let json: Value = response.json().await?;

        // The core API wraps payloads in a "data" envelope
        let data = json.get("data").unwrap_or(&json);

        serde_json::from_value(data.clone()).map_err(|e| {
            MarketplaceError::InvalidResponse(format!("Failed to parse mission: {}", e))
        })
    }

    /// Query the candidate talent pool for a mission
    ///
    /// Pre-filters server-side: bounding box around the mission, availability
    /// over the mission's time window, skill tags, and the mission's hourly
    /// rate as a ceiling. The scorer re-checks radius and availability, so
    /// these filters only trim the transfer, never decide the ranking.
    pub async fn query_candidates(
        &self,
        mission: &MissionRequest,
        exclude_ids: &[String],
        limit: usize,
    ) -> Result<Vec<CandidateProfile>, MarketplaceError> {
        let bbox = crate::core::distance::calculate_bounding_box(
            mission.latitude,
            mission.longitude,
            mission.radius_km,
        );

        let skills = mission.required_skills.join(",");

        let mut params = vec![
            ("minLat".to_string(), bbox.min_lat.to_string()),
            ("maxLat".to_string(), bbox.max_lat.to_string()),
            ("minLon".to_string(), bbox.min_lon.to_string()),
            ("maxLon".to_string(), bbox.max_lon.to_string()),
            ("availableFrom".to_string(), mission.starts_at.to_rfc3339()),
            ("availableTo".to_string(), mission.ends_at.to_rfc3339()),
            ("limit".to_string(), limit.to_string()),
        ];

        if !skills.is_empty() {
            params.push(("skills".to_string(), skills));
        }

        if mission.hourly_rate > 0.0 {
            params.push(("maxHourlyRate".to_string(), mission.hourly_rate.to_string()));
        }

        let query = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let url = format!(
            "{}/talents/search?{}",
            self.base_url.trim_end_matches('/'),
            query
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.service_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MarketplaceError::ApiError(format!(
                "Failed to query candidates: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let total = json.get("total").and_then(|t| t.as_u64()).unwrap_or(0);

        let items = json
            .get("items")
            .and_then(|d| d.as_array())
            .ok_or_else(|| MarketplaceError::InvalidResponse("Missing items array".into()))?;

        let profiles: Vec<CandidateProfile> = items
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .filter(|p: &CandidateProfile| !exclude_ids.contains(&p.talent_id))
            .collect();

        tracing::debug!("Queried {} candidates (total: {})", profiles.len(), total);

        Ok(profiles)
    }

    /// Mirror a proposal event to the marketplace core
    ///
    /// Best-effort: the PostgreSQL store is the source of truth for
    /// proposal tracking, this copy feeds the core's activity feed.
    pub async fn record_proposal(&self, event: &ProposalEvent) -> Result<(), MarketplaceError> {
        let url = format!(
            "{}/missions/{}/proposals",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(&event.mission_id)
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.service_token)
            .json(event)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MarketplaceError::ApiError(format!(
                "Failed to record proposal: {}",
                response.status()
            )));
        }

        tracing::debug!(
            "Mirrored proposal: {} -> {} ({:?})",
            event.mission_id,
            event.talent_id,
            event.status
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marketplace_client_creation() {
        let client = MarketplaceClient::new(
            "https://api.les-extras.test/v1".to_string(),
            "test_token".to_string(),
        );

        assert_eq!(client.base_url, "https://api.les-extras.test/v1");
        assert_eq!(client.service_token, "test_token");
    }
}
