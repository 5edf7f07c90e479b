use serde::{Deserialize, Serialize};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("Connection pool error: {0}")]
    PoolError(#[from] deadpool_postgres::PoolError),

    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Proposal status for (mission, talent) pairs
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "proposal_status", rename_all = "lowercase")]
pub enum ProposalState {
    Proposed,
    Accepted,
    Declined,
    Booked,
}

impl From<crate::models::ProposalStatus> for ProposalState {
    fn from(value: crate::models::ProposalStatus) -> Self {
        match value {
            crate::models::ProposalStatus::Proposed => ProposalState::Proposed,
            crate::models::ProposalStatus::Accepted => ProposalState::Accepted,
            crate::models::ProposalStatus::Declined => ProposalState::Declined,
            crate::models::ProposalStatus::Booked => ProposalState::Booked,
        }
    }
}

/// PostgreSQL client for tracking mission proposals
///
/// This store is separate from the marketplace core database. It records
/// which talents have already been proposed for each mission so the
/// ranking endpoint never surfaces the same talent twice for one mission.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Record that a talent has been proposed for a mission
    ///
    /// Uses INSERT ... ON CONFLICT so a second event for the same pair
    /// updates the status and timestamp instead of failing.
    pub async fn record_proposal(
        &self,
        mission_id: &str,
        talent_id: &str,
        status: ProposalState,
    ) -> Result<(), PostgresError> {
        let query = r#"
            INSERT INTO mission_proposals (mission_id, talent_id, status, proposed_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (mission_id, talent_id)
            DO UPDATE SET
                status = EXCLUDED.status,
                proposed_at = EXCLUDED.proposed_at
        "#;

        sqlx::query(query)
            .bind(mission_id)
            .bind(talent_id)
            .bind(&status)
            .execute(&self.pool)
            .await?;

        tracing::debug!(
            "Recorded proposal: {} -> {} ({:?})",
            mission_id,
            talent_id,
            status
        );

        Ok(())
    }

    /// Get all talent IDs already proposed for a mission
    ///
    /// Returns the talent_ids that should be excluded from subsequent
    /// ranking results for this mission.
    pub async fn get_proposed_talents(
        &self,
        mission_id: &str,
    ) -> Result<Vec<String>, PostgresError> {
        let query = r#"
            SELECT talent_id
            FROM mission_proposals
            WHERE mission_id = $1
        "#;

        let rows = sqlx::query(query)
            .bind(mission_id)
            .fetch_all(&self.pool)
            .await?;

        let talent_ids: Vec<String> = rows.iter().map(|row| row.get("talent_id")).collect();

        tracing::debug!(
            "Mission {} has {} proposed talents",
            mission_id,
            talent_ids.len()
        );

        Ok(talent_ids)
    }

    /// Remove a proposal record (e.g. when a proposal is withdrawn)
    pub async fn remove_proposal(
        &self,
        mission_id: &str,
        talent_id: &str,
    ) -> Result<bool, PostgresError> {
        let query = r#"
            DELETE FROM mission_proposals
            WHERE mission_id = $1 AND talent_id = $2
        "#;

        let result = sqlx::query(query)
            .bind(mission_id)
            .bind(talent_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Clear all proposals for a mission (e.g. when a mission is reposted)
    pub async fn clear_proposals(&self, mission_id: &str) -> Result<u64, PostgresError> {
        let query = r#"
            DELETE FROM mission_proposals
            WHERE mission_id = $1
        "#;

        let result = sqlx::query(query)
            .bind(mission_id)
            .execute(&self.pool)
            .await?;

        tracing::info!(
            "Cleared {} proposals for mission {}",
            result.rows_affected(),
            mission_id
        );

        Ok(result.rows_affected())
    }

    /// Get per-status proposal counts for a mission
    pub async fn get_proposal_stats(
        &self,
        mission_id: &str,
    ) -> Result<ProposalStats, PostgresError> {
        let query = r#"
            SELECT
                COUNT(*) as total,
                COUNT(*) FILTER (WHERE status = 'proposed') as proposed,
                COUNT(*) FILTER (WHERE status = 'accepted') as accepted,
                COUNT(*) FILTER (WHERE status = 'declined') as declined,
                COUNT(*) FILTER (WHERE status = 'booked') as booked,
                MAX(proposed_at) as last_proposed_at
            FROM mission_proposals
            WHERE mission_id = $1
        "#;

        let row = sqlx::query(query)
            .bind(mission_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(ProposalStats {
            mission_id: mission_id.to_string(),
            total: row.get("total"),
            proposed: row.get("proposed"),
            accepted: row.get("accepted"),
            declined: row.get("declined"),
            booked: row.get("booked"),
            last_proposed_at: row.get("last_proposed_at"),
        })
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

/// Per-mission proposal statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalStats {
    pub mission_id: String,
    pub total: i64,
    pub proposed: i64,
    pub accepted: i64,
    pub declined: i64,
    pub booked: i64,
    pub last_proposed_at: Option<chrono::DateTime<chrono::Utc>>,
}
