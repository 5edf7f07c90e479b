// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BoundingBox, CandidateProfile, CandidateResult, MissionRequest, ProposalEvent, ProposalStatus,
    ScoringWeights, UrgencyLevel,
};
pub use requests::{RankCandidatesRequest, RecordProposalRequest};
pub use responses::{ErrorResponse, HealthResponse, RankCandidatesResponse, RecordProposalResponse};
