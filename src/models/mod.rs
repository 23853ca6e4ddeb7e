// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Location, LocationTier, MenteeProfile, MentorProfile, MentorshipRequest, RankedMentor,
    RequestStatus, ScoringWeights,
};
pub use requests::MatchMentorsRequest;
pub use responses::{ErrorResponse, HealthResponse, MatchMentorsResponse};
