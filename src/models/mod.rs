// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AcademicYear, Availability, AvailabilityStatus, CommonFields, ConversationSummary, Match,
    Message, Profile, ProfileMap, Relationships, Role, StudyFrequency, StudyGoal, StudyGoals,
    StudyPreference, UserAccount,
};
pub use requests::{
    AuthRequest, AvailabilityRequest, MatchesQuery, ProfileRequest, RelationshipRequest,
    SearchQuery, SendMessageRequest,
};
pub use responses::{
    AdminUserDetail, AdminUserSummary, AuthResponse, AvailabilityResponse, ErrorResponse,
    FindMatchesResponse, FriendsResponse, HealthResponse, OkResponse, PendingResponse,
    ProfileSavedResponse,
};
