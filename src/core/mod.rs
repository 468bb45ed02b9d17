// Core algorithm exports
pub mod conversations;
pub mod filters;
pub mod matcher;
pub mod relationships;
pub mod scoring;

pub use conversations::summarize_conversations;
pub use filters::{is_eligible_candidate, shared_classes};
pub use matcher::compute_matches;
pub use relationships::{apply_accept, apply_deny, apply_request, check_request, RelationshipError};
pub use scoring::{compare_profiles, compatibility_score, MAX_COMPATIBILITY};
