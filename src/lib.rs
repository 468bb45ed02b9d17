//! Swamp Study - study partner matching and coordination service
//!
//! Students register the classes they take and how they like to study. This
//! library ranks classmates by compatibility, tracks friend requests and
//! friendships, keeps a per-user availability calendar and carries direct
//! messages between users.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{compute_matches, RelationshipError};
pub use error::ApiError;
pub use models::{Match, Profile, ProfileMap, Relationships};
pub use services::{MemoryStore, PostgresStore, Store};
