//! # sight-core
//!
//! Wire types shared across the Sight crates.
//!
//! - Identity payloads exchanged with the backend's `/auth` endpoints
//!   (login/logout URLs, token grants, the current user's profile)
//! - Observation and location records served under `/observations` and
//!   `/locations`, plus the paginated envelope both list endpoints use

pub mod identity;
pub mod records;

pub use identity::{RedirectUrl, TokenGrant, UserProfile};
pub use records::{
    Location, LocationDraft, LocationPatch, LocationWithCount, Observation, ObservationDraft,
    ObservationPatch, Page,
};
