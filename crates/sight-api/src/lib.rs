//! # sight-api
//!
//! REST client for the Sight backend (`/api/v1`).
//!
//! [`ApiClient`] runs every request through the session's request authorizer
//! and response gatekeeper. [`HttpIdentityBackend`] implements the `/auth`
//! endpoints the session controller needs; [`records`] wraps the observation
//! and location endpoints.

pub mod client;
pub mod error;
pub mod identity;
pub mod records;

pub use client::ApiClient;
pub use error::ApiError;
pub use identity::HttpIdentityBackend;
pub use records::{Locations, Observations};
