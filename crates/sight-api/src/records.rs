//! Observation and location endpoints.
//!
//! Thin pass-through wrappers; all session handling happens in [`ApiClient`].

use reqwest::Method;
use sight_core::{
    Location, LocationDraft, LocationPatch, LocationWithCount, Observation, ObservationDraft,
    ObservationPatch, Page,
};

use crate::client::ApiClient;
use crate::error::ApiError;

/// `/observations`.
#[derive(Debug, Clone, Copy)]
pub struct Observations<'a> {
    client: &'a ApiClient,
}

impl<'a> Observations<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Propagates [`ApiError`] from the client.
    pub async fn list(&self, skip: u32, limit: u32) -> Result<Page<Observation>, ApiError> {
        self.client
            .get(&format!("/observations?skip={skip}&limit={limit}"))
            .await
    }

    /// # Errors
    ///
    /// Propagates [`ApiError`] from the client.
    pub async fn get(&self, id: i64) -> Result<Observation, ApiError> {
        self.client.get(&format!("/observations/{id}")).await
    }

    /// # Errors
    ///
    /// Propagates [`ApiError`] from the client.
    pub async fn create(&self, draft: &ObservationDraft) -> Result<Observation, ApiError> {
        self.client
            .send(Method::POST, "/observations", Some(draft))
            .await
    }

    /// # Errors
    ///
    /// Propagates [`ApiError`] from the client.
    pub async fn update(&self, id: i64, patch: &ObservationPatch) -> Result<Observation, ApiError> {
        self.client
            .send(Method::PUT, &format!("/observations/{id}"), Some(patch))
            .await
    }

    /// # Errors
    ///
    /// Propagates [`ApiError`] from the client.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/observations/{id}")).await
    }
}

/// `/locations`.
#[derive(Debug, Clone, Copy)]
pub struct Locations<'a> {
    client: &'a ApiClient,
}

impl<'a> Locations<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Newest first, with each location's observation count.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the client.
    pub async fn list(&self, skip: u32, limit: u32) -> Result<Page<LocationWithCount>, ApiError> {
        self.client
            .get(&format!("/locations?skip={skip}&limit={limit}"))
            .await
    }

    /// # Errors
    ///
    /// Propagates [`ApiError`] from the client.
    pub async fn get(&self, id: i64) -> Result<LocationWithCount, ApiError> {
        self.client.get(&format!("/locations/{id}")).await
    }

    /// # Errors
    ///
    /// Propagates [`ApiError`] from the client.
    pub async fn create(&self, draft: &LocationDraft) -> Result<Location, ApiError> {
        self.client.send(Method::POST, "/locations", Some(draft)).await
    }

    /// # Errors
    ///
    /// Propagates [`ApiError`] from the client.
    pub async fn update(&self, id: i64, patch: &LocationPatch) -> Result<Location, ApiError> {
        self.client
            .send(Method::PUT, &format!("/locations/{id}"), Some(patch))
            .await
    }

    /// # Errors
    ///
    /// Propagates [`ApiError`] from the client.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/locations/{id}")).await
    }
}

impl ApiClient {
    #[must_use]
    pub fn observations(&self) -> Observations<'_> {
        Observations::new(self)
    }

    #[must_use]
    pub fn locations(&self) -> Locations<'_> {
        Locations::new(self)
    }
}
