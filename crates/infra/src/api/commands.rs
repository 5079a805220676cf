//! Typed operations over the Mojio v2 API
//!
//! Thin wrappers that pick the operation name, the command kind and the
//! entity type, so callers don't build parameter maps by hand.

use std::sync::Arc;

use mojio_domain::types::{Mojio, MojioClaim, Trip, User, Vehicle, VehicleUpdate};
use mojio_domain::{MojioError, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use super::client::ApiClient;
use super::command::{NoContent, Single};
use super::list::GetList;
use super::params::{ListQuery, Params};
use super::registry::operations;
use super::result_list::ResultList;

/// API commands for domain operations
#[derive(Debug, Clone)]
pub struct ApiCommands {
    client: Arc<ApiClient>,
}

impl ApiCommands {
    /// Create a new commands instance
    ///
    /// # Arguments
    ///
    /// * `client` - API client
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    // === Account ===

    /// Fetch the authenticated user
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the body cannot be decoded
    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<User> {
        self.client.call::<Single<User>>(operations::GET_ME, Params::new()).await
    }

    // === Vehicle Operations ===

    /// List vehicles
    ///
    /// # Arguments
    ///
    /// * `query` - Filter and paging options
    ///
    /// # Errors
    ///
    /// Returns error if the query is invalid or the request fails
    #[instrument(skip(self, query))]
    pub async fn vehicles(&self, query: ListQuery) -> Result<ResultList<Vehicle>> {
        self.client.call::<GetList<Vehicle>>(operations::GET_VEHICLES, query.into_params()).await
    }

    /// Fetch one vehicle
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the body cannot be decoded
    #[instrument(skip(self))]
    pub async fn vehicle(&self, id: &str) -> Result<Vehicle> {
        self.client.call::<Single<Vehicle>>(operations::GET_VEHICLE, with_id(id)).await
    }

    /// Update a vehicle's mutable fields
    ///
    /// Only fields set on `update` are sent.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the body cannot be decoded
    #[instrument(skip(self, update))]
    pub async fn update_vehicle(&self, id: &str, update: &VehicleUpdate) -> Result<Vehicle> {
        let mut params = with_id(id);
        merge_body(&mut params, update)?;
        self.client.call::<Single<Vehicle>>(operations::UPDATE_VEHICLE, params).await
    }

    /// List trips taken by one vehicle
    ///
    /// # Errors
    ///
    /// Returns error if the query is invalid or the request fails
    #[instrument(skip(self, query))]
    pub async fn vehicle_trips(&self, id: &str, query: ListQuery) -> Result<ResultList<Trip>> {
        let mut params = query.into_params();
        params.insert("id".to_string(), Value::String(id.to_string()));
        self.client.call::<GetList<Trip>>(operations::GET_VEHICLE_TRIPS, params).await
    }

    // === Trip Operations ===

    /// List trips across all vehicles
    ///
    /// # Errors
    ///
    /// Returns error if the query is invalid or the request fails
    #[instrument(skip(self, query))]
    pub async fn trips(&self, query: ListQuery) -> Result<ResultList<Trip>> {
        self.client.call::<GetList<Trip>>(operations::GET_TRIPS, query.into_params()).await
    }

    #[instrument(skip(self))]
    pub async fn trip(&self, id: &str) -> Result<Trip> {
        self.client.call::<Single<Trip>>(operations::GET_TRIP, with_id(id)).await
    }

    // === Device Operations ===

    /// List Mojio devices
    ///
    /// # Errors
    ///
    /// Returns error if the query is invalid or the request fails
    #[instrument(skip(self, query))]
    pub async fn mojios(&self, query: ListQuery) -> Result<ResultList<Mojio>> {
        self.client.call::<GetList<Mojio>>(operations::GET_MOJIOS, query.into_params()).await
    }

    #[instrument(skip(self))]
    pub async fn mojio(&self, id: &str) -> Result<Mojio> {
        self.client.call::<Single<Mojio>>(operations::GET_MOJIO, with_id(id)).await
    }

    /// Claim a device for the authenticated account
    ///
    /// # Errors
    ///
    /// Returns [`MojioError::Validation`] if the IMEI is empty, or an error
    /// if the request fails
    #[instrument(skip(self, claim), fields(imei = %claim.imei))]
    pub async fn claim_mojio(&self, claim: &MojioClaim) -> Result<Mojio> {
        if claim.imei.trim().is_empty() {
            return Err(MojioError::Validation("IMEI must not be empty".to_string()));
        }

        let mut params = Params::new();
        merge_body(&mut params, claim)?;
        self.client.call::<Single<Mojio>>(operations::CLAIM_MOJIO, params).await
    }

    /// Release a device
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    #[instrument(skip(self))]
    pub async fn delete_mojio(&self, id: &str) -> Result<()> {
        self.client.call::<NoContent>(operations::DELETE_MOJIO, with_id(id)).await
    }
}

fn with_id(id: &str) -> Params {
    let mut params = Params::new();
    params.insert("id".to_string(), Value::String(id.to_string()));
    params
}

/// Flatten a payload struct into body parameters.
fn merge_body<T: Serialize>(params: &mut Params, payload: &T) -> Result<()> {
    match serde_json::to_value(payload) {
        Ok(Value::Object(fields)) => {
            params.extend(fields);
            Ok(())
        }
        Ok(other) => Err(MojioError::Internal(format!("payload is not an object: {other}"))),
        Err(e) => Err(MojioError::Internal(format!("failed to serialize payload: {e}"))),
    }
}
