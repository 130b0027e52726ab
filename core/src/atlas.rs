//! Async facade over `AtlasClient` and a `RequestSender`.
//!
//! Every method is `build_*` → `send` → `parse_*`. Errors propagate
//! unchanged; presenting them is the caller's job.

use tracing::debug;

use crate::client::AtlasClient;
use crate::data_source::DataSource;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::sender::RequestSender;
use crate::types::{HealthStatus, NewOwner, NewPet, Owner, Pet};

/// Typed domain operations for the veterinary records API.
///
/// Cheap to clone when the sender is. Concurrent calls are independent; a
/// caller that needs "add owner, then add pet" must await the first call.
#[derive(Debug, Clone)]
pub struct Atlas<S> {
    client: AtlasClient,
    sender: S,
}

impl<S: RequestSender> Atlas<S> {
    pub fn new(source: DataSource, sender: S) -> Self {
        Self {
            client: AtlasClient::new(source),
            sender,
        }
    }

    pub fn client(&self) -> &AtlasClient {
        &self.client
    }

    pub async fn list_pets(&self) -> Result<Vec<Pet>, ApiError> {
        let response = self.execute(self.client.build_list_pets()).await?;
        self.client.parse_list_pets(response)
    }

    pub async fn get_pet(&self, pet_name: &str) -> Result<Pet, ApiError> {
        let response = self.execute(self.client.build_get_pet(pet_name)?).await?;
        self.client.parse_get_pet(response)
    }

    pub async fn list_owners(&self) -> Result<Vec<Owner>, ApiError> {
        let response = self.execute(self.client.build_list_owners()).await?;
        self.client.parse_list_owners(response)
    }

    pub async fn list_owner_pets(&self, owner_ssn: &str) -> Result<Vec<Pet>, ApiError> {
        let response = self
            .execute(self.client.build_list_owner_pets(owner_ssn)?)
            .await?;
        self.client.parse_list_owner_pets(response)
    }

    pub async fn add_pet(&self, pet: &NewPet) -> Result<Pet, ApiError> {
        let response = self.execute(self.client.build_add_pet(pet)?).await?;
        self.client.parse_add_pet(response)
    }

    pub async fn add_owner(&self, owner: &NewOwner) -> Result<Owner, ApiError> {
        let response = self.execute(self.client.build_add_owner(owner)?).await?;
        self.client.parse_add_owner(response)
    }

    pub async fn delete_pet(&self, pet_name: &str, owner_ssn: &str) -> Result<(), ApiError> {
        let response = self
            .execute(self.client.build_delete_pet(pet_name, owner_ssn)?)
            .await?;
        self.client.parse_delete_pet(response)
    }

    pub async fn update_pet_health_status(
        &self,
        pet_name: &str,
        health_status: HealthStatus,
    ) -> Result<Pet, ApiError> {
        let request = self
            .client
            .build_update_pet_health_status(pet_name, health_status)?;
        let response = self.execute(request).await?;
        self.client.parse_update_pet_health_status(response)
    }

    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, url = %request.url, "sending request");
        let response = self.sender.send(request).await?;
        debug!(status = response.status, "received response");
        Ok(response)
    }
}
