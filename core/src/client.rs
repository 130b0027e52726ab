//! Request builders and response parsers for the veterinary records API.
//!
//! # Design
//! `AtlasClient` holds a `DataSource` and nothing else. Each domain operation
//! is split into a `build_*` method that binds the operation's endpoint
//! template and verb, and a `parse_*` method that decodes the response. The
//! caller (or `Atlas`) executes the round-trip in between.
//!
//! Endpoint scheme, all under `/api/v1`:
//! - `GET    /pets/`               list pets
//! - `GET    /pets/{name}`         one pet
//! - `POST   /pets`                add pet
//! - `PUT    /pets/{name}`         update health status
//! - `DELETE /pets/{name}/{ssn}`   delete pet
//! - `GET    /owners/`             list owners
//! - `POST   /owners`              add owner
//! - `GET    /owners/{ssn}/pets`   an owner's pets

use urlencoding::encode;

use crate::data_source::{decode_json, expect_success, DataSource};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{HealthStatus, HealthStatusUpdate, NewOwner, NewPet, Owner, Pet};

/// Path prefix shared by every endpoint.
pub const API_PREFIX: &str = "/api/v1";

/// Synchronous, I/O-free client for the veterinary records API.
#[derive(Debug, Clone)]
pub struct AtlasClient {
    source: DataSource,
}

impl AtlasClient {
    pub fn new(source: DataSource) -> Self {
        Self { source }
    }

    pub fn data_source(&self) -> &DataSource {
        &self.source
    }

    pub fn build_list_pets(&self) -> HttpRequest {
        self.source.build_get(&format!("{API_PREFIX}/pets/"))
    }

    pub fn build_get_pet(&self, pet_name: &str) -> Result<HttpRequest, ApiError> {
        let name = segment("petName", pet_name)?;
        Ok(self.source.build_get(&format!("{API_PREFIX}/pets/{name}")))
    }

    pub fn build_list_owners(&self) -> HttpRequest {
        self.source.build_get(&format!("{API_PREFIX}/owners/"))
    }

    pub fn build_list_owner_pets(&self, owner_ssn: &str) -> Result<HttpRequest, ApiError> {
        let ssn = segment("ownerSsn", owner_ssn)?;
        Ok(self
            .source
            .build_get(&format!("{API_PREFIX}/owners/{ssn}/pets")))
    }

    pub fn build_add_pet(&self, pet: &NewPet) -> Result<HttpRequest, ApiError> {
        pet.validate()?;
        self.source
            .build_json(&format!("{API_PREFIX}/pets"), HttpMethod::Post, pet)
    }

    pub fn build_add_owner(&self, owner: &NewOwner) -> Result<HttpRequest, ApiError> {
        owner.validate()?;
        self.source
            .build_json(&format!("{API_PREFIX}/owners"), HttpMethod::Post, owner)
    }

    pub fn build_delete_pet(&self, pet_name: &str, owner_ssn: &str) -> Result<HttpRequest, ApiError> {
        let name = segment("petName", pet_name)?;
        let ssn = segment("ownerSsn", owner_ssn)?;
        self.source.build_request(
            &format!("{API_PREFIX}/pets/{name}/{ssn}"),
            HttpMethod::Delete,
            serde_json::Map::new(),
        )
    }

    pub fn build_update_pet_health_status(
        &self,
        pet_name: &str,
        health_status: HealthStatus,
    ) -> Result<HttpRequest, ApiError> {
        let name = segment("petName", pet_name)?;
        let update = HealthStatusUpdate {
            pet_name: pet_name.to_string(),
            health_status,
        };
        self.source
            .build_json(&format!("{API_PREFIX}/pets/{name}"), HttpMethod::Put, &update)
    }

    pub fn parse_list_pets(&self, response: HttpResponse) -> Result<Vec<Pet>, ApiError> {
        decode_json(response)
    }

    pub fn parse_get_pet(&self, response: HttpResponse) -> Result<Pet, ApiError> {
        decode_json(response)
    }

    pub fn parse_list_owners(&self, response: HttpResponse) -> Result<Vec<Owner>, ApiError> {
        decode_json(response)
    }

    pub fn parse_list_owner_pets(&self, response: HttpResponse) -> Result<Vec<Pet>, ApiError> {
        decode_json(response)
    }

    pub fn parse_add_pet(&self, response: HttpResponse) -> Result<Pet, ApiError> {
        decode_json(response)
    }

    pub fn parse_add_owner(&self, response: HttpResponse) -> Result<Owner, ApiError> {
        decode_json(response)
    }

    pub fn parse_update_pet_health_status(&self, response: HttpResponse) -> Result<Pet, ApiError> {
        decode_json(response)
    }

    /// Any 2xx counts as deleted; the body, if any, is ignored.
    pub fn parse_delete_pet(&self, response: HttpResponse) -> Result<(), ApiError> {
        expect_success(&response)
    }
}

/// Percent-encode one path segment, rejecting blanks so an empty name can
/// never turn `/pets/{name}` into the list endpoint.
fn segment<'a>(field: &str, value: &'a str) -> Result<std::borrow::Cow<'a, str>, ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation(format!("{field} is required")));
    }
    Ok(encode(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::session::Session;

    fn client() -> AtlasClient {
        AtlasClient::new(DataSource::with_session(
            "http://localhost:3000",
            Session::new("tok1"),
        ))
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    const REX: &str = r#"{"petName":"Rex","species":"Dog","breed":"Lab","birthdate":"2020-01-01","healthStatus":"Healthy","ownerSsn":"123"}"#;

    #[test]
    fn build_list_pets_produces_correct_request() {
        let req = client().build_list_pets();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/api/v1/pets/");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_get_pet_encodes_the_name() {
        let req = client().build_get_pet("Mr Whiskers").unwrap();
        assert_eq!(req.url, "http://localhost:3000/api/v1/pets/Mr%20Whiskers");
    }

    #[test]
    fn build_get_pet_rejects_blank_name() {
        let err = client().build_get_pet("").unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn owner_pets_do_not_collide_with_single_pet() {
        let c = client();
        let by_owner = c.build_list_owner_pets("123").unwrap();
        let by_name = c.build_get_pet("123").unwrap();
        assert_eq!(by_owner.url, "http://localhost:3000/api/v1/owners/123/pets");
        assert_ne!(by_owner.url, by_name.url);
    }

    #[test]
    fn build_list_owners_produces_correct_request() {
        let req = client().build_list_owners();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/api/v1/owners/");
    }

    #[test]
    fn build_add_owner_injects_token() {
        let owner = NewOwner {
            owner_name: "Ada".to_string(),
            address: "1 Main St".to_string(),
            phone: "555-0100".to_string(),
            email: "ada@example.test".to_string(),
            owner_ssn: "123".to_string(),
        };
        let req = client().build_add_owner(&owner).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:3000/api/v1/owners");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["ownerName"], "Ada");
        assert_eq!(body["_csrf"], "tok1");
    }

    #[test]
    fn build_add_pet_validates_first() {
        let pet = NewPet {
            pet_name: "Rex".to_string(),
            species: String::new(),
            breed: "Lab".to_string(),
            color: None,
            birthdate: "2020-01-01".to_string(),
            health_status: HealthStatus::Healthy,
            owner_ssn: "123".to_string(),
        };
        let err = client().build_add_pet(&pet).unwrap_err();
        assert!(matches!(err, ApiError::Validation(m) if m.contains("species")));
    }

    #[test]
    fn build_delete_pet_targets_name_and_owner() {
        let req = client().build_delete_pet("Rex", "123").unwrap();
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.url, "http://localhost:3000/api/v1/pets/Rex/123");
        assert_eq!(req.body.as_deref(), Some(r#"{"_csrf":"tok1"}"#));
    }

    #[test]
    fn build_update_health_status_sends_name_and_status() {
        let req = client()
            .build_update_pet_health_status("Rex", HealthStatus::Sick)
            .unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.url, "http://localhost:3000/api/v1/pets/Rex");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"petName": "Rex", "healthStatus": "Sick", "_csrf": "tok1"})
        );
    }

    #[test]
    fn parse_get_pet_not_found() {
        let err = client().parse_get_pet(response(404, "")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn parse_add_pet_accepts_created() {
        let pet = client().parse_add_pet(response(201, REX)).unwrap();
        assert_eq!(pet.pet_name, "Rex");
    }

    #[test]
    fn parse_update_rejects_forbidden() {
        let err = client()
            .parse_update_pet_health_status(response(403, "invalid csrf token"))
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Transport(TransportError::Status { status: 403, .. })
        ));
    }

    #[test]
    fn parse_delete_pet_ignores_body() {
        assert!(client().parse_delete_pet(response(204, "")).is_ok());
        assert!(client().parse_delete_pet(response(200, "true")).is_ok());
    }

    #[test]
    fn parse_list_owners_bad_json() {
        let err = client().parse_list_owners(response(200, "<html>")).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
