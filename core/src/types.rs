//! Domain DTOs for the veterinary records API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch any drift between the two crates. Field names are
//! camelCase on the wire.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Health of a pet as tracked by the clinic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Healthy,
    Sick,
    Recovering,
}

impl HealthStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            HealthStatus::Healthy => "Healthy",
            HealthStatus::Sick => "Sick",
            HealthStatus::Recovering => "Recovering",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HealthStatus {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "healthy" => Ok(HealthStatus::Healthy),
            "sick" => Ok(HealthStatus::Sick),
            "recovering" => Ok(HealthStatus::Recovering),
            _ => Err(ApiError::Validation(format!("unknown health status: {s}"))),
        }
    }
}

/// A pet record returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub pet_name: String,
    pub species: String,
    pub breed: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub birthdate: String,
    pub health_status: HealthStatus,
    pub owner_ssn: String,
}

/// An owner record returned by the API. `owner_ssn` is the primary key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub owner_name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub owner_ssn: String,
}

/// Request payload for registering a pet. `color` is omitted from the JSON
/// when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPet {
    pub pet_name: String,
    pub species: String,
    pub breed: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub birthdate: String,
    pub health_status: HealthStatus,
    pub owner_ssn: String,
}

impl NewPet {
    /// Reject blank required fields before anything is sent.
    pub fn validate(&self) -> Result<(), ApiError> {
        require("petName", &self.pet_name)?;
        require("species", &self.species)?;
        require("breed", &self.breed)?;
        require("birthdate", &self.birthdate)?;
        require("ownerSsn", &self.owner_ssn)
    }
}

/// Request payload for registering an owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOwner {
    pub owner_name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub owner_ssn: String,
}

impl NewOwner {
    pub fn validate(&self) -> Result<(), ApiError> {
        require("ownerName", &self.owner_name)?;
        require("address", &self.address)?;
        require("phone", &self.phone)?;
        require("email", &self.email)?;
        require("ownerSsn", &self.owner_ssn)
    }
}

/// Request payload for changing a pet's health status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatusUpdate {
    pub pet_name: String,
    pub health_status: HealthStatus,
}

fn require(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation(format!("{field} is required")));
    }
    Ok(())
}
