use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

pub const CSRF_HEADER: &str = "csrf-token";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Healthy,
    Sick,
    Recovering,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
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

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub owner_name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub owner_ssn: String,
}

/// Body of a mutating request: the entity fields plus `_csrf`.
#[derive(Deserialize)]
pub struct Guarded<T> {
    #[serde(rename = "_csrf")]
    pub csrf: String,
    #[serde(flatten)]
    pub inner: T,
}

#[derive(Deserialize)]
pub struct Empty {}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthUpdate {
    pub pet_name: String,
    pub health_status: HealthStatus,
}

#[derive(Default)]
pub struct Store {
    /// Keyed by (owner SSN, pet name): names are unique per owner.
    pub pets: BTreeMap<(String, String), Pet>,
    pub owners: BTreeMap<String, Owner>,
}

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<RwLock<Store>>,
    pub csrf_token: Arc<str>,
}

pub fn app(csrf_token: &str) -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(Store::default())),
        csrf_token: Arc::from(csrf_token),
    };
    Router::new()
        .route("/api/v1/pets/", get(list_pets))
        .route("/api/v1/pets", post(add_pet))
        .route("/api/v1/pets/{name}", get(get_pet).put(update_health_status))
        .route("/api/v1/pets/{name}/{ssn}", delete(delete_pet))
        .route("/api/v1/owners/", get(list_owners))
        .route("/api/v1/owners", post(add_owner))
        .route("/api/v1/owners/{ssn}/pets", get(list_owner_pets))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(listener: TcpListener, csrf_token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(csrf_token)).await
}

/// Both the header and the body field must match the server's token.
fn check_csrf(state: &AppState, headers: &HeaderMap, body_token: &str) -> Result<(), StatusCode> {
    let header_token = headers
        .get(CSRF_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(StatusCode::FORBIDDEN)?;
    if header_token != &*state.csrf_token || body_token != &*state.csrf_token {
        tracing::warn!("rejected request with invalid csrf token");
        return Err(StatusCode::FORBIDDEN);
    }
    Ok(())
}

async fn list_pets(State(state): State<AppState>) -> Json<Vec<Pet>> {
    let db = state.db.read().await;
    Json(db.pets.values().cloned().collect())
}

async fn get_pet(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Pet>, StatusCode> {
    let db = state.db.read().await;
    let key = unique_key(&db, &name)?;
    db.pets.get(&key).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// The store key of the only pet called `name`. Names are unique per owner,
/// so a name shared by several owners' pets is ambiguous.
fn unique_key(db: &Store, name: &str) -> Result<(String, String), StatusCode> {
    let mut matches = db.pets.keys().filter(|(_, pet_name)| pet_name == name);
    let key = matches.next().cloned().ok_or(StatusCode::NOT_FOUND)?;
    if matches.next().is_some() {
        return Err(StatusCode::CONFLICT);
    }
    Ok(key)
}

async fn add_pet(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<Guarded<Pet>>,
) -> Result<(StatusCode, Json<Pet>), StatusCode> {
    check_csrf(&state, &headers, &input.csrf)?;
    let pet = input.inner;
    let mut db = state.db.write().await;
    if !db.owners.contains_key(&pet.owner_ssn) {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    let key = (pet.owner_ssn.clone(), pet.pet_name.clone());
    if db.pets.contains_key(&key) {
        return Err(StatusCode::CONFLICT);
    }
    db.pets.insert(key, pet.clone());
    Ok((StatusCode::CREATED, Json(pet)))
}

async fn update_health_status(
    State(state): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
    Json(input): Json<Guarded<HealthUpdate>>,
) -> Result<Json<Pet>, StatusCode> {
    check_csrf(&state, &headers, &input.csrf)?;
    if input.inner.pet_name != name {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    let mut db = state.db.write().await;
    let key = unique_key(&db, &name)?;
    let pet = db.pets.get_mut(&key).ok_or(StatusCode::NOT_FOUND)?;
    pet.health_status = input.inner.health_status;
    Ok(Json(pet.clone()))
}

async fn delete_pet(
    State(state): State<AppState>,
    Path((name, ssn)): Path<(String, String)>,
    headers: HeaderMap,
    Json(input): Json<Guarded<Empty>>,
) -> Result<StatusCode, StatusCode> {
    check_csrf(&state, &headers, &input.csrf)?;
    let mut db = state.db.write().await;
    db.pets
        .remove(&(ssn, name))
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_owners(State(state): State<AppState>) -> Json<Vec<Owner>> {
    let db = state.db.read().await;
    Json(db.owners.values().cloned().collect())
}

async fn add_owner(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<Guarded<Owner>>,
) -> Result<(StatusCode, Json<Owner>), StatusCode> {
    check_csrf(&state, &headers, &input.csrf)?;
    let owner = input.inner;
    let mut db = state.db.write().await;
    if db.owners.contains_key(&owner.owner_ssn) {
        return Err(StatusCode::CONFLICT);
    }
    db.owners.insert(owner.owner_ssn.clone(), owner.clone());
    Ok((StatusCode::CREATED, Json(owner)))
}

async fn list_owner_pets(
    State(state): State<AppState>,
    Path(ssn): Path<String>,
) -> Result<Json<Vec<Pet>>, StatusCode> {
    let db = state.db.read().await;
    if !db.owners.contains_key(&ssn) {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(
        db.pets
            .values()
            .filter(|p| p.owner_ssn == ssn)
            .cloned()
            .collect(),
    ))
}
