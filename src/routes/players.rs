use axum::{
    Json, Router,
    extract::{Path, State},
    http::HeaderMap,
    routing::{get, post},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        common::AckResponse,
        player::{
            AssignCharacterRequest, CharacterEnvelope, CharacterInput, PlayerEnvelope,
            PlayersResponse, RegisterRequest, SignInRequest, SignInResponse,
        },
    },
    error::AppError,
    services::player_service,
    state::SharedState,
};

/// Routes for registration, sign-in, and character management.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/register", post(register))
        .route("/api/players", get(list_players))
        .route("/api/players/{id}/assign-character", post(assign_character))
        .route("/api/auth/signin", post(sign_in))
        .route("/api/auth/verify", get(verify))
        .route("/api/characters", get(list_characters).post(create_character))
}

#[utoipa::path(
    post,
    path = "/api/register",
    tag = "players",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Player created", body = PlayerEnvelope),
        (status = 400, description = "Invalid name")
    )
)]
/// Register a fresh player.
pub async fn register(
    State(state): State<SharedState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<PlayerEnvelope>, AppError> {
    payload.validate()?;
    let player = player_service::register(&state, payload).await?;
    Ok(Json(PlayerEnvelope { player }))
}

#[utoipa::path(
    get,
    path = "/api/players",
    tag = "players",
    responses((status = 200, description = "Current roster", body = PlayersResponse))
)]
/// Return everyone on the roster.
pub async fn list_players(State(state): State<SharedState>) -> Json<PlayersResponse> {
    Json(PlayersResponse {
        players: player_service::roster(&state).await,
    })
}

#[utoipa::path(
    post,
    path = "/api/auth/signin",
    tag = "players",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = SignInResponse),
        (status = 404, description = "First name not registered")
    )
)]
/// Sign in by first name and receive an opaque session token.
pub async fn sign_in(
    State(state): State<SharedState>,
    Json(payload): Json<SignInRequest>,
) -> Result<Json<SignInResponse>, AppError> {
    payload.validate()?;
    let (token, player) = player_service::sign_in(&state, payload).await?;
    Ok(Json(SignInResponse { token, player }))
}

#[utoipa::path(
    get,
    path = "/api/auth/verify",
    tag = "players",
    responses(
        (status = 200, description = "Token resolved", body = PlayerEnvelope),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Unknown token")
    )
)]
/// Resolve the bearer token back to its player.
pub async fn verify(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<PlayerEnvelope>, AppError> {
    let token = bearer_token(&headers)
        .ok_or_else(|| AppError::Unauthorized("access token required".into()))?;
    let player = player_service::verify(&state, token).await?;
    Ok(Json(PlayerEnvelope { player }))
}

#[utoipa::path(
    get,
    path = "/api/characters",
    tag = "players",
    responses((status = 200, description = "Every authored character"))
)]
/// Return every authored character.
pub async fn list_characters(
    State(state): State<SharedState>,
) -> Json<Vec<crate::dao::models::CharacterRecord>> {
    Json(player_service::characters(&state).await)
}

#[utoipa::path(
    post,
    path = "/api/characters",
    tag = "players",
    request_body = CharacterInput,
    responses(
        (status = 200, description = "Character created", body = CharacterEnvelope),
        (status = 400, description = "Invalid name")
    )
)]
/// Author a new character.
pub async fn create_character(
    State(state): State<SharedState>,
    Json(payload): Json<CharacterInput>,
) -> Result<Json<CharacterEnvelope>, AppError> {
    payload.validate()?;
    let character = player_service::create_character(&state, payload).await?;
    Ok(Json(CharacterEnvelope { character }))
}

#[utoipa::path(
    post,
    path = "/api/players/{id}/assign-character",
    tag = "players",
    params(("id" = Uuid, Path, description = "Player identifier")),
    request_body = AssignCharacterRequest,
    responses(
        (status = 200, description = "Character assigned", body = AckResponse),
        (status = 404, description = "Player or character not found")
    )
)]
/// Assign a character to a player, by reference.
pub async fn assign_character(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AssignCharacterRequest>,
) -> Result<Json<AckResponse>, AppError> {
    player_service::assign_character(&state, id, payload).await?;
    Ok(Json(AckResponse::ok()))
}

/// Extract the token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
