//! HTTP handlers.
//!
//! Each handler resolves the caller through [`AuthUser`], makes exactly one
//! store call, and renders the result. Request bodies are optional (see
//! [`JsonBody`]) but must decode when present.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pokerforge_protocol::wire::{
    CreateGameRequest, CreateRoomRequest, GameDto, InviteCodeDto, JoinQuery, RegisterRequest,
    RegisterResponse, RoomDto, SendCardRequest, StateQuery, UserDto,
};
use pokerforge_protocol::{GameId, RoomCode};
use pokerforge_room::spawn_idle_watcher;

use crate::{AppState, AuthUser, JsonBody, PokerError, render};

type ApiResult<T> = Result<T, PokerError>;

pub(crate) async fn healthz() -> &'static str {
    "ok"
}

// =========================================================================
// Users
// =========================================================================

pub(crate) async fn register(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let (user, access_token) = state.users.register(&req.name)?;
    state.rooms.activity().record_user(&user.id);

    let response = RegisterResponse {
        user: UserDto {
            id: user.id,
            name: user.name,
        },
        access_token,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

// =========================================================================
// Rooms
// =========================================================================

pub(crate) async fn create_room(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    JsonBody(req): JsonBody<CreateRoomRequest>,
) -> ApiResult<(StatusCode, Json<RoomDto>)> {
    let room = state
        .rooms
        .create_room(&user, &req.name, req.invite_code_required)?;

    // Detached: the watcher exits by itself once the room is gone.
    spawn_idle_watcher(Arc::clone(&state.rooms), room.code.clone());

    Ok((StatusCode::CREATED, Json(render::room(&room))))
}

pub(crate) async fn get_room(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(room_id): Path<RoomCode>,
) -> ApiResult<Json<RoomDto>> {
    let room = state.rooms.get_room(&user.id, &room_id)?;
    Ok(Json(render::room(&room)))
}

pub(crate) async fn delete_room(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(room_id): Path<RoomCode>,
) -> ApiResult<StatusCode> {
    state.rooms.delete_room(&user.id, &room_id)?;
    Ok(StatusCode::OK)
}

pub(crate) async fn join_room(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(room_id): Path<RoomCode>,
    Query(query): Query<JoinQuery>,
) -> ApiResult<Json<RoomDto>> {
    let room = state.rooms.join_room(&user, &room_id, &query.invite_code)?;
    Ok(Json(render::room(&room)))
}

pub(crate) async fn create_invite_code(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(room_id): Path<RoomCode>,
) -> ApiResult<(StatusCode, Json<InviteCodeDto>)> {
    let invite = state.rooms.create_invite_code(&user.id, &room_id)?;
    Ok((StatusCode::CREATED, Json(InviteCodeDto { code: invite.code })))
}

/// Answers 304 with no body when the client's `commit` is still current.
pub(crate) async fn room_state(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(room_id): Path<RoomCode>,
    Query(query): Query<StateQuery>,
) -> ApiResult<Response> {
    let snapshot = state.rooms.room_state(&user.id, &room_id)?;
    if query.commit.as_ref() == Some(&snapshot.room.commit) {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }
    Ok(Json(render::room_state(&snapshot)).into_response())
}

// =========================================================================
// Games
// =========================================================================

pub(crate) async fn create_game(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    JsonBody(req): JsonBody<CreateGameRequest>,
) -> ApiResult<(StatusCode, Json<GameDto>)> {
    let room_id = RoomCode::from(req.room_id);
    let game = state.rooms.create_game(&user.id, &room_id, &req.name)?;
    Ok((StatusCode::CREATED, Json(render::game(&game))))
}

pub(crate) async fn complete_game(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(game_id): Path<GameId>,
) -> ApiResult<Json<GameDto>> {
    let game = state.rooms.complete_game(&user.id, &game_id)?;
    Ok(Json(render::game(&game)))
}

pub(crate) async fn reset_game(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(game_id): Path<GameId>,
) -> ApiResult<Json<GameDto>> {
    let game = state.rooms.reset_game(&user.id, &game_id)?;
    Ok(Json(render::game(&game)))
}

pub(crate) async fn send_card(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(game_id): Path<GameId>,
    JsonBody(req): JsonBody<SendCardRequest>,
) -> ApiResult<Json<GameDto>> {
    let game = state.rooms.submit_card(&user.id, &game_id, req.score)?;
    Ok(Json(render::game(&game)))
}

pub(crate) async fn drop_card(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(game_id): Path<GameId>,
) -> ApiResult<Json<GameDto>> {
    let game = state.rooms.withdraw_card(&user.id, &game_id)?;
    Ok(Json(render::game(&game)))
}
