/// Society endpoints
///
/// - `GET  /api/society` - Society cards
/// - `GET  /api/society/:id` - Detail page (viewer block when authenticated)
/// - `POST /api/society/:id/join` - Queue a join request
/// - `POST /api/society/:id/leave` - Leave, or withdraw a pending request
/// - `POST /api/society/:id/requests/:user_id/approve` - Creator approves a request
/// - `POST /api/society/:id/requests/:user_id/reject` - Creator rejects a request
/// - `POST /api/society/:id/activation-request` - Creator asks to reactivate
///
/// Every membership mutation answers `{message, society}` with the
/// server-confirmed detail so clients never patch membership locally.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use societyhub_shared::{
    auth::middleware::AuthContext,
    client::MembershipResponse,
    models::{
        event::Event,
        membership::{leave_society, CreateJoinRequest, JoinRequest, SocietyMember},
        participant::Participant,
        society::Society,
        user::User,
    },
    views::{SocietyCard, SocietyDetail, Viewer},
};
use uuid::Uuid;
use validator::Validate;

use super::{current_user, viewer_user};
use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
};

/// Join/leave form
#[derive(Debug, Deserialize, Validate)]
pub struct MembershipForm {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Required to join, optional to leave
    #[serde(default)]
    #[validate(length(max = 1000, message = "Reason must be at most 1000 characters"))]
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

async fn find_society(state: &AppState, id: Uuid) -> ApiResult<Society> {
    Society::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Society not found".to_string()))
}

/// Loads everything the detail page shows
async fn load_detail(state: &AppState, society: &Society, viewer: Option<&User>) -> ApiResult<SocietyDetail> {
    let members = SocietyMember::list_users(&state.db, society.id).await?;
    let requests = JoinRequest::list_for_society(&state.db, society.id).await?;
    let events = Event::list_for_society(&state.db, society.id).await?;

    let event_ids: Vec<Uuid> = events.iter().map(|e| e.id).collect();
    let participants = Participant::list_for_events(&state.db, &event_ids).await?;

    Ok(SocietyDetail::build(
        society,
        &members,
        &requests,
        &events,
        &participants,
        viewer.map(|u| Viewer {
            user_id: u.id,
            email: &u.email,
        }),
    ))
}

fn require_creator(society: &Society, auth: &AuthContext) -> ApiResult<()> {
    if society.is_admin(auth.user_id) {
        Ok(())
    } else {
        Err(ApiError::Forbidden(
            "Only the society's creator can do that".to_string(),
        ))
    }
}

/// List all societies as cards
pub async fn list_societies(State(state): State<AppState>) -> ApiResult<Json<Vec<SocietyCard>>> {
    let rows = Society::list_with_counts(&state.db).await?;
    Ok(Json(rows.iter().map(SocietyCard::from).collect()))
}

/// Society detail page
///
/// # Errors
///
/// - `404 Not Found`: Unknown society
pub async fn get_society(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    auth: Option<AuthContext>,
) -> ApiResult<Json<SocietyDetail>> {
    let society = find_society(&state, id).await?;
    let viewer = viewer_user(&state, auth).await?;

    Ok(Json(load_detail(&state, &society, viewer.as_ref()).await?))
}

/// Queue a join request
///
/// # Errors
///
/// - `409 Conflict`: Already a member, already pending, creator, or society deactivated
/// - `422 Unprocessable Entity`: Missing reason or invalid form
pub async fn join_society(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    auth: AuthContext,
    Json(form): Json<MembershipForm>,
) -> ApiResult<Json<MembershipResponse>> {
    form.validate()?;
    if form.reason.trim().is_empty() {
        return Err(ApiError::ValidationError(vec![ValidationErrorDetail {
            field: "reason".to_string(),
            message: "Please tell us why you want to join".to_string(),
        }]));
    }

    let user = current_user(&state, &auth).await?;
    let society = find_society(&state, id).await?;

    if society.deactivated {
        return Err(ApiError::Conflict("This society is deactivated".to_string()));
    }
    if society.is_admin(user.id) {
        return Err(ApiError::Conflict("You created this society".to_string()));
    }
    if SocietyMember::is_member(&state.db, id, user.id).await? {
        return Err(ApiError::Conflict(
            "You are already a member of this society".to_string(),
        ));
    }

    let created = JoinRequest::create(
        &state.db,
        CreateJoinRequest {
            society_id: id,
            user_id: user.id,
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            reason: form.reason.trim().to_string(),
        },
    )
    .await?;

    if created.is_none() {
        return Err(ApiError::Conflict(
            "Your join request is already pending".to_string(),
        ));
    }

    tracing::info!(society_id = %id, user_id = %user.id, "Join request queued");

    Ok(Json(MembershipResponse {
        message: "Join request sent!".to_string(),
        society: load_detail(&state, &society, Some(&user)).await?,
    }))
}

/// Leave a society (also withdraws a pending request)
///
/// # Errors
///
/// - `409 Conflict`: Neither a member nor pending
pub async fn leave(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    auth: AuthContext,
    Json(form): Json<MembershipForm>,
) -> ApiResult<Json<MembershipResponse>> {
    form.validate()?;

    let user = current_user(&state, &auth).await?;
    let society = find_society(&state, id).await?;

    if !leave_society(&state.db, id, user.id).await? {
        return Err(ApiError::Conflict(
            "You are not a member of this society".to_string(),
        ));
    }

    tracing::info!(society_id = %id, user_id = %user.id, "User left society");

    Ok(Json(MembershipResponse {
        message: "Left society.".to_string(),
        society: load_detail(&state, &society, Some(&user)).await?,
    }))
}

/// Approve a pending join request (creator only)
///
/// # Errors
///
/// - `404 Not Found`: No pending request for that user
/// - `409 Conflict`: Society deactivated
pub async fn approve_request(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(Uuid, Uuid)>,
    auth: AuthContext,
) -> ApiResult<Json<MembershipResponse>> {
    let society = find_society(&state, id).await?;
    require_creator(&society, &auth)?;

    if society.deactivated {
        return Err(ApiError::Conflict("This society is deactivated".to_string()));
    }

    if !JoinRequest::approve(&state.db, id, user_id).await? {
        return Err(ApiError::NotFound("No pending request for that user".to_string()));
    }

    tracing::info!(society_id = %id, user_id = %user_id, "Join request approved");

    let creator = current_user(&state, &auth).await?;
    Ok(Json(MembershipResponse {
        message: "Request approved.".to_string(),
        society: load_detail(&state, &society, Some(&creator)).await?,
    }))
}

/// Reject a pending join request (creator only)
pub async fn reject_request(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(Uuid, Uuid)>,
    auth: AuthContext,
) -> ApiResult<Json<MembershipResponse>> {
    let society = find_society(&state, id).await?;
    require_creator(&society, &auth)?;

    if !JoinRequest::delete(&state.db, id, user_id).await? {
        return Err(ApiError::NotFound("No pending request for that user".to_string()));
    }

    tracing::info!(society_id = %id, user_id = %user_id, "Join request rejected");

    let creator = current_user(&state, &auth).await?;
    Ok(Json(MembershipResponse {
        message: "Request rejected.".to_string(),
        society: load_detail(&state, &society, Some(&creator)).await?,
    }))
}

/// Ask for a deactivated society to be reactivated (creator only)
///
/// # Errors
///
/// - `403 Forbidden`: Caller did not create the society
/// - `409 Conflict`: Society is active
pub async fn request_activation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    auth: AuthContext,
) -> ApiResult<Json<MessageResponse>> {
    let society = find_society(&state, id).await?;
    require_creator(&society, &auth)?;

    Society::request_activation(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::Conflict("Society is already active".to_string()))?;

    tracing::info!(society_id = %id, "Activation requested");

    Ok(Json(MessageResponse {
        message: "Activation request sent!".to_string(),
    }))
}
