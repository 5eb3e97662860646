/// Event endpoints
///
/// - `GET  /api/events` - Public event cards, soonest first
/// - `GET  /api/events/:id` - One event card (members-only events need a member)
/// - `POST /api/events/:id/rsvp` - RSVP with `{name, email, reason}`
///
/// Cards carry the viewer's RSVP state when a bearer token is sent.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use societyhub_shared::{
    auth::middleware::AuthContext,
    client::RsvpResponse,
    models::{
        event::{Event, EventWithSociety},
        membership::SocietyMember,
        participant::{CreateParticipant, Participant},
        society::Society,
    },
    views::EventCard,
};
use uuid::Uuid;
use validator::Validate;

use super::viewer_user;
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};

/// RSVP form
#[derive(Debug, Deserialize, Validate)]
pub struct RsvpForm {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(max = 1000, message = "Reason must be at most 1000 characters"))]
    pub reason: String,
}

fn card(row: &EventWithSociety, participants: &[Participant], viewer_email: Option<&str>) -> EventCard {
    EventCard::new(&row.event, row.society_name.as_deref(), participants, viewer_email)
}

async fn find_event(state: &AppState, id: Uuid) -> ApiResult<EventWithSociety> {
    Event::find_with_society(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))
}

/// Members-only events are visible to the hosting society's creator and
/// members. Public events pass through.
async fn require_event_access(
    state: &AppState,
    row: &EventWithSociety,
    auth: Option<AuthContext>,
) -> ApiResult<()> {
    if row.event.is_public {
        return Ok(());
    }

    let auth = auth.ok_or_else(|| ApiError::Unauthorized("Please log in first".to_string()))?;
    let society = Society::find_by_id(&state.db, row.event.society_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Society not found".to_string()))?;

    let allowed = society.is_admin(auth.user_id)
        || SocietyMember::is_member(&state.db, society.id, auth.user_id).await?;
    if !allowed {
        return Err(ApiError::Forbidden(
            "This event is only open to society members".to_string(),
        ));
    }

    Ok(())
}

/// List public events
pub async fn list_events(
    State(state): State<AppState>,
    auth: Option<AuthContext>,
) -> ApiResult<Json<Vec<EventCard>>> {
    let viewer = viewer_user(&state, auth).await?;
    let rows = Event::list_public(&state.db).await?;

    let ids: Vec<Uuid> = rows.iter().map(|r| r.event.id).collect();
    let participants = Participant::list_for_events(&state.db, &ids).await?;

    let email = viewer.as_ref().map(|u| u.email.as_str());
    Ok(Json(rows.iter().map(|r| card(r, &participants, email)).collect()))
}

/// Get one event
///
/// # Errors
///
/// - `401 Unauthorized`: Members-only event and no token
/// - `403 Forbidden`: Members-only event and caller is not a member
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    auth: Option<AuthContext>,
) -> ApiResult<Json<EventCard>> {
    let row = find_event(&state, id).await?;
    require_event_access(&state, &row, auth).await?;

    let viewer = viewer_user(&state, auth).await?;
    let participants = Participant::list_for_event(&state.db, id).await?;

    Ok(Json(card(
        &row,
        &participants,
        viewer.as_ref().map(|u| u.email.as_str()),
    )))
}

/// RSVP to an event
///
/// Public events accept anonymous RSVPs. Members-only events need a signed-in
/// member (or the creator) of the hosting society.
///
/// # Errors
///
/// - `401 Unauthorized`: Members-only event and no token
/// - `403 Forbidden`: Members-only event and caller is not a member
/// - `409 Conflict`: Email already RSVPed, or society deactivated
pub async fn rsvp(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    auth: Option<AuthContext>,
    Json(form): Json<RsvpForm>,
) -> ApiResult<(StatusCode, Json<RsvpResponse>)> {
    form.validate()?;

    let row = find_event(&state, id).await?;

    if row.society_deactivated {
        return Err(ApiError::Conflict(
            "This society is deactivated and not accepting RSVPs".to_string(),
        ));
    }

    require_event_access(&state, &row, auth).await?;

    let email = form.email.trim().to_string();
    let created = Participant::create(
        &state.db,
        CreateParticipant {
            event_id: id,
            email: email.clone(),
            user_id: auth.map(|a| a.user_id),
            name: form.name.trim().to_string(),
            reason: form.reason.trim().to_string(),
        },
    )
    .await?;

    if created.is_none() {
        return Err(ApiError::Conflict(
            "You have already RSVPed to this event".to_string(),
        ));
    }

    tracing::info!(event_id = %id, "RSVP recorded");

    let participants = Participant::list_for_event(&state.db, id).await?;
    Ok((
        StatusCode::CREATED,
        Json(RsvpResponse {
            message: "RSVP confirmed!".to_string(),
            event: card(&row, &participants, Some(&email)),
        }),
    ))
}
