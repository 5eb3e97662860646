/// Current-user endpoints
///
/// - `GET /api/users/me/societies` - Societies the caller created or joined

use axum::{extract::State, Json};
use societyhub_shared::{
    auth::middleware::AuthContext, models::society::Society, views::UserSocietyCard,
};

use crate::{app::AppState, error::ApiResult};

pub async fn my_societies(
    State(state): State<AppState>,
    auth: AuthContext,
) -> ApiResult<Json<Vec<UserSocietyCard>>> {
    let rows = Society::list_for_user(&state.db, auth.user_id).await?;

    Ok(Json(
        rows.iter()
            .map(|row| UserSocietyCard::new(row, auth.user_id))
            .collect(),
    ))
}
