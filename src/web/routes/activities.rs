use axum::{
    async_trait,
    extract::{rejection::PathRejection, FromRequestParts, Path, Query, State},
    http::request::Parts,
    Json,
};
use indexmap::IndexMap;
use serde::Serialize;

use crate::database::ActivityDirectory;
use crate::models::Activity;
use crate::services::activities_service;
use crate::web::error::ApiError;

/// The `email` query parameter. When it is repeated the last value wins;
/// only a query with no `email` at all is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantEmail(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for ParticipantEmail
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)?;
        pairs
            .into_iter()
            .rev()
            .find_map(|(key, value)| (key == "email").then_some(value))
            .map(ParticipantEmail)
            .ok_or_else(|| ApiError::Validation("Missing required query parameter: email".into()))
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub async fn activities_handler(
    State(directory): State<ActivityDirectory>,
) -> Json<IndexMap<String, Activity>> {
    Json(activities_service::list_activities(&directory))
}

pub async fn signup_handler(
    State(directory): State<ActivityDirectory>,
    activity_name: Result<Path<String>, PathRejection>,
    ParticipantEmail(email): ParticipantEmail,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(activity_name) = activity_name?;
    let message = activities_service::signup(&directory, &activity_name, &email)?;
    Ok(Json(MessageResponse { message }))
}

pub async fn unregister_handler(
    State(directory): State<ActivityDirectory>,
    activity_name: Result<Path<String>, PathRejection>,
    ParticipantEmail(email): ParticipantEmail,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(activity_name) = activity_name?;
    let message = activities_service::unregister(&directory, &activity_name, &email)?;
    Ok(Json(MessageResponse { message }))
}
