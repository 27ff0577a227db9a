use axum::{
    extract::{Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::app::render_service::{self, RenderOptions};
use crate::app::source::SkinSource;
use crate::domain::skin::composite::RenderKind;
use crate::domain::skin::pipeline::{MAX_MARGIN, MAX_UPSCALE};
use crate::infrastructure::cache::disk::DiskCache;
use crate::shared::error::ApiError;

const MAX_PLAYER_NAME_LEN: usize = 16;
const MAX_SKIN_URL_LEN: usize = 128;
const MAX_SKIN_BASE64_LEN: usize = 16 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub client: reqwest::Client,
    pub cache: DiskCache,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderQuery {
    pub player_name: Option<String>,
    pub skin_url: Option<String>,
    pub skin_base64: Option<String>,
    pub slim: Option<bool>,
    pub overlay: Option<bool>,
    pub margin: Option<u32>,
    pub upscale: Option<u32>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(landing))
        .route("/skin/", get(skin))
        .route("/portrait/", get(portrait))
        .route("/face/", get(face))
        .with_state(state)
}

async fn landing() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}

async fn skin(
    State(state): State<AppState>,
    Query(query): Query<RenderQuery>,
) -> Result<Response, ApiError> {
    handle_render(state, RenderKind::Skin, query).await
}

async fn portrait(
    State(state): State<AppState>,
    Query(query): Query<RenderQuery>,
) -> Result<Response, ApiError> {
    handle_render(state, RenderKind::Portrait, query).await
}

async fn face(
    State(state): State<AppState>,
    Query(query): Query<RenderQuery>,
) -> Result<Response, ApiError> {
    handle_render(state, RenderKind::Face, query).await
}

async fn handle_render(
    state: AppState,
    kind: RenderKind,
    query: RenderQuery,
) -> Result<Response, ApiError> {
    validate_query(&query)?;

    let source = SkinSource::from_params(
        query.player_name.as_deref(),
        query.skin_url.as_deref(),
        query.skin_base64.as_deref(),
    )?;
    let options = RenderOptions {
        slim: query.slim,
        overlay: query.overlay.unwrap_or(true),
        margin: query.margin.unwrap_or(0),
        upscale: query.upscale.unwrap_or(1),
    };

    let png =
        render_service::render_to_png(&state.client, &state.cache, kind, source, options).await?;
    Ok(png_response(png))
}

fn validate_query(query: &RenderQuery) -> Result<(), ApiError> {
    if query
        .player_name
        .as_ref()
        .is_some_and(|v| v.chars().count() > MAX_PLAYER_NAME_LEN)
    {
        return Err(ApiError::InvalidArgument(format!(
            "player_name must be at most {MAX_PLAYER_NAME_LEN} characters"
        )));
    }
    if query
        .skin_url
        .as_ref()
        .is_some_and(|v| v.chars().count() > MAX_SKIN_URL_LEN)
    {
        return Err(ApiError::InvalidArgument(format!(
            "skin_url must be at most {MAX_SKIN_URL_LEN} characters"
        )));
    }
    if query
        .skin_base64
        .as_ref()
        .is_some_and(|v| v.chars().count() > MAX_SKIN_BASE64_LEN)
    {
        return Err(ApiError::InvalidArgument(format!(
            "skin_base64 must be at most {MAX_SKIN_BASE64_LEN} characters"
        )));
    }
    if query.margin.is_some_and(|v| v > MAX_MARGIN) {
        return Err(ApiError::InvalidArgument(format!(
            "margin must be between 0 and {MAX_MARGIN}"
        )));
    }
    if query.upscale.is_some_and(|v| v < 1 || v > MAX_UPSCALE) {
        return Err(ApiError::InvalidArgument(format!(
            "upscale must be between 1 and {MAX_UPSCALE}"
        )));
    }
    Ok(())
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::UnknownPlayer
            | ApiError::InvalidUrl
            | ApiError::InvalidSkinSize
            | ApiError::InvalidSkin
            | ApiError::MissingSource => StatusCode::NOT_FOUND,
            ApiError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            log::error!("request failed: {self}");
        }

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

fn png_response(bytes: Vec<u8>) -> Response {
    let mut response = Response::new(bytes.into());
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("image/png"));
    response
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use crate::shared::error::ApiError;

    #[test]
    fn taxonomy_errors_map_to_not_found() {
        for error in [
            ApiError::UnknownPlayer,
            ApiError::InvalidUrl,
            ApiError::InvalidSkinSize,
            ApiError::InvalidSkin,
            ApiError::MissingSource,
        ] {
            assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn argument_errors_map_to_bad_request() {
        let response = ApiError::InvalidArgument("margin".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn internal_errors_map_to_server_error() {
        let response = ApiError::Internal("disk".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
