//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use sensorboard_adapter_render_plotters::RenderError;
use sensorboard_app::chart::series::UnknownMetric;

/// JSON error body returned by every endpoint.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Failures a handler can surface to the client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    UnknownMetric(#[from] UnknownMetric),

    #[error("failed to render chart")]
    Render(#[from] RenderError),

    #[error("failed to render page")]
    Template(#[from] askama::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UnknownMetric(_) => StatusCode::NOT_FOUND,
            Self::Render(err) => {
                tracing::error!(error = %err, "chart rendering failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Template(err) => {
                tracing::error!(error = %err, "template rendering failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
