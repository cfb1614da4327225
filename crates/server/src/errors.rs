use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use tracing::error;

/// Error rendered as `{"status": <code>, "error": <title>, "message": <detail>}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: &'static str,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &'static str, detail: Option<String>) -> Self {
        Self { status, title, detail }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Bad Request", Some(detail.into()))
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found", Some(detail.into()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "status": self.status.as_u16(),
            "error": self.title,
            "message": self.detail,
        });
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        if e.is_validation() {
            JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.to_string()))
        } else if e.is_not_found() {
            JsonApiError::not_found(e.to_string())
        } else {
            error!(err = %e, "item store failure");
            JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", Some(e.to_string()))
        }
    }
}

// Extractor rejections all surface as 400 with the same JSON shape.
impl From<JsonRejection> for JsonApiError {
    fn from(e: JsonRejection) -> Self { Self::bad_request(e.body_text()) }
}

impl From<PathRejection> for JsonApiError {
    fn from(e: PathRejection) -> Self { Self::bad_request(e.body_text()) }
}

impl From<QueryRejection> for JsonApiError {
    fn from(e: QueryRejection) -> Self { Self::bad_request(e.body_text()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::errors::ModelError;

    #[test]
    fn maps_service_errors_to_status() {
        let v: JsonApiError = ServiceError::from(ModelError::Validation("name required".into())).into();
        assert_eq!(v.status, StatusCode::BAD_REQUEST);
        let n: JsonApiError = ServiceError::item_not_found(3).into();
        assert_eq!(n.status, StatusCode::NOT_FOUND);
        let d: JsonApiError = ServiceError::Db("connection refused".into()).into();
        assert_eq!(d.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
