use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, Response, ResponseBuilder};
use serde::Serialize;

pub fn json_response<T: Serialize>(value: &T) -> ResultResp {
    let body = serde_json::to_string(value).map_err(|_| ServerError::InternalError)?;

    let resp = ResponseBuilder::new()
        .status(200)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap();

    Ok(resp)
}

/// Convert a ServerError into a JSON error envelope for the API routes.
pub fn json_error_response(err: ServerError) -> Response {
    let (status, message) = match err {
        ServerError::NotFound => (404, "Not Found".to_string()),
        ServerError::BadRequest(msg) => (400, msg),
        ServerError::DbError(msg) => (500, format!("Database Error: {msg}")),
        ServerError::InternalError => (500, "Internal Server Error".to_string()),
    };

    let body = serde_json::json!({ "success": false, "error": message }).to_string();

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap()
}
