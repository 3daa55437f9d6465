use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use stockroom_core::{Envelope, Status};

/// Convert an envelope into a transport response.
///
/// `NoContent` becomes an empty 204; every other status becomes its numeric
/// code with the serialized envelope as body. Codes outside the valid HTTP
/// range fall back to 500, keeping the mapping total.
pub fn envelope_to_response<T: Serialize>(envelope: Envelope<T>) -> axum::response::Response {
    if envelope.status == Status::NoContent {
        return StatusCode::NO_CONTENT.into_response();
    }

    let code = StatusCode::from_u16(envelope.status.code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (code, axum::Json(envelope)).into_response()
}

/// Envelope-shaped rejection minted by the HTTP layer itself.
pub fn reject(status: Status, message: impl Into<String>) -> axum::response::Response {
    envelope_to_response::<()>(Envelope::failure(status, message))
}
