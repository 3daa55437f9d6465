//! Generic response envelope shared by every operation.
//!
//! Every service operation returns an `Envelope<T>`: one terminal status,
//! an optional payload, an optional flat list of error messages, and
//! optional paging metadata. The HTTP adapter maps the status to a
//! transport code (see the `stockroom-api` crate).

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::error::DomainError;
use crate::paging::PageInfo;

/// Protocol version stamped on every envelope.
pub const PROTOCOL_VERSION: &str = "1.1";

/// Closed outcome taxonomy.
///
/// Each variant carries a fixed numeric code which doubles as the transport
/// status code, so the status-to-transport mapping is total by construction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Status {
    Success,
    NoContent,
    BadRequest,
    Unauthenticated,
    Unauthorized,
    NotFound,
    AlreadyExist,
    InternalError,
}

impl Status {
    /// Numeric code; also the transport status code.
    pub fn code(&self) -> u16 {
        match self {
            Status::Success => 200,
            Status::NoContent => 204,
            Status::BadRequest => 400,
            Status::Unauthenticated => 401,
            Status::Unauthorized => 403,
            Status::NotFound => 404,
            Status::AlreadyExist => 409,
            Status::InternalError => 500,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Status::Success | Status::NoContent)
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.code())
    }
}

impl From<&DomainError> for Status {
    fn from(err: &DomainError) -> Self {
        match err {
            DomainError::Validation(_) | DomainError::Protected(_) => Status::BadRequest,
            DomainError::Unauthenticated(_) => Status::Unauthenticated,
            DomainError::NotFound(_) => Status::NotFound,
            DomainError::AlreadyExists(_) => Status::AlreadyExist,
            DomainError::Store(_) => Status::InternalError,
        }
    }
}

/// Uniform success/error/pagination wrapper.
///
/// # Invariants
/// - Exactly one terminal status is assigned before the envelope is returned.
/// - `data` is `None` whenever the status is not success-shaped.
/// - `error_messages` preserves insertion order on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub version: &'static str,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_messages: Option<Vec<String>>,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paging: Option<PageInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_message: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl<T> Envelope<T> {
    fn base(status: Status) -> Self {
        Self {
            version: PROTOCOL_VERSION,
            status,
            error_messages: None,
            data: None,
            paging: None,
            success_message: None,
            timestamp: Utc::now(),
        }
    }

    /// Successful outcome with a payload and no message.
    pub fn ok(data: T) -> Self {
        let mut envelope = Self::base(Status::Success);
        envelope.data = Some(data);
        envelope
    }

    /// Successful outcome with a payload and a human-readable message.
    pub fn success(data: T, message: impl Into<String>) -> Self {
        let mut envelope = Self::ok(data);
        envelope.success_message = Some(message.into());
        envelope
    }

    /// Successful page of results with paging metadata.
    pub fn paged(data: T, paging: PageInfo) -> Self {
        let mut envelope = Self::ok(data);
        envelope.paging = Some(paging);
        envelope
    }

    /// Completed with nothing to return.
    pub fn no_content() -> Self {
        Self::base(Status::NoContent)
    }

    /// Failed outcome with a single caller-facing message.
    pub fn failure(status: Status, message: impl Into<String>) -> Self {
        let mut envelope = Self::base(status);
        envelope.error_messages = Some(vec![message.into()]);
        envelope
    }

    /// Failed outcome with multiple ordered caller-facing messages.
    pub fn failures(status: Status, messages: Vec<String>) -> Self {
        let mut envelope = Self::base(status);
        envelope.error_messages = Some(messages);
        envelope
    }

    /// Render a domain rejection into an envelope.
    ///
    /// Store failures surface as `InternalError` with `internal_message`;
    /// the underlying detail is for logs only.
    pub fn from_domain_error(err: &DomainError, internal_message: &str) -> Self {
        match err {
            DomainError::Store(_) => Self::failure(Status::InternalError, internal_message),
            other => Self::failure(Status::from(other), other.to_string()),
        }
    }
}
