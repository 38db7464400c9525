//! Service error types with HTTP status code mapping.
//!
//! [`SlotError`] is the single error type for the service. Each variant
//! belongs to exactly one [`ErrorKind`], carries a stable numeric code, and
//! maps to an HTTP status and structured JSON error response.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{EventId, SlotStatus, SlotTrigger, SwapRequestId, SwapStatus};

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1003,
///     "kind": "validation",
///     "message": "event ... is BUSY, not SWAPPABLE"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code, kind, and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Stable numeric error code.
    pub code: u32,
    /// Machine-readable error category.
    pub kind: ErrorKind,
    /// Human-readable error message.
    pub message: String,
}

/// Error category; callers branch on this rather than on messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed input or an illegal state transition.
    Validation,
    /// A referenced record does not exist.
    NotFound,
    /// The caller is not the owner or participant the operation requires.
    Authorization,
    /// A concurrent write invalidated a precondition.
    Conflict,
    /// The store or journal failed.
    Infrastructure,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Kind           | HTTP Status                 |
/// |-----------|----------------|-----------------------------|
/// | 1000–1999 | Validation     | 400 Bad Request             |
/// | 2000–2999 | Not Found      | 404 Not Found               |
/// | 3000–3999 | Authorization  | 401 Unauthorized / 403      |
/// | 4000–4999 | Conflict       | 409 Conflict                |
/// | 5000–5999 | Infrastructure | 500 / 503                   |
#[derive(Debug, thiserror::Error)]
pub enum SlotError {
    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A required field was missing or blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Event interval is empty or inverted.
    #[error("start time {start} must be before end time {end}")]
    InvalidTimeRange {
        /// Requested start.
        start: DateTime<Utc>,
        /// Requested end.
        end: DateTime<Utc>,
    },

    /// An event involved in a proposal is not on the market.
    #[error("event {event_id} is {status}, not SWAPPABLE")]
    SlotNotSwappable {
        /// The offending event.
        event_id: EventId,
        /// Its current status.
        status: SlotStatus,
    },

    /// The requester targeted one of their own events.
    #[error("cannot swap with yourself")]
    SelfSwap,

    /// The swap request is no longer pending.
    #[error("swap request {request_id} was already responded to ({status})")]
    AlreadyResponded {
        /// The request.
        request_id: SwapRequestId,
        /// Its terminal status.
        status: SwapStatus,
    },

    /// The slot transition table has no edge for this pair.
    #[error("illegal slot transition: {trigger} from {from}")]
    IllegalTransition {
        /// Status the slot is in.
        from: SlotStatus,
        /// Trigger that was attempted.
        trigger: SlotTrigger,
    },

    /// The event is locked into an in-flight swap request.
    #[error("event {0} is engaged in a pending swap")]
    SlotEngaged(EventId),

    /// Event with the given ID was not found.
    #[error("event not found: {0}")]
    EventNotFound(EventId),

    /// Swap request with the given ID was not found.
    #[error("swap request not found: {0}")]
    SwapRequestNotFound(SwapRequestId),

    /// An event referenced by a swap request no longer exists.
    #[error("event {event_id} referenced by swap request {request_id} no longer exists")]
    ReferencedEventMissing {
        /// The request.
        request_id: SwapRequestId,
        /// The missing event.
        event_id: EventId,
    },

    /// User profile with the given ID was not found.
    #[error("user not found: {0}")]
    UserNotFound(crate::domain::UserId),

    /// No verified user identity accompanied the call.
    #[error("missing or malformed user identity")]
    Unauthenticated,

    /// A WebSocket client asserted an identity other than the verified one.
    #[error("connection is verified as {verified}, cannot identify as {asserted}")]
    IdentityMismatch {
        /// Identity carried by the upgrade request.
        verified: crate::domain::UserId,
        /// Identity the client asked for.
        asserted: crate::domain::UserId,
    },

    /// Caller does not own the event.
    #[error("event {0} is not owned by you")]
    NotEventOwner(EventId),

    /// Caller is not the receiver of the swap request.
    #[error("not authorized to respond to swap request {0}")]
    NotSwapReceiver(SwapRequestId),

    /// Compare-and-set on an event's version failed.
    #[error("event {event_id} changed concurrently (expected version {expected}, found {actual})")]
    VersionConflict {
        /// The event.
        event_id: EventId,
        /// Version the caller saw.
        expected: u64,
        /// Version currently stored.
        actual: u64,
    },

    /// A profile with this email is already registered.
    #[error("email already registered: {0}")]
    EmailTaken(String),

    /// The store could not start a unit of work in time.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// Journal persistence failure.
    #[error("persistence error: {0}")]
    PersistenceError(String),

    /// The notification journal is not configured.
    #[error("notification journal is disabled")]
    PersistenceDisabled,

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SlotError {
    /// Returns the category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidRequest(_)
            | Self::MissingField(_)
            | Self::InvalidTimeRange { .. }
            | Self::SlotNotSwappable { .. }
            | Self::SelfSwap
            | Self::AlreadyResponded { .. }
            | Self::IllegalTransition { .. }
            | Self::SlotEngaged(_) => ErrorKind::Validation,
            Self::EventNotFound(_)
            | Self::SwapRequestNotFound(_)
            | Self::ReferencedEventMissing { .. }
            | Self::UserNotFound(_) => ErrorKind::NotFound,
            Self::Unauthenticated
            | Self::IdentityMismatch { .. }
            | Self::NotEventOwner(_)
            | Self::NotSwapReceiver(_) => ErrorKind::Authorization,
            Self::VersionConflict { .. } | Self::EmailTaken(_) => ErrorKind::Conflict,
            Self::StoreUnavailable(_)
            | Self::PersistenceError(_)
            | Self::PersistenceDisabled
            | Self::Internal(_) => ErrorKind::Infrastructure,
        }
    }

    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1000,
            Self::MissingField(_) => 1001,
            Self::InvalidTimeRange { .. } => 1002,
            Self::SlotNotSwappable { .. } => 1003,
            Self::SelfSwap => 1004,
            Self::AlreadyResponded { .. } => 1005,
            Self::IllegalTransition { .. } => 1006,
            Self::SlotEngaged(_) => 1007,
            Self::EventNotFound(_) => 2001,
            Self::SwapRequestNotFound(_) => 2002,
            Self::ReferencedEventMissing { .. } => 2003,
            Self::UserNotFound(_) => 2004,
            Self::Unauthenticated => 3001,
            Self::NotEventOwner(_) => 3002,
            Self::NotSwapReceiver(_) => 3003,
            Self::IdentityMismatch { .. } => 3004,
            Self::VersionConflict { .. } => 4001,
            Self::EmailTaken(_) => 4002,
            Self::Internal(_) => 5000,
            Self::StoreUnavailable(_) => 5001,
            Self::PersistenceError(_) => 5002,
            Self::PersistenceDisabled => 5003,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::StoreUnavailable(_) | Self::PersistenceDisabled => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            _ => match self.kind() {
                ErrorKind::Validation => StatusCode::BAD_REQUEST,
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Authorization => StatusCode::FORBIDDEN,
                ErrorKind::Conflict => StatusCode::CONFLICT,
                ErrorKind::Infrastructure => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for SlotError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                kind: self.kind(),
                message: self.to_string(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

impl From<JsonRejection> for SlotError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for SlotError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for SlotError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}
