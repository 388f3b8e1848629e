use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{json, Map, Value};
use travelguide_core::error::CoreError;
use travelguide_core::types::DbId;

/// Error type returned by every handler.
///
/// Rendered as `{ "error": <message>, "code": <CODE> }`. Per-field
/// registration failures add `"fields": { <field>: [<message>, ...] }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        AppError::Core(CoreError::NotFound { entity, id })
    }
}

/// Status, machine-readable code and client-facing message of one error.
struct Rendered {
    status: StatusCode,
    code: &'static str,
    message: String,
    fields: Option<Value>,
}

impl Rendered {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            fields: None,
        }
    }

    /// 500 with the details kept in the log only.
    fn internal(detail: &dyn std::fmt::Display) -> Self {
        tracing::error!(error = %detail, "Request failed with internal error");
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "An internal error occurred",
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let rendered = match &self {
            AppError::Core(core) => render_core(core),
            AppError::Database(err) => render_sqlx(err),
            AppError::BadRequest(msg) => Rendered::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.as_str()),
            AppError::InternalError(msg) => Rendered::internal(msg),
        };

        let mut body = json!({ "error": rendered.message, "code": rendered.code });
        if let Some(fields) = rendered.fields {
            body["fields"] = fields;
        }
        (rendered.status, axum::Json(body)).into_response()
    }
}

fn render_core(err: &CoreError) -> Rendered {
    match err {
        CoreError::NotFound { entity, id } => Rendered::new(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => {
            Rendered::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.as_str())
        }
        CoreError::FieldErrors(errors) => {
            let fields: Map<String, Value> = errors
                .iter()
                .map(|(field, messages)| (field.clone(), json!(messages)))
                .collect();
            Rendered {
                fields: Some(Value::Object(fields)),
                ..Rendered::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.to_string())
            }
        }
        CoreError::Conflict(msg) => Rendered::new(StatusCode::CONFLICT, "CONFLICT", msg.as_str()),
        CoreError::Internal(msg) => Rendered::internal(msg),
    }
}

/// Map database failures onto client errors where the schema explains them.
///
/// | sqlx error                     | HTTP | code                |
/// |--------------------------------|------|---------------------|
/// | `RowNotFound`                  | 404  | `NOT_FOUND`         |
/// | `23505` on a `uq_*` constraint | 409  | `CONFLICT`          |
/// | `23503` foreign key            | 400  | `INVALID_REFERENCE` |
/// | `23514` check                  | 400  | `VALIDATION_ERROR`  |
/// | anything else                  | 500  | `INTERNAL_ERROR`    |
fn render_sqlx(err: &sqlx::Error) -> Rendered {
    let db_err = match err {
        sqlx::Error::RowNotFound => {
            return Rendered::new(StatusCode::NOT_FOUND, "NOT_FOUND", "Resource not found")
        }
        sqlx::Error::Database(db_err) => db_err,
        other => return Rendered::internal(other),
    };

    let constraint = db_err.constraint().unwrap_or("unknown");
    match db_err.code().as_deref() {
        Some("23505") if constraint.starts_with("uq_") => Rendered::new(
            StatusCode::CONFLICT,
            "CONFLICT",
            format!("Duplicate value violates unique constraint: {constraint}"),
        ),
        Some("23503") => Rendered::new(
            StatusCode::BAD_REQUEST,
            "INVALID_REFERENCE",
            format!("Referenced record does not exist: {constraint}"),
        ),
        Some("23514") => Rendered::new(
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            format!("Value violates check constraint: {constraint}"),
        ),
        _ => Rendered::internal(db_err),
    }
}
