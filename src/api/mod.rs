//! HTTP handlers for the newsdesk.
//!
//! Public reading and community voting live beside the admin desk. Every
//! reply, success or failure, carries the store revision it was computed at.

mod admin;
mod articles;
mod community;

pub use admin::*;
pub use articles::*;
pub use community::*;

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::errors::{AppError, AppErrorWithRevision};

/// `{success: true, data, revisionId}` body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    pub revision_id: i64,
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Handler return type; errors render through [`AppErrorWithRevision`].
pub type ApiResult<T> = Result<ApiResponse<T>, AppErrorWithRevision>;

pub fn success<T: Serialize>(data: T, revision_id: i64) -> ApiResult<T> {
    Ok(ApiResponse {
        success: true,
        data,
        revision_id,
    })
}

pub fn error<T: Serialize>(error: AppError, revision_id: i64) -> ApiResult<T> {
    Err(AppErrorWithRevision { error, revision_id })
}
