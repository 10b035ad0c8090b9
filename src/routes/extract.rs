use axum::extract::{FromRequest, rejection::JsonRejection};
use axum_valid::HasValidate;

use crate::error::AppError;

/// JSON body extractor whose rejections render as [`AppError::BadRequest`].
///
/// Wrap it in [`axum_valid::Valid`] to run field validation after decoding.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl<T> HasValidate for AppJson<T> {
    type Validate = T;

    fn get_validate(&self) -> &T {
        &self.0
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
