use crate::error::AppError;
use axum::extract::FromRequest;

/// JSON request body whose rejections answer with the usual `{"error": ...}` 400.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);
