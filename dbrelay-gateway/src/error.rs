//! Error types for the gateway crate.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use dbrelay_store::StoreError;

/// Errors that can occur during gateway request handling.
///
/// Exactly two user-visible outcomes exist and both map to HTTP 400 with a
/// plain text body. Driver failures are not split into client and server
/// classes; a locked file surfaces the same way as bad syntax.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// The request carried no `sql` query parameter.
    #[error("\"sql\" query parameter is required.")]
    MissingSql,

    /// The statement failed in the store; the message is the driver's own.
    #[error("{0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let body = match &self {
            GatewayError::MissingSql => self.to_string(),
            // Driver text carries a trailing newline.
            GatewayError::Store(_) => format!("{self}\n"),
        };
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_variants_map_to_400() {
        let resp = GatewayError::MissingSql.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let store_err = StoreError::from(sqlx::Error::RowNotFound);
        let resp = GatewayError::Store(store_err).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_sql_body_is_the_fixed_text_without_newline() {
        let resp = GatewayError::MissingSql.into_response();
        let bytes = match axum::body::to_bytes(resp.into_body(), 1024).await {
            Ok(b) => b,
            Err(e) => panic!("failed to read body: {e}"),
        };
        assert_eq!(&bytes[..], b"\"sql\" query parameter is required.");
    }

    #[tokio::test]
    async fn store_error_body_ends_with_newline() {
        let store_err = StoreError::from(sqlx::Error::RowNotFound);
        let resp = GatewayError::Store(store_err).into_response();
        let bytes = match axum::body::to_bytes(resp.into_body(), 1024).await {
            Ok(b) => b,
            Err(e) => panic!("failed to read body: {e}"),
        };
        let text = String::from_utf8_lossy(&bytes);
        assert!(
            text.ends_with('\n'),
            "driver text must end with a newline, got {text:?}"
        );
        assert!(text.len() > 1, "body must carry the driver text, got {text:?}");
    }
}
