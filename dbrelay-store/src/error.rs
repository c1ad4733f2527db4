//! Error types for the store crate.

/// Errors that can occur while opening a connection or running a statement.
///
/// The gateway forwards the display form verbatim to clients, so it stays
/// as close to SQLite's own wording as possible.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    /// Any failure reported by the driver: open, prepare, step, or decode.
    /// Client mistakes (bad syntax) and server-state failures (locked or
    /// missing file) are not distinguished.
    #[error("{}", driver_text(.0))]
    Sqlite(#[from] sqlx::Error),
}

/// The message SQLite itself produced, when there is one.
fn driver_text(error: &sqlx::Error) -> String {
    match error.as_database_error() {
        Some(db) => db.message().to_owned(),
        None => error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_fall_back_to_sqlx_display() {
        let err = StoreError::from(sqlx::Error::RowNotFound);
        let msg = err.to_string();
        assert!(!msg.is_empty(), "display must not be empty");
        assert_eq!(msg, sqlx::Error::RowNotFound.to_string());
    }
}
