//! HTTP gateway exposing a local SQLite database file.
//!
//! Three GET routes: a fixed greeting, a read-only `/query`, and a
//! read-write `/execute`. The `sql` parameter is forwarded to the store
//! verbatim; any failure comes back as HTTP 400 carrying the driver's
//! text.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod routes;
