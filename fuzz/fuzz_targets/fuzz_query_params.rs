//! Fuzz target: query-string deserialization of `SqlParams`.
//!
//! Verifies that arbitrary byte sequences fed to the urlencoded parameter
//! parser never cause panics or UB.

#![no_main]

use dbrelay_gateway::routes::SqlParams;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Treat arbitrary bytes as a raw query string. Errors are expected;
    // panics are not.
    let _ = serde_urlencoded::from_bytes::<SqlParams>(data);
});
