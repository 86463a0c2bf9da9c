// SPDX-License-Identifier: Apache-2.0

//! Idempotency markers embedded in comment bodies.
//!
//! A marker is an HTML comment (`<!-- id: {key} -->`) appended to the message,
//! invisible in the rendered comment. Later runs locate their own comment by
//! searching for the marker instead of remembering the comment id.

/// Returns the marker token for `key`.
#[must_use]
pub fn marker(key: &str) -> String {
    format!("<!-- id: {key} -->")
}

/// Appends the marker for `key` to `message`.
#[must_use]
pub fn encode(message: &str, key: &str) -> String {
    format!("{message}\n{}\n", marker(key))
}

/// Returns `true` if `body` contains the marker for `key`.
///
/// Exact, case-sensitive substring match.
#[must_use]
pub fn matches(body: &str, key: &str) -> bool {
    body.contains(&marker(key))
}
