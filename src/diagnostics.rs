//! Shared message helpers.
//!
//! Library code never writes to stderr itself; warnings go through the `log`
//! facade and the binary decides where they end up.

const PREFIX: &str = "gaffer-schema";

/// Prefix a message the way every user-facing error of this crate reads.
pub fn error_message(msg: impl Into<String>) -> String {
    format!("{}: {}", PREFIX, msg.into())
}

/// Emit a warning about a rejected input.
pub fn warn(msg: impl Into<String>) {
    log::warn!("{}", msg.into());
}
