//! Aggregation of validation failures from independent inputs.

use std::fmt;

const SEPARATOR: &str = ", ";

/// Ordered, mergeable collection of error strings.
///
/// Messages keep insertion order and duplicates. Nothing is trimmed or
/// validated; the log is a sink and has no failure modes of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationLog {
    messages: Vec<String>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message unconditionally. Empty strings are kept as-is.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    /// Append all of `other`'s messages after ours, in their order.
    pub fn concat(&mut self, other: &NotificationLog) {
        self.messages.extend(other.messages.iter().cloned());
    }

    /// All messages joined with `", "`; empty string when there are none.
    pub fn error_message(&self) -> String {
        self.messages.join(SEPARATOR)
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Collapse the log into the alert shown to the user.
    pub fn to_alert(&self, success: impl Into<String>) -> Alert {
        if self.is_empty() {
            Alert::Success(success.into())
        } else {
            Alert::Failure(self.error_message())
        }
    }
}

/// Outcome banner handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    Success(String),
    Failure(String),
}

impl Alert {
    pub fn message(&self) -> &str {
        match self {
            Alert::Success(m) | Alert::Failure(m) => m,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Alert::Failure(_))
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alert::Success(m) => write!(f, "OK: {}", m),
            Alert::Failure(m) => write!(f, "FAILED: {}", m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn log_of(msgs: &[&str]) -> NotificationLog {
        let mut log = NotificationLog::new();
        for m in msgs {
            log.add_error(*m);
        }
        log
    }

    #[test]
    fn fresh_log_is_empty() {
        let log = NotificationLog::new();
        assert!(log.is_empty());
        assert_eq!(log.error_message(), "");
    }

    #[test]
    fn messages_join_in_order() {
        let log = log_of(&["a", "b"]);
        assert!(!log.is_empty());
        assert_eq!(log.error_message(), "a, b");
    }

    #[test]
    fn empty_and_duplicate_messages_are_kept() {
        let log = log_of(&["", "x", "x"]);
        assert_eq!(log.len(), 3);
        assert_eq!(log.error_message(), ", x, x");
        assert!(!log_of(&[""]).is_empty());
    }

    #[test]
    fn concat_appends_and_leaves_argument_alone() {
        let mut a = log_of(&["a"]);
        let b = log_of(&["b1", "b2"]);
        a.concat(&b);
        assert_eq!(a.messages(), ["a", "b1", "b2"]);
        assert_eq!(b.messages(), ["b1", "b2"]);
    }

    #[test]
    fn concat_of_empty_logs_stays_empty() {
        let mut a = NotificationLog::new();
        a.concat(&NotificationLog::new());
        assert!(a.is_empty());
    }

    #[test]
    fn concat_groups_either_way() {
        let b = log_of(&["b"]);
        let c = log_of(&["c1", "c2"]);

        let mut left = log_of(&["a"]);
        left.concat(&b);
        left.concat(&c);

        let mut bc = b.clone();
        bc.concat(&c);
        let mut right = log_of(&["a"]);
        right.concat(&bc);

        assert_eq!(left, right);
        assert_eq!(b, log_of(&["b"]));
        assert_eq!(c, log_of(&["c1", "c2"]));
    }

    #[test]
    fn alert_reflects_log_state() {
        assert_eq!(
            NotificationLog::new().to_alert("saved"),
            Alert::Success("saved".to_string())
        );
        let alert = log_of(&["a", "b"]).to_alert("saved");
        assert!(alert.is_failure());
        assert_eq!(alert.message(), "a, b");
        assert_eq!(alert.to_string(), "FAILED: a, b");
    }
}
