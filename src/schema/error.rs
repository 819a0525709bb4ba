/// Why a schema fragment was refused.
///
/// The `Display` text is what the UI shows next to the offending field or
/// routes into a [`crate::NotificationLog`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{candidate} is not a defined property")]
    UnknownProperty { candidate: String },

    #[error("group '{group}' is already defined as an {existing} group")]
    DuplicateGroup { group: String, existing: GroupKind },

    #[error("groupBy key '{key}' of group '{group}' is not a defined property")]
    InvalidGroupby { group: String, key: String },

    #[error("group '{group}' is missing a value for {field}")]
    MissingField { group: String, field: &'static str },

    #[error("malformed schema document: {0}")]
    MalformedJson(String),
}

/// Which collection of the schema a group lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupKind {
    Edge,
    Entity,
}

impl std::fmt::Display for GroupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupKind::Edge => f.write_str("edge"),
            GroupKind::Entity => f.write_str("entity"),
        }
    }
}
