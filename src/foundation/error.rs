/// Convenience result type used across the converter.
pub type DeformResult<T> = Result<T, DeformError>;

/// Top-level error taxonomy used by conversion APIs.
#[derive(thiserror::Error, Debug)]
pub enum DeformError {
    /// Invalid scene constants or malformed rig data.
    #[error("validation error: {0}")]
    Validation(String),

    /// The host adapter could not answer a node or attribute query.
    #[error("host error: {0}")]
    Host(String),

    /// The selection expanded to zero curve segments.
    #[error("no selection: select one or more curve modules")]
    NoSelection,

    /// A segment's `localReferential` flag is neither the curve nor the envelope sentinel.
    #[error("unresolvable mode: node '{node}' has localReferential flag '{flag}'")]
    UnresolvableMode {
        /// Display name of the offending node.
        node: String,
        /// Raw flag text read from the host.
        flag: String,
    },

    /// No offset node was found walking upstream from a segment.
    #[error("missing offset anchor: no leading offset node upstream of '{node}'")]
    MissingOffsetAnchor {
        /// Display name of the segment being converted.
        node: String,
    },

    /// Errors when serializing or deserializing rig documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DeformError {
    /// Build a [`DeformError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DeformError::Host`] value.
    pub fn host(msg: impl Into<String>) -> Self {
        Self::Host(msg.into())
    }

    /// Build a [`DeformError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`DeformError::UnresolvableMode`] value.
    pub fn unresolvable_mode(node: impl Into<String>, flag: impl Into<String>) -> Self {
        Self::UnresolvableMode {
            node: node.into(),
            flag: flag.into(),
        }
    }

    /// Build a [`DeformError::MissingOffsetAnchor`] value.
    pub fn missing_offset_anchor(node: impl Into<String>) -> Self {
        Self::MissingOffsetAnchor { node: node.into() }
    }

    /// Whether this error only affects the segment it was raised for.
    ///
    /// Segment-local errors are logged and the batch moves on to the next segment.
    pub fn is_segment_local(&self) -> bool {
        matches!(
            self,
            Self::UnresolvableMode { .. } | Self::MissingOffsetAnchor { .. } | Self::Host(_)
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
