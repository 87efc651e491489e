//! Engine error taxonomy.
//!
//! Construction-time failures (bad configuration, unknown entity names,
//! degenerate physical parameters) are reported through [`EngineError`] and
//! abort whatever operation produced them. Failures raised by behaviors while
//! a tick is running are logged and skipped by the dispatcher instead.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A tunable is missing, malformed or outside its valid range.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A name was referenced that does not exist in the scene (or registry).
    #[error("lookup error: no entity or scene named '{0}'")]
    Lookup(String),

    /// Non-positive mass, negative size or non-finite numbers on an entity.
    #[error("numeric degeneracy on '{name}': {reason}")]
    NumericDegeneracy { name: String, reason: String },

    /// A behavior hook reported a failure.
    #[error("behavior '{behavior}' failed: {reason}")]
    Behavior { behavior: String, reason: String },
}

impl EngineError {
    pub fn config(msg: impl Into<String>) -> Self {
        EngineError::Configuration(msg.into())
    }

    pub fn lookup(name: impl Into<String>) -> Self {
        EngineError::Lookup(name.into())
    }

    pub fn degenerate(name: impl Into<String>, reason: impl Into<String>) -> Self {
        EngineError::NumericDegeneracy {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn behavior(behavior: impl Into<String>, reason: impl Into<String>) -> Self {
        EngineError::Behavior {
            behavior: behavior.into(),
            reason: reason.into(),
        }
    }
}
