//! Framework error type.
//!
//! Sub-crates define their own error enums and convert into or wrap
//! `CoreError` where a lookup failure needs to cross a crate boundary.

use thiserror::Error;

use crate::{AgentId, ContainerId};

/// The base error type shared by the `cl-*` crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("container {0} not found")]
    ContainerNotFound(ContainerId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `cl-core`.
pub type CoreResult<T> = Result<T, CoreError>;
