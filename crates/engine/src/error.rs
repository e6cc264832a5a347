//! The module contains the errors the engine can return.
//!
//! The errors are:
//!
//! - [`AlreadyLoaded`] returned when the ledger is loaded a second time.
//! - [`Load`] returned when the row source reports a failure.
//! - [`Payload`] returned when the source payload is not a valid row list.
//! - [`DuplicateId`] returned when the payload repeats a row id.
//! - [`InvalidRow`] returned when a payload row is out of range.
//! - [`IdsExhausted`] returned when no id is left for a new row.
//! - [`InvalidDraft`] returned when a draft row cannot be committed.
//!
//!  [`AlreadyLoaded`]: EngineError::AlreadyLoaded
//!  [`Load`]: EngineError::Load
//!  [`Payload`]: EngineError::Payload
//!  [`DuplicateId`]: EngineError::DuplicateId
//!  [`InvalidRow`]: EngineError::InvalidRow
//!  [`IdsExhausted`]: EngineError::IdsExhausted
//!  [`InvalidDraft`]: EngineError::InvalidDraft
use thiserror::Error;

use crate::{DraftField, RowId};

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("ledger already loaded")]
    AlreadyLoaded,
    #[error("{0}")]
    Load(String),
    #[error("invalid payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("duplicate row id {0}")]
    DuplicateId(RowId),
    #[error("row {id}: {reason}")]
    InvalidRow { id: RowId, reason: String },
    #[error("no row id left after {}", u64::MAX)]
    IdsExhausted,
    #[error("invalid {field}: {reason}")]
    InvalidDraft { field: DraftField, reason: String },
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::AlreadyLoaded, Self::AlreadyLoaded) => true,
            (Self::Load(a), Self::Load(b)) => a == b,
            (Self::Payload(a), Self::Payload(b)) => a.to_string() == b.to_string(),
            (Self::DuplicateId(a), Self::DuplicateId(b)) => a == b,
            (
                Self::InvalidRow {
                    id: ia,
                    reason: ra,
                },
                Self::InvalidRow {
                    id: ib,
                    reason: rb,
                },
            ) => ia == ib && ra == rb,
            (Self::IdsExhausted, Self::IdsExhausted) => true,
            (
                Self::InvalidDraft {
                    field: fa,
                    reason: ra,
                },
                Self::InvalidDraft {
                    field: fb,
                    reason: rb,
                },
            ) => fa == fb && ra == rb,
            _ => false,
        }
    }
}
