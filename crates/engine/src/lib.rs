//! In-memory engine of the debt table.
//!
//! [`LedgerStore`] owns the rows, [`SelectionTracker`] follows what the user
//! has checked and keeps the balance total of the selection, [`RowEditor`]
//! stages a new row while it is typed. The rows come from a [`RowSource`] and
//! outcomes are reported through a [`Notifier`]; both are provided by the host.
pub use adapters::{LoadError, Notice, NoticeKind, Notifier, RowSource};
pub use editor::{Draft, DraftField, NumericInput, RowEditor};
pub use error::EngineError;
pub use format::{Column, format_currency, format_percent};
pub use ledger::LedgerStore;
pub use rows::{Highlight, NewRow, Row, RowId, Snapshot};
pub use selection::{SelectionSummary, SelectionTracker, aggregate};

mod adapters;
mod editor;
mod error;
mod format;
mod ledger;
mod rows;
mod selection;

type ResultEngine<T> = Result<T, EngineError>;
