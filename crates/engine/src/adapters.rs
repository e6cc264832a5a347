//! Seams to the collaborators the ledger does not own: where the rows come
//! from and who tells the user how an operation went.
use std::future::Future;

/// Failure reported by a [`RowSource`], carrying a message fit for the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadError {
    pub message: String,
}

impl LoadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// One-shot supplier of the initial rows.
///
/// `fetch` returns the serialized payload: a JSON array of
/// [`api_types::debt::DebtRow`] objects.
pub trait RowSource {
    fn fetch(&self) -> impl Future<Output = Result<String, LoadError>> + Send;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// An outcome to show to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Fire-and-forget sink for [`Notice`]s.
pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}

/// Records every notice, in order.
impl Notifier for Vec<Notice> {
    fn notify(&mut self, notice: Notice) {
        self.push(notice);
    }
}
