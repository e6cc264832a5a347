//! The ledger store: owner of the debt rows and of every change made to them.
//!
//! The store is filled once from a [`RowSource`] and afterwards changes only
//! through [`LedgerStore::append`] and [`LedgerStore::remove`]. Each change
//! publishes a fresh [`Snapshot`]; readers never see a sequence mutate under
//! them.
use std::collections::{HashMap, HashSet};

use api_types::debt::DebtRow;

use crate::{
    EngineError, Highlight, Notice, Notifier, ResultEngine, Row, RowEditor, RowId, RowSource,
    SelectionTracker, Snapshot,
};

const ERROR_TITLE: &str = "Something went wrong";
const SUCCESS_TITLE: &str = "Success";

#[derive(Debug, Default)]
pub struct LedgerStore {
    rows: Snapshot,
    highlights: HashMap<RowId, Highlight>,
    removed_count: usize,
    load_attempted: bool,
    loaded: bool,
}

impl LedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the initial rows from `source` and loads them.
    ///
    /// Any failure leaves the store empty for good and is reported to
    /// `notifier` with the source's own message.
    pub async fn load_from<S, N>(&mut self, source: &S, notifier: &mut N) -> ResultEngine<()>
    where
        S: RowSource,
        N: Notifier,
    {
        self.begin_load()?;

        let result = match source.fetch().await {
            Ok(payload) => self.load_payload(&payload),
            Err(err) => Err(EngineError::Load(err.message)),
        };

        if let Err(err) = &result {
            tracing::error!("failed to load ledger: {err}");
            notifier.notify(Notice::error(ERROR_TITLE, err.to_string()));
        }
        result
    }

    /// Loads the serialized rows, converting each whole-number percent into
    /// a fraction. Nothing is stored unless the whole payload is valid.
    ///
    /// The ledger gets a single load attempt: once one has been made,
    /// successful or not, later calls fail with [`EngineError::AlreadyLoaded`].
    pub fn load(&mut self, payload: &str) -> ResultEngine<()> {
        self.begin_load()?;
        self.load_payload(payload)
    }

    fn begin_load(&mut self) -> ResultEngine<()> {
        if self.load_attempted {
            tracing::warn!("ignoring second load of the ledger");
            return Err(EngineError::AlreadyLoaded);
        }
        self.load_attempted = true;
        Ok(())
    }

    fn load_payload(&mut self, payload: &str) -> ResultEngine<()> {
        let raw: Vec<DebtRow> = serde_json::from_str(payload)?;
        let mut seen = HashSet::with_capacity(raw.len());
        let mut rows = Vec::with_capacity(raw.len());
        for raw_row in raw {
            let row = Row::from_raw(raw_row)?;
            if !seen.insert(row.id) {
                return Err(EngineError::DuplicateId(row.id));
            }
            rows.push(row);
        }

        self.rows = Snapshot::new(rows);
        self.loaded = true;
        tracing::info!(rows = self.rows.len(), "ledger loaded");
        Ok(())
    }

    /// Commits the editor's draft as a new last row.
    ///
    /// On success the draft is cleared, the form closed and the new id
    /// returned. A failed commit is reported and leaves the draft as it is.
    pub fn append<N: Notifier>(
        &mut self,
        editor: &mut RowEditor,
        notifier: &mut N,
    ) -> ResultEngine<RowId> {
        let new_row = match editor.validate() {
            Ok(new_row) => new_row,
            Err(err) => {
                tracing::warn!("rejected draft: {err}");
                notifier.notify(Notice::error("Invalid debt", err.to_string()));
                return Err(err);
            }
        };

        let id = match self.next_id() {
            Ok(id) => id,
            Err(err) => {
                tracing::warn!("cannot add debt: {err}");
                notifier.notify(Notice::error(ERROR_TITLE, err.to_string()));
                return Err(err);
            }
        };
        let mut rows = self.rows.to_vec();
        rows.push(new_row.into_row(id));
        self.rows = Snapshot::new(rows);
        self.highlights.insert(id, Highlight::Added);

        editor.clear();
        editor.close();
        tracing::info!(%id, rows = self.rows.len(), "debt added");
        notifier.notify(Notice::success(SUCCESS_TITLE, "Debt added successfully"));
        Ok(id)
    }

    /// Removes every selected row and clears the selection.
    ///
    /// An empty selection does nothing and reports nothing. Returns the number
    /// of rows removed.
    pub fn remove<N: Notifier>(
        &mut self,
        selection: &mut SelectionTracker,
        notifier: &mut N,
    ) -> usize {
        if selection.is_empty() {
            return 0;
        }

        let selected = selection.ids().iter().copied().collect::<HashSet<_>>();
        let kept = self
            .rows
            .iter()
            .filter(|row| !selected.contains(&row.id))
            .cloned()
            .collect::<Vec<_>>();
        let removed = self.rows.len() - kept.len();

        self.highlights.retain(|id, _| !selected.contains(id));
        self.rows = Snapshot::new(kept);
        self.removed_count += removed;
        selection.clear();

        tracing::info!(removed, rows = self.rows.len(), "debts removed");
        notifier.notify(Notice::success(SUCCESS_TITLE, "Debt removed successfully"));
        removed
    }

    /// The id the next appended row will get: one past the highest live id,
    /// or [`RowId::FIRST`] on an empty ledger.
    pub fn next_id(&self) -> ResultEngine<RowId> {
        match self.rows.ids().max() {
            Some(max) => max.next().ok_or(EngineError::IdsExhausted),
            None => Ok(RowId::FIRST),
        }
    }

    /// Current snapshot of the rows, in insertion order.
    pub fn rows(&self) -> Snapshot {
        self.rows.clone()
    }

    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.rows.find(id)
    }

    pub fn highlight(&self, id: RowId) -> Option<Highlight> {
        self.highlights.get(&id).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total_row_count(&self) -> usize {
        self.rows.len()
    }

    /// Rows removed since the store was created.
    pub fn removed_count(&self) -> usize {
        self.removed_count
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}
