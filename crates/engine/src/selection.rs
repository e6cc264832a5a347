//! Selected rows and the balance total computed over them.
use rust_decimal::{Decimal, RoundingStrategy};

use crate::{Row, RowId, Snapshot};

/// Count and balance total of a selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionSummary {
    pub checked_count: usize,
    /// Unrounded sum of the known, non-zero balances.
    pub total_balance: Decimal,
}

impl SelectionSummary {
    /// Total rounded to cents, half away from zero. Display only.
    #[must_use]
    pub fn rounded_total(&self) -> Decimal {
        self.total_balance
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

/// Recomputes the summary of `rows` from scratch.
///
/// Rows without a balance or with a zero balance are counted but add nothing
/// to the total. The total saturates at [`Decimal::MAX`].
pub fn aggregate<'a>(rows: impl IntoIterator<Item = &'a Row>) -> SelectionSummary {
    rows.into_iter()
        .fold(SelectionSummary::default(), |mut summary, row| {
            summary.checked_count += 1;
            if let Some(balance) = row.balance
                && !balance.is_zero()
            {
                summary.total_balance = summary.total_balance.saturating_add(balance);
            }
            summary
        })
}

/// Ids the user has checked in the table, in the order they were reported.
#[derive(Clone, Debug, Default)]
pub struct SelectionTracker {
    ids: Vec<RowId>,
    summary: SelectionSummary,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the selection with `rows`, as reported by the view.
    pub fn on_selection_changed(&mut self, rows: &[Row]) {
        let mut ids = Vec::with_capacity(rows.len());
        let mut unique = Vec::with_capacity(rows.len());
        for row in rows {
            if !ids.contains(&row.id) {
                ids.push(row.id);
                unique.push(row);
            }
        }

        self.summary = aggregate(unique);
        self.ids = ids;
        tracing::debug!(
            checked = self.summary.checked_count,
            total = %self.summary.total_balance,
            "selection changed"
        );
    }

    /// Checks or unchecks `id`, then re-reads the selected rows from `rows`.
    pub fn toggle(&mut self, id: RowId, rows: &Snapshot) {
        let mut ids = self.ids.clone();
        match ids.iter().position(|selected| *selected == id) {
            Some(index) => {
                ids.remove(index);
            }
            None => ids.push(id),
        }
        self.select_ids(&ids, rows);
    }

    /// Selects every row, or clears the selection when all rows are selected.
    pub fn toggle_all(&mut self, rows: &Snapshot) {
        if !rows.is_empty() && rows.ids().all(|id| self.contains(id)) {
            self.clear();
        } else {
            self.on_selection_changed(rows);
        }
    }

    pub fn clear(&mut self) {
        self.on_selection_changed(&[]);
    }

    pub fn ids(&self) -> &[RowId] {
        &self.ids
    }

    pub fn contains(&self, id: RowId) -> bool {
        self.ids.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn summary(&self) -> SelectionSummary {
        self.summary
    }

    fn select_ids(&mut self, ids: &[RowId], rows: &Snapshot) {
        let selected = ids
            .iter()
            .filter_map(|id| rows.find(*id).cloned())
            .collect::<Vec<_>>();
        self.on_selection_changed(&selected);
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn row(id: u64, balance: Option<Decimal>) -> Row {
        Row {
            id: RowId::new(id),
            creditor_name: "CBNA".to_string(),
            first_name: "Suman".to_string(),
            last_name: "Tester79".to_string(),
            min_payment_percentage: dec!(0.02),
            balance,
        }
    }

    #[test]
    fn zero_and_missing_balances_count_but_do_not_sum() {
        let rows = [
            row(1, Some(dec!(100))),
            row(2, Some(dec!(0))),
            row(3, None),
            row(4, Some(dec!(50))),
        ];

        let summary = aggregate(&rows);

        assert_eq!(summary.checked_count, 4);
        assert_eq!(summary.total_balance, dec!(150));
        assert_eq!(summary.rounded_total(), dec!(150.00));
    }

    #[test]
    fn rounded_total_rounds_half_away_from_zero() {
        let summary = aggregate(&[row(1, Some(dec!(10.005))), row(2, Some(dec!(0.001)))]);

        assert_eq!(summary.total_balance, dec!(10.006));
        assert_eq!(summary.rounded_total(), dec!(10.01));
        assert_eq!(
            aggregate(&[row(1, Some(dec!(0.125)))]).rounded_total(),
            dec!(0.13)
        );
    }

    #[test]
    fn huge_balances_saturate_instead_of_overflowing() {
        let huge = Decimal::from_str_exact("50000000000000000000000000000").unwrap();
        let mut tracker = SelectionTracker::new();

        tracker.on_selection_changed(&[row(1, Some(huge)), row(2, Some(huge))]);

        assert_eq!(tracker.summary().checked_count, 2);
        assert_eq!(tracker.summary().total_balance, Decimal::MAX);
        assert_eq!(tracker.summary().rounded_total(), Decimal::MAX);
    }

    #[test]
    fn selection_change_replaces_previous_total() {
        let mut tracker = SelectionTracker::new();
        tracker.on_selection_changed(&[row(1, Some(dec!(100))), row(2, Some(dec!(20)))]);
        tracker.on_selection_changed(&[row(2, Some(dec!(20)))]);

        assert_eq!(tracker.ids(), &[RowId::new(2)]);
        assert_eq!(tracker.summary().checked_count, 1);
        assert_eq!(tracker.summary().total_balance, dec!(20));
    }

    #[test]
    fn repeated_rows_are_selected_once() {
        let mut tracker = SelectionTracker::new();
        let first = row(1, Some(dec!(5)));
        tracker.on_selection_changed(&[first.clone(), first]);

        assert_eq!(tracker.ids().len(), 1);
        assert_eq!(tracker.summary().total_balance, dec!(5));
    }

    #[test]
    fn toggle_flips_a_single_id() {
        let rows = Snapshot::new(vec![row(1, Some(dec!(100))), row(2, Some(dec!(200)))]);
        let mut tracker = SelectionTracker::new();

        tracker.toggle(RowId::new(2), &rows);
        tracker.toggle(RowId::new(1), &rows);
        assert_eq!(tracker.ids(), &[RowId::new(2), RowId::new(1)]);
        assert_eq!(tracker.summary().total_balance, dec!(300));

        tracker.toggle(RowId::new(2), &rows);
        assert_eq!(tracker.ids(), &[RowId::new(1)]);
        assert_eq!(tracker.summary().total_balance, dec!(100));
    }

    #[test]
    fn toggle_all_selects_then_clears() {
        let rows = Snapshot::new(vec![row(1, Some(dec!(1))), row(2, None)]);
        let mut tracker = SelectionTracker::new();

        tracker.toggle_all(&rows);
        assert_eq!(tracker.summary().checked_count, 2);

        tracker.toggle_all(&rows);
        assert!(tracker.is_empty());
        assert_eq!(tracker.summary(), SelectionSummary::default());
    }
}
