//! Row records and the immutable snapshots the ledger publishes.
use std::{fmt, ops::Deref, sync::Arc};

use api_types::debt::DebtRow;
use rust_decimal::Decimal;

use crate::{EngineError, ResultEngine};

/// Durable identifier of a ledger row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct RowId(u64);

impl RowId {
    /// Id given to the first row appended to an empty ledger.
    pub const FIRST: RowId = RowId(1);

    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The id following this one, `None` on overflow.
    #[must_use]
    pub fn next(self) -> Option<RowId> {
        self.0.checked_add(1).map(RowId)
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RowId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// One debt entry of the ledger.
///
/// `min_payment_percentage` is a fraction: `0.0235` means 2.35%.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    pub id: RowId,
    pub creditor_name: String,
    pub first_name: String,
    pub last_name: String,
    pub min_payment_percentage: Decimal,
    /// `None` when the source did not know the balance.
    pub balance: Option<Decimal>,
}

impl Row {
    /// Builds a row from its wire shape, turning the whole-number percent
    /// into a fraction. Rejects the same ranges a draft may not hold.
    pub(crate) fn from_raw(raw: DebtRow) -> ResultEngine<Self> {
        let id = RowId(raw.id);
        let percent = raw.min_payment_percentage;
        if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
            return Err(EngineError::InvalidRow {
                id,
                reason: format!("minimum payment {percent}% is not between 0 and 100"),
            });
        }
        if let Some(balance) = raw.balance
            && balance < Decimal::ZERO
        {
            return Err(EngineError::InvalidRow {
                id,
                reason: format!("balance {balance} is negative"),
            });
        }

        Ok(Self {
            id,
            creditor_name: raw.creditor_name,
            first_name: raw.first_name,
            last_name: raw.last_name,
            min_payment_percentage: percent_to_fraction(percent),
            balance: raw.balance,
        })
    }
}

/// A validated draft, ready to be appended. Percent is still whole-number.
#[derive(Clone, Debug, PartialEq)]
pub struct NewRow {
    pub creditor_name: String,
    pub first_name: String,
    pub last_name: String,
    pub min_pay_percent: Decimal,
    pub balance: Decimal,
}

impl NewRow {
    pub(crate) fn into_row(self, id: RowId) -> Row {
        Row {
            id,
            creditor_name: self.creditor_name,
            first_name: self.first_name,
            last_name: self.last_name,
            min_payment_percentage: percent_to_fraction(self.min_pay_percent),
            balance: Some(self.balance),
        }
    }
}

/// Display tag attached to a row id, kept apart from the row data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Highlight {
    /// Row appended during this session.
    Added,
}

pub(crate) fn percent_to_fraction(percent: Decimal) -> Decimal {
    percent / Decimal::ONE_HUNDRED
}

/// Read-only view of the row sequence at one point in time.
///
/// Every ledger mutation publishes a new snapshot, so two snapshots can be
/// compared by reference with [`Snapshot::ptr_eq`] to detect a change.
#[derive(Clone, Debug, Default)]
pub struct Snapshot(Arc<[Row]>);

impl Snapshot {
    pub(crate) fn new(rows: Vec<Row>) -> Self {
        Self(rows.into())
    }

    /// Returns `true` if both snapshots are the same publication.
    #[must_use]
    pub fn ptr_eq(a: &Snapshot, b: &Snapshot) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    pub fn find(&self, id: RowId) -> Option<&Row> {
        self.0.iter().find(|row| row.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = RowId> + '_ {
        self.0.iter().map(|row| row.id)
    }
}

impl Deref for Snapshot {
    type Target = [Row];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
