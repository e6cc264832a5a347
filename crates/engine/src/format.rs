//! Display columns of the debt table and the two numeric formats they use.
use rust_decimal::{Decimal, RoundingStrategy};

use crate::Row;

/// Table columns, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Column {
    Creditor,
    FirstName,
    LastName,
    MinPayPercent,
    Balance,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Column::Creditor,
        Column::FirstName,
        Column::LastName,
        Column::MinPayPercent,
        Column::Balance,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Creditor => "Creditor",
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::MinPayPercent => "Min Pay%",
            Self::Balance => "Balance",
        }
    }

    /// Numeric columns are right aligned by table renderers.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::MinPayPercent | Self::Balance)
    }

    /// Formatted cell text of `row` for this column.
    pub fn cell(self, row: &Row, currency_symbol: &str) -> String {
        match self {
            Self::Creditor => row.creditor_name.clone(),
            Self::FirstName => row.first_name.clone(),
            Self::LastName => row.last_name.clone(),
            Self::MinPayPercent => format_percent(row.min_payment_percentage),
            Self::Balance => row
                .balance
                .map(|balance| format_currency(balance, currency_symbol))
                .unwrap_or_default(),
        }
    }
}

/// Formats a fraction as a percent with two decimals: `0.0235` → `2.35%`.
pub fn format_percent(fraction: Decimal) -> String {
    let percent = round_cents(fraction * Decimal::ONE_HUNDRED);
    format!("{percent:.2}%")
}

/// Formats an amount with two decimals and thousands separators:
/// `1363` → `$1,363.00`.
pub fn format_currency(amount: Decimal, symbol: &str) -> String {
    let rounded = round_cents(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let plain = format!("{:.2}", rounded.abs());
    let (units, cents) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));
    format!("{sign}{symbol}{}.{cents}", group_thousands(units))
}

fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
