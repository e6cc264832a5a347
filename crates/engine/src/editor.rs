//! Staging area for a debt row being typed into the add form.
//!
//! The editor mirrors the modal form: every field change lands here, the
//! numeric fields are parsed as soon as they are typed, and the whole draft is
//! validated only when the ledger commits it (see [`LedgerStore::append`]).
//!
//! Opening the form never resets the draft and cancelling never clears it, so
//! a cancelled draft shows up again on the next open.
//!
//! [`LedgerStore::append`]: crate::LedgerStore::append
use std::{fmt, str::FromStr};

use rust_decimal::Decimal;

use crate::{EngineError, NewRow, ResultEngine};

/// Fields of the add form, in tab order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DraftField {
    Creditor,
    FirstName,
    LastName,
    MinPayPercent,
    Balance,
}

impl DraftField {
    pub const ALL: [DraftField; 5] = [
        DraftField::Creditor,
        DraftField::FirstName,
        DraftField::LastName,
        DraftField::MinPayPercent,
        DraftField::Balance,
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

    /// The field after this one, wrapping around.
    pub fn next(self) -> DraftField {
        match self {
            Self::Creditor => Self::FirstName,
            Self::FirstName => Self::LastName,
            Self::LastName => Self::MinPayPercent,
            Self::MinPayPercent => Self::Balance,
            Self::Balance => Self::Creditor,
        }
    }

    /// The field before this one, wrapping around.
    pub fn prev(self) -> DraftField {
        match self {
            Self::Creditor => Self::Balance,
            Self::FirstName => Self::Creditor,
            Self::LastName => Self::FirstName,
            Self::MinPayPercent => Self::LastName,
            Self::Balance => Self::MinPayPercent,
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw text of a numeric field plus the value parsed from it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NumericInput {
    raw: String,
    value: Option<Decimal>,
}

impl NumericInput {
    /// Parses `raw`, accepting `.` or `,` as decimal separator.
    pub fn parse(raw: &str) -> Self {
        let value = Decimal::from_str(&raw.trim().replace(',', ".")).ok();
        Self {
            raw: raw.to_string(),
            value,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// `None` when the text is empty or not a number.
    pub fn value(&self) -> Option<Decimal> {
        self.value
    }

    pub fn is_empty(&self) -> bool {
        self.raw.trim().is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Draft {
    pub creditor: String,
    pub first_name: String,
    pub last_name: String,
    pub min_pay_percent: NumericInput,
    pub balance: NumericInput,
}

#[derive(Debug, Default)]
pub struct RowEditor {
    draft: Draft,
    open: bool,
}

impl RowEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn clear(&mut self) {
        self.draft = Draft::default();
    }

    pub fn set_creditor(&mut self, value: &str) {
        self.draft.creditor = value.to_string();
    }

    pub fn set_first_name(&mut self, value: &str) {
        self.draft.first_name = value.to_string();
    }

    pub fn set_last_name(&mut self, value: &str) {
        self.draft.last_name = value.to_string();
    }

    pub fn set_min_pay_percent(&mut self, value: &str) {
        self.draft.min_pay_percent = NumericInput::parse(value);
    }

    pub fn set_balance(&mut self, value: &str) {
        self.draft.balance = NumericInput::parse(value);
    }

    pub fn set(&mut self, field: DraftField, value: &str) {
        match field {
            DraftField::Creditor => self.set_creditor(value),
            DraftField::FirstName => self.set_first_name(value),
            DraftField::LastName => self.set_last_name(value),
            DraftField::MinPayPercent => self.set_min_pay_percent(value),
            DraftField::Balance => self.set_balance(value),
        }
    }

    /// Current text of `field`, as typed.
    pub fn field_text(&self, field: DraftField) -> &str {
        match field {
            DraftField::Creditor => &self.draft.creditor,
            DraftField::FirstName => &self.draft.first_name,
            DraftField::LastName => &self.draft.last_name,
            DraftField::MinPayPercent => self.draft.min_pay_percent.raw(),
            DraftField::Balance => self.draft.balance.raw(),
        }
    }

    /// Checks the numeric fields and builds the row to append.
    ///
    /// Text fields are taken as they are. The percentage must be a number in
    /// `0..=100` and the balance a number `>= 0`.
    pub fn validate(&self) -> ResultEngine<NewRow> {
        let percent = numeric(DraftField::MinPayPercent, &self.draft.min_pay_percent)?;
        if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
            return Err(invalid(
                DraftField::MinPayPercent,
                "must be between 0 and 100",
            ));
        }

        let balance = numeric(DraftField::Balance, &self.draft.balance)?;
        if balance < Decimal::ZERO {
            return Err(invalid(DraftField::Balance, "must not be negative"));
        }

        Ok(NewRow {
            creditor_name: self.draft.creditor.clone(),
            first_name: self.draft.first_name.clone(),
            last_name: self.draft.last_name.clone(),
            min_pay_percent: percent,
            balance,
        })
    }
}

fn numeric(field: DraftField, input: &NumericInput) -> ResultEngine<Decimal> {
    if input.is_empty() {
        return Err(invalid(field, "is required"));
    }
    input
        .value()
        .ok_or_else(|| invalid(field, &format!("\"{}\" is not a number", input.raw().trim())))
}

fn invalid(field: DraftField, reason: &str) -> EngineError {
    EngineError::InvalidDraft {
        field,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn filled() -> RowEditor {
        let mut editor = RowEditor::new();
        editor.set_creditor("CBNA");
        editor.set_first_name("Suman");
        editor.set_last_name("Tester79");
        editor.set_min_pay_percent("2.35");
        editor.set_balance("1363");
        editor
    }

    #[test]
    fn numeric_fields_parse_on_entry() {
        let mut editor = RowEditor::new();
        editor.set_min_pay_percent(" 4,5 ");
        editor.set_balance("12.50");

        assert_eq!(editor.draft().min_pay_percent.value(), Some(dec!(4.5)));
        assert_eq!(editor.draft().balance.value(), Some(dec!(12.50)));
        assert_eq!(editor.field_text(DraftField::MinPayPercent), " 4,5 ");
    }

    #[test]
    fn unparsable_input_keeps_raw_text() {
        let mut editor = RowEditor::new();
        editor.set_balance("12abc");

        assert_eq!(editor.draft().balance.value(), None);
        assert_eq!(editor.field_text(DraftField::Balance), "12abc");
    }

    #[test]
    fn validate_builds_new_row() {
        let row = filled().validate().unwrap();

        assert_eq!(row.creditor_name, "CBNA");
        assert_eq!(row.min_pay_percent, dec!(2.35));
        assert_eq!(row.balance, dec!(1363));
    }

    #[test]
    fn validate_rejects_non_numeric_balance() {
        let mut editor = filled();
        editor.set(DraftField::Balance, "lots");

        let err = editor.validate().unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidDraft {
                field: DraftField::Balance,
                reason: "\"lots\" is not a number".to_string(),
            }
        );
    }

    #[test]
    fn validate_rejects_missing_and_out_of_range_values() {
        let mut editor = filled();
        editor.set_min_pay_percent("");
        assert!(matches!(
            editor.validate(),
            Err(EngineError::InvalidDraft {
                field: DraftField::MinPayPercent,
                ..
            })
        ));

        editor.set_min_pay_percent("120");
        assert!(editor.validate().is_err());

        editor.set_min_pay_percent("20");
        editor.set_balance("-1");
        assert!(matches!(
            editor.validate(),
            Err(EngineError::InvalidDraft {
                field: DraftField::Balance,
                ..
            })
        ));
    }

    #[test]
    fn open_and_close_keep_the_draft() {
        let mut editor = filled();
        editor.open();
        assert!(editor.is_open());

        editor.close();
        assert!(!editor.is_open());
        assert_eq!(editor.field_text(DraftField::Creditor), "CBNA");

        editor.open();
        assert_eq!(editor.field_text(DraftField::Balance), "1363");
    }

    #[test]
    fn fields_cycle_in_tab_order() {
        let mut field = DraftField::Creditor;
        for _ in 0..DraftField::ALL.len() {
            field = field.next();
        }
        assert_eq!(field, DraftField::Creditor);
        assert_eq!(DraftField::Creditor.prev(), DraftField::Balance);
    }
}
