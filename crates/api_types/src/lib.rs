use serde::{Deserialize, Serialize};

/// Error body returned by the debts endpoint on non-2xx responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub mod debt {
    use rust_decimal::Decimal;

    use super::*;

    /// A debt row as served by the data endpoint.
    ///
    /// `min_payment_percentage` is a whole-number percent (`2.35` means
    /// 2.35%). The engine converts it to a fraction when the rows are loaded.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DebtRow {
        pub id: u64,
        #[serde(default)]
        pub creditor_name: String,
        #[serde(default)]
        pub first_name: String,
        #[serde(default)]
        pub last_name: String,
        pub min_payment_percentage: Decimal,
        /// Missing or `null` in the payload when the balance is unknown.
        #[serde(default)]
        pub balance: Option<Decimal>,
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::debt::DebtRow;

    #[test]
    fn debt_row_reads_camel_case_payload() {
        let payload = r#"[
            {"id": 1, "creditorName": "CBNA", "firstName": "Suman", "lastName": "Tester79",
             "minPaymentPercentage": 2.35, "balance": 1363.00},
            {"id": 2, "creditorName": "AMEX", "firstName": "Suman", "lastName": "Tester79",
             "minPaymentPercentage": 2, "balance": null}
        ]"#;

        let rows: Vec<DebtRow> = serde_json::from_str(payload).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].creditor_name, "CBNA");
        assert_eq!(rows[0].min_payment_percentage, dec!(2.35));
        assert_eq!(rows[0].balance, Some(dec!(1363)));
        assert_eq!(rows[1].balance, None);
    }

    #[test]
    fn debt_row_tolerates_missing_balance_and_names() {
        let payload = r#"{"id": 7, "minPaymentPercentage": 4.5}"#;

        let row: DebtRow = serde_json::from_str(payload).unwrap();

        assert_eq!(row.id, 7);
        assert!(row.creditor_name.is_empty());
        assert_eq!(row.balance, None);
    }
}
