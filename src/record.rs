use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One booked line of a bank statement.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    /// Account number of the statement's own account.
    pub account: String,
    pub booking_date: NaiveDate,
    /// Date the transaction took effect. Grouping is done by this date.
    pub value_date: NaiveDate,
    /// Bank-provided classification, e.g. "Lastschrift" or "Gutschrift".
    pub booking_text: String,
    pub purpose: String,
    pub creditor_id: String,
    pub mandate_reference: String,
    pub customer_reference: String,
    pub collector_reference: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub original_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub chargeback_fee: Decimal,
    pub beneficiary: String,
    pub beneficiary_iban: String,
    pub bic: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
    pub additional_details: String,
}

impl TransactionRecord {
    /// A record with only the fields the aggregation tree looks at. Everything else is empty.
    pub fn new(
        value_date: NaiveDate,
        beneficiary: impl Into<String>,
        purpose: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            account: String::new(),
            booking_date: value_date,
            value_date,
            booking_text: String::new(),
            purpose: purpose.into(),
            creditor_id: String::new(),
            mandate_reference: String::new(),
            customer_reference: String::new(),
            collector_reference: String::new(),
            original_amount: Decimal::ZERO,
            chargeback_fee: Decimal::ZERO,
            beneficiary: beneficiary.into(),
            beneficiary_iban: String::new(),
            bic: String::new(),
            amount,
            currency: String::new(),
            additional_details: String::new(),
        }
    }

    /// Whether `other` describes the same booking.
    ///
    /// Two lines of a statement are the same booking if they hit the same account on the same
    /// dates with the same amount and the same direct debit mandate.
    pub fn is_same_booking(&self, other: &TransactionRecord) -> bool {
        self.account == other.account
            && self.booking_date == other.booking_date
            && self.value_date == other.value_date
            && self.amount == other.amount
            && self.creditor_id == other.creditor_id
            && self.mandate_reference == other.mandate_reference
    }
}
