use chrono::Datelike as _;

use super::Node;
use crate::record::TransactionRecord;

pub const ROOT_TITLE: &str = "Transactions";

/// Builds the aggregation tree `year -> month -> beneficiary -> detail` from `records`.
///
/// Groups appear in the order their key is first seen in `records`. Every record becomes its
/// own detail leaf, keyed by its purpose, even if a sibling has the same purpose. Beneficiaries
/// are grouped verbatim, without any normalization of case or whitespace.
pub fn build<'a>(records: impl IntoIterator<Item = &'a TransactionRecord>) -> Node {
    let mut root = Node::new_branch(ROOT_TITLE);
    let mut num_records = 0usize;
    for record in records {
        let year = root.get_or_add_branch(&year_key(record));
        let month = year.get_or_add_branch(&month_key(record));
        let beneficiary = month.get_or_add_branch(&record.beneficiary);
        beneficiary.push_child(Node::new_leaf(record.purpose.as_str(), record.amount));
        num_records += 1;
    }
    log::debug!(
        "Aggregated {} records into {} years",
        num_records,
        root.children().len()
    );
    root
}

fn year_key(record: &TransactionRecord) -> String {
    format!("{:04}", record.value_date.year())
}

fn month_key(record: &TransactionRecord) -> String {
    record.value_date.format("%B").to_string()
}
