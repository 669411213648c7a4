//! Splits the fetched record list into regular expenses, planned items and risk items.

use crate::entities::expense;

/// The three views over one fetched record list. Groups borrow from the input and keep
/// its order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition<'a> {
    /// Records with neither category flag set
    pub regular: Vec<&'a expense::Model>,
    /// Records flagged `is_planned`
    pub planned: Vec<&'a expense::Model>,
    /// Records flagged `is_risk_item`
    pub risk: Vec<&'a expense::Model>,
}

/// Partitions `records` by their category flags.
///
/// Each group is filtered independently: a record carrying both flags lands in `planned`
/// and in `risk`. Nothing is dropped.
#[must_use]
pub fn partition(records: &[expense::Model]) -> Partition<'_> {
    let mut result = Partition::default();

    for record in records {
        if record.is_planned {
            result.planned.push(record);
        }
        if record.is_risk_item {
            result.risk.push(record);
        }
        if !record.is_planned && !record.is_risk_item {
            result.regular.push(record);
        }
    }

    result
}
