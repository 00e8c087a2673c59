//! Transaction outcome records

use crate::item::Amount;
use std::fmt;

/// Outcome of an `add` or `remove`.
///
/// `requested` is the amount asked for, or `-1` when no item was supplied.
/// Affected slots are listed in the order they were touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionResult {
    requested: Amount,
    completed: Amount,
    affected_slots: Vec<usize>,
}

impl TransactionResult {
    /// Create a result
    pub fn new(requested: Amount, completed: Amount, affected_slots: Vec<usize>) -> Self {
        Self {
            requested,
            completed,
            affected_slots,
        }
    }

    /// Nothing was moved
    pub fn rejected(requested: Amount) -> Self {
        Self::new(requested, 0, Vec::new())
    }

    /// Result for a missing or non-positive input item
    pub(crate) fn degenerate(amount: Option<Amount>) -> Self {
        Self::rejected(amount.unwrap_or(-1))
    }

    /// A single-slot result
    pub(crate) fn single(requested: Amount, completed: Amount, slot: usize) -> Self {
        Self::new(requested, completed, vec![slot])
    }

    /// Amount asked for
    pub fn requested(&self) -> Amount {
        self.requested
    }

    /// Amount actually moved
    pub fn completed(&self) -> Amount {
        self.completed
    }

    /// Slots touched, in order
    pub fn affected_slots(&self) -> &[usize] {
        &self.affected_slots
    }

    /// Everything requested was moved
    pub fn success(&self) -> bool {
        self.completed == self.requested
    }

    /// Something requested was not moved
    pub fn failed(&self) -> bool {
        !self.success()
    }

    /// Amount that could not be moved (never negative)
    pub fn shortfall(&self) -> Amount {
        (self.requested - self.completed).max(0)
    }
}

impl fmt::Display for TransactionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} moved, slots {:?}",
            self.completed, self.requested, self.affected_slots
        )
    }
}
