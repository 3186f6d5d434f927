//! Paycheck sheet domain model.
//!
//! # Responsibility
//! - Define the income/allocation record persisted per paycheck.
//! - Provide caller-side arithmetic helpers for allocation totals.
//!
//! # Invariants
//! - Serialized field names match the persisted JSON shape (`_id`, `_rev`, ...).
//! - `leftover` is stored verbatim; stores never recompute or validate it.
//! - `allocations` is a legacy list kept only so older documents still load.

use super::Document;
use serde::{Deserialize, Serialize};

/// One category amount inside a savings or expenses list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub category: String,
    pub amount: f64,
}

impl Allocation {
    pub fn new(category: impl Into<String>, amount: f64) -> Self {
        Self {
            category: category.into(),
            amount,
        }
    }
}

/// One paycheck sheet: income, date and where the money went.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaycheckDoc {
    /// Caller-assigned identifier, typically the paycheck date.
    #[serde(rename = "_id")]
    pub id: String,
    /// Revision marker assigned by the store on every write.
    #[serde(rename = "_rev", default, skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-form date string; format is chosen by the caller.
    pub date: String,
    pub income: f64,
    /// Legacy single-list allocations from older documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allocations: Option<Vec<Allocation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings: Option<Vec<Allocation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expenses: Option<Vec<Allocation>>,
    pub leftover: f64,
}

impl PaycheckDoc {
    /// Creates an unallocated sheet whose leftover equals its income.
    pub fn new(id: impl Into<String>, date: impl Into<String>, income: f64) -> Self {
        Self {
            id: id.into(),
            rev: None,
            name: None,
            date: date.into(),
            income,
            allocations: None,
            savings: None,
            expenses: None,
            leftover: income,
        }
    }

    /// Returns `(savings, expenses)` with legacy allocations read as expenses.
    ///
    /// Legacy `allocations` are only consulted when neither split list is set.
    pub fn effective_lists(&self) -> (Vec<Allocation>, Vec<Allocation>) {
        if self.savings.is_none() && self.expenses.is_none() {
            return (Vec::new(), self.allocations.clone().unwrap_or_default());
        }
        (
            self.savings.clone().unwrap_or_default(),
            self.expenses.clone().unwrap_or_default(),
        )
    }

    /// Sum of every allocated amount.
    pub fn allocated_total(&self) -> f64 {
        let (savings, expenses) = self.effective_lists();
        savings
            .iter()
            .chain(expenses.iter())
            .map(|allocation| allocation.amount)
            .sum()
    }

    /// `income` minus everything allocated. Not written back automatically.
    pub fn computed_leftover(&self) -> f64 {
        self.income - self.allocated_total()
    }
}

impl Document for PaycheckDoc {
    fn id(&self) -> &str {
        &self.id
    }

    fn rev(&self) -> Option<&str> {
        self.rev.as_deref()
    }

    fn set_rev(&mut self, rev: Option<String>) {
        self.rev = rev;
    }
}
