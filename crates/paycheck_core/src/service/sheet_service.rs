//! Paycheck sheet use-case service.
//!
//! # Invariants
//! - Service APIs never bypass the store's put/get/remove/list contract.
//! - Allocation arithmetic stays with callers; sheets are stored as given.

use crate::model::paycheck::PaycheckDoc;
use crate::store::{DocStore, PutResponse, StoreError, StoreResult};
use log::info;

/// Service wrapper for paycheck sheet persistence.
pub struct SheetService<S: DocStore<PaycheckDoc>> {
    store: S,
}

impl<S: DocStore<PaycheckDoc>> SheetService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Saves `sheet` and writes the assigned `_rev` back into it.
    pub fn save_sheet(&self, sheet: &mut PaycheckDoc) -> StoreResult<PutResponse> {
        let response = self.store.put(sheet)?;
        sheet.rev = Some(response.rev.clone());
        info!(
            "event=sheet_save module=service status=ok id={} rev={}",
            response.id, response.rev
        );
        Ok(response)
    }

    pub fn load_sheet(&self, id: &str) -> StoreResult<PaycheckDoc> {
        self.store.get(id)
    }

    pub fn delete_sheet(&self, id: &str) -> StoreResult<()> {
        self.store.remove(id)?;
        info!("event=sheet_delete module=service status=ok id={id}");
        Ok(())
    }

    pub fn list_sheet_ids(&self, prefix: &str) -> StoreResult<Vec<String>> {
        self.store.list(prefix)
    }

    /// Loads every sheet whose id starts with `prefix`, in id order.
    ///
    /// Ids removed between listing and loading are skipped.
    pub fn load_sheets(&self, prefix: &str) -> StoreResult<Vec<PaycheckDoc>> {
        let mut sheets = Vec::new();
        for id in self.store.list(prefix)? {
            match self.store.get(&id) {
                Ok(sheet) => sheets.push(sheet),
                Err(StoreError::NotFound(_)) => continue,
                Err(err) => return Err(err),
            }
        }
        Ok(sheets)
    }

    /// Ids of sheets keyed by a `YYYY-MM...` date within the given month.
    pub fn list_month(&self, year: u16, month: u8) -> StoreResult<Vec<String>> {
        if !(1..=12).contains(&month) {
            return Err(StoreError::Validation(format!(
                "month must be within 1..=12, got {month}"
            )));
        }
        self.store.list(&format!("{year:04}-{month:02}"))
    }
}
