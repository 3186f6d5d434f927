//! Use-case services over document stores.
//!
//! # Responsibility
//! - Offer paycheck-sheet level entry points to UI/CLI callers.
//! - Stay storage-agnostic: any `DocStore<PaycheckDoc>` works.

pub mod sheet_service;
