pub(crate) mod data;
pub(crate) mod registry;
// As a safety measure, we want to know explicitly where the ledger lock is taken.
pub(crate) mod lock;
