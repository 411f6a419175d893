//! Storage layer for splitbook
//!
//! The local ledger cache, a JSON file replaced atomically on every save.

pub mod ledger_cache;

pub use ledger_cache::{LedgerCache, ReplaceResult};
