//! Libris Store - Record persistence interface
//!
//! The circulation core reads and writes catalog entries and loan records
//! through the `RecordStore` trait. `MemoryStore` is the bundled backing:
//! an `RwLock`-guarded map, suitable for tests and demos, not a persistence
//! engine.

pub mod error;
pub mod memory;
pub mod types;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use types::RecordStore;
