pub mod database;
pub mod ml;

pub use database::{AccountStore, Database, MemoryAccountStore, StoreError};
pub use ml::{ModelHandle, ModelStore};
