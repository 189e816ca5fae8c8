pub mod dashmap_object_store;
pub mod dashmap_profile_store;
pub mod hashmap_account_store;
pub mod postgres_account_store;
pub mod postgres_profile_store;

pub use dashmap_object_store::{DashMapObjectStore, StoredObject};
pub use dashmap_profile_store::DashMapProfileStore;
pub use hashmap_account_store::{Account, HashMapAccountStore};
pub use postgres_account_store::PostgresAccountStore;
pub use postgres_profile_store::PostgresProfileStore;
