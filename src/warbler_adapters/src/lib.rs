//! Infrastructure for the registration pipeline: store implementations,
//! configuration and the axum routes that expose it.

pub mod config;
pub mod http;
pub mod object_storage;
pub mod persistence;

pub use object_storage::HttpObjectStore;
pub use persistence::{
    DashMapObjectStore, DashMapProfileStore, HashMapAccountStore, PostgresAccountStore,
    PostgresProfileStore,
};
