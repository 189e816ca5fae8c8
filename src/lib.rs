//! # Warbler - Profile Registration Pipeline
//!
//! Facade crate that re-exports the public APIs of the registration components:
//! profile picture upload, account creation and profile persistence.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! warbler = { path = "../warbler" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `RegistrationRequest`, `RegistrationOutcome`, etc.
//! - **Store traits**: `ObjectStore`, `AccountStore`, `ProfileStore`
//! - **Pipeline**: `RegistrationPipeline` with its event stream and callback flavours
//! - **Adapters**: in-memory, PostgreSQL and HTTP object store implementations
//! - **Service**: `RegistrationService` - axum router over the pipeline

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use warbler_core::*;
}

// Re-export most commonly used core types at the root level
pub use warbler_core::{
    AccountError, AccountId, Email, FullName, ObjectHandle, ObjectKey, Password, PersistError,
    ProfileImage, ProfileRecord, RegistrationEvent, RegistrationFailure, RegistrationOutcome,
    RegistrationRequest, RegistrationStage, UploadError, UploadProgress, Username,
};

// ============================================================================
// Store Traits (Ports)
// ============================================================================

/// Store trait definitions
pub mod stores {
    pub use warbler_core::{
        AccountStore, AccountStoreError, ObjectStore, ObjectStoreError, ProfileStore,
        ProfileStoreError, ProgressCallback,
    };
}

pub use stores::{AccountStore, ObjectStore, ProfileStore};

// ============================================================================
// Registration Pipeline (Application Layer)
// ============================================================================

/// Application layer
pub mod pipeline {
    pub use warbler_application::*;
}

pub use warbler_application::{
    PipelineConfig, RegistrationHandle, RegistrationPipeline, RegistrationSubmission,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP route handlers
    pub mod http {
        pub use warbler_adapters::http::*;
    }

    /// Account, profile and in-memory object stores
    pub mod persistence {
        pub use warbler_adapters::persistence::*;
    }

    /// Remote object storage
    pub mod object_storage {
        pub use warbler_adapters::object_storage::*;
    }

    /// Configuration
    pub mod config {
        pub use warbler_adapters::config::*;
    }
}

pub use warbler_adapters::{
    DashMapObjectStore, DashMapProfileStore, HashMapAccountStore, HttpObjectStore,
    PostgresAccountStore, PostgresProfileStore,
};

// ============================================================================
// Registration Service (Main Entry Point)
// ============================================================================

pub use warbler_service::{
    RegistrationService,
    helpers::{configure_postgresql, get_postgres_pool},
};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing store traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
