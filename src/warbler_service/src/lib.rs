pub mod helpers;
pub mod registration_service;
pub mod tracing;

pub use registration_service::RegistrationService;
