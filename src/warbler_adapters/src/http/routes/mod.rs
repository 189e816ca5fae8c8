pub mod error;
pub mod profile;
pub mod register;
pub mod register_stream;

pub use error::{ErrorResponse, RegistrationApiError};
pub use profile::get_profile;
pub use register::{RegisterRequest, RegisterResponse, register};
pub use register_stream::register_stream;
