pub mod image_encoding;
pub mod progress;
pub mod submission;
pub mod use_cases;

pub use image_encoding::{EncodingError, JPEG_CONTENT_TYPE, JpegQuality, encode_profile_image};
pub use progress::ProgressGate;
pub use submission::{Canceller, RegistrationHandle, RegistrationSubmission};
pub use use_cases::{PipelineConfig, RegistrationPipeline};
