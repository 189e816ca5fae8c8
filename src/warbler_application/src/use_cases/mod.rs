pub mod register;

pub use register::{PipelineConfig, RegistrationPipeline};
