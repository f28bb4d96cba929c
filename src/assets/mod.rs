pub mod media;
pub mod pipeline;
pub mod progress;
