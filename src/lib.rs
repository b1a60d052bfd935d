pub mod config;
pub mod encode;
pub mod generate;
pub mod models;
pub mod pipeline;
pub mod render;

pub use config::GeneratorConfig;
pub use encode::{encode, JpegQualityEncoder, LossyEncoder, SizeBoundedEncoder};
pub use generate::{generate_images, GeneratedImage};
pub use models::{ColorStop, EncodedBlob, GradientSpec, ItemSpec};
pub use pipeline::{DebugConfig, RenderPipeline, RenderStep};
pub use render::{render, GradientRenderer};
