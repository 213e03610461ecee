pub mod build;
pub mod config;
pub mod diag;
pub mod error;
pub mod model;
pub mod parse;
pub mod template;

/// A generated file with path and content.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Trait for emission backends that render target-language source from a
/// finished model. The backend consumes the model as-is; it never takes part
/// in reference resolution or collision detection.
pub trait CodeEmitter {
    type Config;
    type Error: std::error::Error;
    fn emit(
        &self,
        model: &model::ApiModel,
        config: &Self::Config,
    ) -> Result<Vec<GeneratedFile>, Self::Error>;
}
