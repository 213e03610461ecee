use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Project configuration loaded from `.swaggen.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenConfig {
    /// Path of the Swagger 2.0 document to compile.
    pub input: String,
    /// Directory the emission backend writes into.
    pub output: String,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            input: "swagger.json".to_string(),
            output: "generated".to_string(),
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".swaggen.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<GenConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: GenConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# swaggen configuration
input: swagger.json   # Swagger 2.0 document to compile
output: generated     # directory for emitted bindings
"#
}
