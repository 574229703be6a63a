use crate::error::{DtExtractError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_PATHS: &[&str] = &["dt-extract.toml", ".dt-extract.toml"];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub extract: ExtractConfig,
    pub generate: GenerateConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub marker: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GenerateConfig {
    pub array_name: String,
    pub count_name: String,
    pub values_per_row: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// One of `human`, `plain` or `json`
    pub mode: String,
    pub verbose: u8,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            marker: "DT".to_string(),
        }
    }
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            array_name: "test_dt_values".to_string(),
            count_name: "test_dt_count".to_string(),
            values_per_row: 10,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            mode: "human".to_string(),
            verbose: 1,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| DtExtractError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| DtExtractError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    /// Loads the first config file found in the working directory, falling
    /// back to defaults.
    pub fn load_with_defaults() -> Result<Self> {
        Self::load_from_dir(Path::new("."))
    }

    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        for name in DEFAULT_CONFIG_PATHS {
            let candidate = dir.join(name);
            if candidate.is_file() {
                let config = Self::load_from_file(&candidate)?;
                config.validate()?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<()> {
        if self.extract.marker.is_empty() {
            return Err(DtExtractError::Config {
                message: "Extraction marker must not be empty".to_string(),
            });
        }

        if self.generate.values_per_row == 0 {
            return Err(DtExtractError::Config {
                message: "values_per_row must be greater than 0".to_string(),
            });
        }

        for (field, name) in [
            ("array_name", &self.generate.array_name),
            ("count_name", &self.generate.count_name),
        ] {
            if !is_c_identifier(name) {
                return Err(DtExtractError::Config {
                    message: format!("{} is not a valid C++ identifier: {:?}", field, name),
                });
            }
        }

        if self.generate.array_name == self.generate.count_name {
            return Err(DtExtractError::Config {
                message: "array_name and count_name must differ".to_string(),
            });
        }

        if !matches!(self.output.mode.to_lowercase().as_str(), "human" | "plain" | "json") {
            return Err(DtExtractError::Config {
                message: format!(
                    "Unknown output mode {:?} (expected human, plain or json)",
                    self.output.mode
                ),
            });
        }

        Ok(())
    }
}

// Names that would make the generated declarations fail to compile.
const CPP_KEYWORDS: &[&str] = &[
    "alignas", "alignof", "and", "asm", "auto", "bool", "break", "case", "catch", "char",
    "class", "const", "consteval", "constexpr", "constinit", "const_cast", "continue",
    "decltype", "default", "delete", "do", "double", "dynamic_cast", "else", "enum",
    "explicit", "export", "extern", "false", "float", "for", "friend", "goto", "if",
    "inline", "int", "long", "mutable", "namespace", "new", "noexcept", "not", "nullptr",
    "operator", "or", "private", "protected", "public", "register", "reinterpret_cast",
    "return", "short", "signed", "sizeof", "static", "static_assert", "static_cast",
    "struct", "switch", "template", "this", "throw", "true", "try", "typedef", "typeid",
    "typename", "union", "unsigned", "using", "virtual", "void", "volatile", "while",
    "size_t",
];

fn is_c_identifier(s: &str) -> bool {
    if CPP_KEYWORDS.contains(&s) {
        return false;
    }

    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
