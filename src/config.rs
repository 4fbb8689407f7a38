// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{MatcherError, Result};
use crate::utils::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub data: DataConfig,
    pub matcher: MatcherConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataConfig {
    /// JSON file, workbook, or directory holding datasets
    pub path: PathBuf,
    /// Restrict loading to these dataset names; empty loads all
    #[serde(default)]
    pub datasets: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    #[default]
    Substring,
    Fuzzy,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterScope {
    #[default]
    Rows,
    Tables,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MatcherConfig {
    pub threshold: f64,
    pub answer_field_aliases: Vec<String>,
    pub image_field_aliases: Vec<String>,
    pub answer_placeholder: String,
    #[serde(default)]
    pub filter_mode: FilterMode,
    #[serde(default)]
    pub filter_scope: FilterScope,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub strip_links: bool,
    pub rank_limit: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            answer_field_aliases: vec![
                "resposta".to_string(),
                "answer".to_string(),
                "texto".to_string(),
                "descricao".to_string(),
            ],
            image_field_aliases: vec![
                "imagem".to_string(),
                "image".to_string(),
                "foto".to_string(),
                "url".to_string(),
            ],
            answer_placeholder: "No answer recorded for this entry.".to_string(),
            filter_mode: FilterMode::Substring,
            filter_scope: FilterScope::Rows,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            strip_links: true,
            rank_limit: 5,
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let defaults = config::Config::try_from(&Self::default_config())
            .map_err(|e| MatcherError::Config(e.to_string()))?;

        let mut builder = config::Config::builder().add_source(defaults);

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(
                config::File::from(Path::new("config/default.toml")).required(false),
            );
        }

        builder = builder.add_source(
            config::Environment::with_prefix("SHEET_MATCH")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("matcher.answer_field_aliases")
                .with_list_parse_key("matcher.image_field_aliases")
                .with_list_parse_key("data.datasets")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| MatcherError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| MatcherError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            data: DataConfig {
                path: PathBuf::from("data"),
                datasets: vec![],
            },
            matcher: MatcherConfig::default(),
            output: OutputConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        Validator::validate_threshold(self.matcher.threshold)?;
        Validator::validate_aliases("answer_field_aliases", &self.matcher.answer_field_aliases)?;
        Validator::validate_aliases("image_field_aliases", &self.matcher.image_field_aliases)?;

        if self.output.rank_limit == 0 {
            return Err(MatcherError::Config(
                "rank_limit must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
