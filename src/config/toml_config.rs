use crate::core::setup::AssetSettings;
use crate::utils::error::{AppError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const DATABASE_SCHEMES: &[&str] = &["http", "https", "libsql"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub seed: Option<SeedConfig>,
    pub assets: Option<AssetsConfig>,
    pub stats: Option<StatsConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub auth_token: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    pub quotes_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    pub source_dir: String,
    pub targets: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    pub data_dir: String,
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AppError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AppError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATABASE_AUTH_TOKEN})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AppError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_resolved("database.url", &self.database.url)?;
        validation::validate_url("database.url", &self.database.url, DATABASE_SCHEMES)?;

        if let Some(token) = &self.database.auth_token {
            validation::validate_resolved("database.auth_token", token)?;
            validation::validate_non_empty_string("database.auth_token", token)?;
        }

        if let Some(timeout) = self.database.timeout_seconds {
            validation::validate_range("database.timeout_seconds", timeout, 1, 300)?;
        }

        validation::validate_path("seed.quotes_file", &self.quotes_file())?;
        validation::validate_file_extension("seed.quotes_file", &self.quotes_file(), &["json"])?;

        if let Some(assets) = &self.assets {
            validation::validate_path("assets.source_dir", &assets.source_dir)?;
            for target in &assets.targets {
                validation::validate_path("assets.targets", target)?;
            }
        }

        self.validate_stats()
    }

    /// 只檢查 [stats]；統計指令不需要資料庫連線資訊
    pub fn validate_stats(&self) -> Result<()> {
        validation::validate_path("stats.data_dir", &self.stats_dir())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.database.timeout_seconds.unwrap_or(30))
    }

    pub fn quotes_file(&self) -> String {
        self.seed
            .as_ref()
            .map(|s| s.quotes_file.clone())
            .unwrap_or_else(|| "data/quotes.json".to_string())
    }

    pub fn asset_settings(&self) -> AssetSettings {
        match &self.assets {
            Some(assets) => AssetSettings {
                source_dir: PathBuf::from(&assets.source_dir),
                targets: assets.targets.iter().map(PathBuf::from).collect(),
            },
            None => AssetSettings {
                source_dir: PathBuf::from("public/logo"),
                targets: Vec::new(),
            },
        }
    }

    pub fn stats_dir(&self) -> String {
        self.stats
            .as_ref()
            .map(|s| s.data_dir.clone())
            .unwrap_or_else(|| "./data".to_string())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
