use crate::core::links::{DEFAULT_GOOGLE_BASE, DEFAULT_KAKAO_BASE, DEFAULT_NAVER_BASE};
use crate::core::{ConfigProvider, DirectoryKind};
use crate::utils::error::{DirectoryError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectoryConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub links: LinksConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub dir: String,
    pub restaurants_file: String,
    pub merchants_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: "./data".to_string(),
            restaurants_file: "restaurants.json".to_string(),
            merchants_file: "ypay_merchants.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    pub naver_base: String,
    pub kakao_base: String,
    pub google_base: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            naver_base: DEFAULT_NAVER_BASE.to_string(),
            kakao_base: DEFAULT_KAKAO_BASE.to_string(),
            google_base: DEFAULT_GOOGLE_BASE.to_string(),
        }
    }
}

impl DirectoryConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DirectoryError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DirectoryError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})，未設定者保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DirectoryError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("data.dir", &self.data.dir)?;
        validation::validate_path("data.restaurants_file", &self.data.restaurants_file)?;
        validation::validate_path("data.merchants_file", &self.data.merchants_file)?;
        validation::validate_file_extensions(
            "data",
            &[self.data.restaurants_file.as_str(), self.data.merchants_file.as_str()],
            &["json"],
        )?;

        validation::validate_url("links.naver_base", &self.links.naver_base)?;
        validation::validate_url("links.kakao_base", &self.links.kakao_base)?;
        validation::validate_url("links.google_base", &self.links.google_base)?;

        Ok(())
    }
}

impl ConfigProvider for DirectoryConfig {
    fn data_dir(&self) -> &str {
        &self.data.dir
    }

    fn data_file(&self, kind: DirectoryKind) -> &str {
        match kind {
            DirectoryKind::Restaurants => &self.data.restaurants_file,
            DirectoryKind::Merchants => &self.data.merchants_file,
        }
    }

    fn naver_base(&self) -> &str {
        &self.links.naver_base
    }

    fn kakao_base(&self) -> &str {
        &self.links.kakao_base
    }

    fn google_base(&self) -> &str {
        &self.links.google_base
    }
}

impl Validate for DirectoryConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
