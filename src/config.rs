use crate::error::{PassportWallError, Result};
use passport_common::STORAGE_KEY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 保存ファイルを上書きする環境変数
pub const STORE_ENV: &str = "PASSPORT_WALL_STORE";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// パスポート保存ファイル（未設定ならデータディレクトリ）
    pub store_path: Option<PathBuf>,
    /// 保存ファイル内のキー
    pub storage_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: None,
            storage_key: STORAGE_KEY.into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PassportWallError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("passport-wall").join("config.json"))
    }

    /// 保存ファイルの解決順: `--store` > 環境変数 > 設定 > データディレクトリ
    pub fn resolve_store_path(&self, cli_override: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = cli_override {
            return Ok(path.to_path_buf());
        }

        if let Ok(path) = std::env::var(STORE_ENV) {
            if !path.is_empty() {
                return Ok(PathBuf::from(path));
            }
        }

        if let Some(path) = &self.store_path {
            return Ok(path.clone());
        }

        let data = dirs::data_dir()
            .ok_or_else(|| PassportWallError::Config("data directory not found".into()))?;
        Ok(data.join("passport-wall").join("passports.json"))
    }

    pub fn set_store_path(&mut self, path: PathBuf) -> Result<()> {
        self.store_path = Some(path);
        self.save()
    }
}
