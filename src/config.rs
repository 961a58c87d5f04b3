use crate::error::{CotacaoError, Result};
use cotacao_common::{BatchPolicy, DEFAULT_MAX_KEYWORDS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// データディレクトリを上書きする環境変数
pub const DATA_DIR_ENV: &str = "COTACAO_DATA_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 価格表・お気に入りの保存先
    pub data_dir: Option<PathBuf>,
    /// 1回の検索で受け付けるキーワード数（0 = 無制限）
    pub max_keywords: usize,
    /// items コマンドの既定件数
    pub items_limit: usize,
    /// キーワードごとの表示件数（None = 全件）
    pub display_limit: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            max_keywords: DEFAULT_MAX_KEYWORDS,
            items_limit: 100,
            display_limit: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CotacaoError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("cotacao").join("config.json"))
    }

    /// データディレクトリ（環境変数 > 設定ファイル > OS既定）
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.trim().is_empty() {
                return Ok(PathBuf::from(dir));
            }
        }

        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }

        dirs::data_dir()
            .map(|d| d.join("cotacao"))
            .ok_or_else(|| CotacaoError::Config("データディレクトリが見つかりません".into()))
    }

    pub fn batch_policy(&self) -> BatchPolicy {
        BatchPolicy {
            max_keywords: (self.max_keywords > 0).then_some(self.max_keywords),
        }
    }
}
