//! 価格表・お気に入りの保存モジュール
//!
//! データディレクトリにJSONで保存する。
//! - catalog.json: 公開中の価格表スナップショット
//! - favorites.json: お気に入り品名

use crate::error::{CotacaoError, Result};
use chrono::{DateTime, Utc};
use cotacao_common::{CatalogRow, CatalogSnapshot, FavoritesRegistry};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

const CATALOG_FILE_NAME: &str = "catalog.json";
const FAVORITES_FILE_NAME: &str = "favorites.json";

/// 価格表ファイルの構造
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    /// バージョン（互換性チェック用）
    version: u32,
    /// 元ファイル名
    source: Option<String>,
    uploaded_at: DateTime<Utc>,
    fingerprint: String,
    rows: Vec<CatalogRow>,
}

impl CatalogFile {
    const CURRENT_VERSION: u32 = 1;

    pub fn from_snapshot(snapshot: &CatalogSnapshot) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            source: snapshot.source().map(str::to_string),
            uploaded_at: snapshot.uploaded_at(),
            fingerprint: snapshot.fingerprint().to_string(),
            rows: snapshot.rows().to_vec(),
        }
    }

    pub fn path(dir: &Path) -> PathBuf {
        dir.join(CATALOG_FILE_NAME)
    }

    /// 保存済みの価格表を読み込み（未保存なら None）
    pub fn load(dir: &Path) -> Result<Option<CatalogSnapshot>> {
        let path = Self::path(dir);
        if !path.exists() {
            return Ok(None);
        }

        let reader = BufReader::new(File::open(&path)?);
        let file: CatalogFile = serde_json::from_reader(reader)
            .map_err(|e| CotacaoError::InvalidCatalogFile(format!("{}: {}", path.display(), e)))?;

        if file.version != Self::CURRENT_VERSION {
            return Err(CotacaoError::InvalidCatalogFile(format!(
                "バージョン不一致 (file: {}, expected: {})。再度 import してください",
                file.version,
                Self::CURRENT_VERSION
            )));
        }

        let snapshot = CatalogSnapshot::with_metadata(file.rows, file.source, file.uploaded_at)?;
        if snapshot.fingerprint() != file.fingerprint {
            tracing::warn!(path = %path.display(), "価格表ファイルのフィンガープリントが一致しません");
        }

        Ok(Some(snapshot))
    }

    /// スナップショットを保存（一時ファイルに書いてから置き換え）
    pub fn save(snapshot: &CatalogSnapshot, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)?;
        write_json_atomic(&Self::path(dir), &Self::from_snapshot(snapshot))
    }
}

/// お気に入りファイルの構造
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoritesFile {
    version: u32,
    names: Vec<String>,
}

impl FavoritesFile {
    const CURRENT_VERSION: u32 = 1;

    pub fn path(dir: &Path) -> PathBuf {
        dir.join(FAVORITES_FILE_NAME)
    }

    /// お気に入りを読み込み（無い・壊れている場合は空）
    pub fn load(dir: &Path) -> FavoritesRegistry {
        let path = Self::path(dir);
        if !path.exists() {
            return FavoritesRegistry::new();
        }

        let file = match File::open(&path) {
            Ok(f) => f,
            Err(_) => return FavoritesRegistry::new(),
        };

        match serde_json::from_reader::<_, FavoritesFile>(BufReader::new(file)) {
            Ok(favorites) if favorites.version == Self::CURRENT_VERSION => {
                favorites.names.into_iter().collect()
            }
            Ok(_) => {
                tracing::warn!("お気に入りファイルのバージョン不一致、空で開始します");
                FavoritesRegistry::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "お気に入りファイルが読めないため空で開始します");
                FavoritesRegistry::new()
            }
        }
    }

    pub fn save(registry: &FavoritesRegistry, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)?;
        let file = FavoritesFile {
            version: Self::CURRENT_VERSION,
            names: registry.list(),
        };
        write_json_atomic(&Self::path(dir), &file)
    }
}

fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let tmp_path = path.with_extension("json.tmp");
    let mut writer = BufWriter::new(File::create(&tmp_path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    drop(writer);

    std::fs::rename(&tmp_path, path)?;
    Ok(())
}
