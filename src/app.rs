//! 価格表・お気に入り・検索エンジンをまとめたアプリケーション層
//!
//! CLIの各コマンドはここを経由する。保存はすべて store モジュールに任せる。

use crate::config::Config;
use crate::error::Result;
use crate::importer;
use crate::store::{CatalogFile, FavoritesFile};
use chrono::{DateTime, Utc};
use cotacao_common::{
    quote, run_request, BatchPolicy, BatchResult, CatalogSnapshot, CatalogStore,
    FavoritesRegistry, Quotation,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// 価格表の読み込み状況
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogStatus {
    pub loaded: bool,
    pub items_count: usize,
    pub source: Option<String>,
    pub uploaded_at: Option<DateTime<Utc>>,
    pub fingerprint: Option<String>,
}

pub struct App {
    data_dir: PathBuf,
    policy: BatchPolicy,
    catalog: CatalogStore,
    favorites: FavoritesRegistry,
}

impl App {
    /// データディレクトリから価格表とお気に入りを読み込む
    ///
    /// 保存済みの価格表が読めない場合は未読み込みで開始する（import で復旧）。
    pub fn open(data_dir: &Path, config: &Config) -> Result<Self> {
        let catalog = CatalogStore::new();
        match CatalogFile::load(data_dir) {
            Ok(Some(snapshot)) => {
                catalog.publish(snapshot);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, "保存済みの価格表を読めないため未読み込みで開始します");
            }
        }

        Ok(Self {
            data_dir: data_dir.to_path_buf(),
            policy: config.batch_policy(),
            catalog,
            favorites: FavoritesFile::load(data_dir),
        })
    }

    /// 現在の価格表スナップショット
    pub fn catalog_snapshot(&self) -> Option<Arc<CatalogSnapshot>> {
        self.catalog.snapshot()
    }

    /// 価格表を差し替える
    ///
    /// 保存に成功してから公開する。失敗時は前の価格表のまま。
    pub fn import(&self, path: &Path) -> Result<Arc<CatalogSnapshot>> {
        let snapshot = importer::import_file(path)?;
        CatalogFile::save(&snapshot, &self.data_dir)?;
        Ok(self.catalog.publish(snapshot))
    }

    /// バッチ検索（入力行の整形・上限チェック込み）
    pub fn search<I, S>(&self, lines: I) -> Result<BatchResult>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.search_with_policy(lines, &self.policy)
    }

    pub fn search_with_policy<I, S>(&self, lines: I, policy: &BatchPolicy) -> Result<BatchResult>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let snapshot = self.catalog.snapshot();
        Ok(run_request(lines, policy, snapshot.as_deref(), &self.favorites)?)
    }

    /// 単品見積
    pub fn quote(&self, item: &str) -> Result<Quotation> {
        let snapshot = self.catalog.snapshot();
        Ok(quote(item, snapshot.as_deref())?)
    }

    pub fn favorites(&self) -> Vec<String> {
        self.favorites.list()
    }

    /// お気に入りに追加（変化した場合のみ保存）
    pub fn add_favorite(&self, name: &str) -> Result<bool> {
        let changed = self.favorites.add(name);
        if changed {
            FavoritesFile::save(&self.favorites, &self.data_dir)?;
        }
        Ok(changed)
    }

    /// お気に入りから削除（変化した場合のみ保存）
    pub fn remove_favorite(&self, name: &str) -> Result<bool> {
        let changed = self.favorites.remove(name);
        if changed {
            FavoritesFile::save(&self.favorites, &self.data_dir)?;
        }
        Ok(changed)
    }

    pub fn status(&self) -> CatalogStatus {
        match self.catalog.snapshot() {
            Some(s) => CatalogStatus {
                loaded: true,
                items_count: s.len(),
                source: s.source().map(str::to_string),
                uploaded_at: Some(s.uploaded_at()),
                fingerprint: Some(s.fingerprint().to_string()),
            },
            None => CatalogStatus {
                loaded: false,
                items_count: 0,
                source: None,
                uploaded_at: None,
                fingerprint: None,
            },
        }
    }
}
