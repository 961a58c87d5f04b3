//! 価格表スナップショット
//!
//! アップロードごとに価格表全体を差し替える。公開済みのスナップショットは
//! 変更しない（新しいものを公開し、実行中の検索は古いものを使い続ける）。

use crate::error::Result;
use crate::ingest::validate_rows;
use crate::matcher::{prepare_names, NormalizedName};
use crate::types::CatalogRow;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use std::sync::{Arc, RwLock};

/// 不変の価格表スナップショット
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    rows: Arc<[CatalogRow]>,
    names: Arc<[NormalizedName]>,
    fingerprint: String,
    uploaded_at: DateTime<Utc>,
    source: Option<String>,
}

impl CatalogSnapshot {
    /// 行データから新しいスナップショットを作成（現在時刻）
    pub fn from_rows(rows: Vec<CatalogRow>, source: Option<String>) -> Result<Self> {
        Self::with_metadata(rows, source, Utc::now())
    }

    /// 保存済みのメタデータで復元
    pub fn with_metadata(
        rows: Vec<CatalogRow>,
        source: Option<String>,
        uploaded_at: DateTime<Utc>,
    ) -> Result<Self> {
        let rows = validate_rows(rows)?;
        let fingerprint = compute_fingerprint(&rows)?;
        let names = prepare_names(&rows);

        Ok(Self {
            rows: rows.into(),
            names: names.into(),
            fingerprint,
            uploaded_at,
            source,
        })
    }

    pub fn rows(&self) -> &[CatalogRow] {
        &self.rows
    }

    pub(crate) fn names(&self) -> &[NormalizedName] {
        &self.names
    }

    /// 先頭から最大 limit 件
    pub fn items(&self, limit: usize) -> &[CatalogRow] {
        &self.rows[..limit.min(self.rows.len())]
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 行データのSHA-256（hex）
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn uploaded_at(&self) -> DateTime<Utc> {
        self.uploaded_at
    }

    /// 元ファイル名
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

fn compute_fingerprint(rows: &[CatalogRow]) -> Result<String> {
    let bytes = serde_json::to_vec(rows)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

/// 現在の価格表を保持するストア
///
/// 読み取り側はArcを複製して持ち出すため、公開中の差し替えで
/// 検索中のスナップショットが変わることはない。
#[derive(Debug, Default)]
pub struct CatalogStore {
    current: RwLock<Option<Arc<CatalogSnapshot>>>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新しいスナップショットを公開（前のものは置き換え）
    pub fn publish(&self, snapshot: CatalogSnapshot) -> Arc<CatalogSnapshot> {
        let snapshot = Arc::new(snapshot);
        tracing::info!(
            items = snapshot.len(),
            fingerprint = %snapshot.fingerprint(),
            "価格表を公開"
        );
        let mut slot = self.current.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(Arc::clone(&snapshot));
        snapshot
    }

    /// 現在のスナップショット（未読み込みなら None）
    pub fn snapshot(&self) -> Option<Arc<CatalogSnapshot>> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot().is_some()
    }
}
