//! バッチ検索モジュール
//!
//! キーワードのリストを受け取り、キーワードごとに照合 → 価格導出 →
//! お気に入り付与を行って、入力順のグループにまとめる。
//! キーワード間に依存はないので rayon で並列に処理する。

use crate::catalog::CatalogSnapshot;
use crate::error::{Error, Result};
use crate::favorites::FavoritesRegistry;
use crate::matcher::match_prepared;
use crate::resolver::resolve;
use crate::types::{BatchResult, KeywordGroup, Match};
use rayon::prelude::*;
use std::collections::HashSet;

/// 1リクエストあたりのキーワード数の既定上限
pub const DEFAULT_MAX_KEYWORDS: usize = 15;

/// 呼び出し側の入力ポリシー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPolicy {
    /// None なら上限なし
    pub max_keywords: Option<usize>,
}

impl Default for BatchPolicy {
    fn default() -> Self {
        Self {
            max_keywords: Some(DEFAULT_MAX_KEYWORDS),
        }
    }
}

impl BatchPolicy {
    pub fn unlimited() -> Self {
        Self { max_keywords: None }
    }
}

/// 入力行をキーワードに整える（前後空白除去・空行除外・上限チェック）
pub fn prepare_keywords<I, S>(lines: I, policy: &BatchPolicy) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let keywords = trimmed_keywords(lines);

    if keywords.is_empty() {
        return Err(Error::EmptyBatch);
    }
    if let Some(max) = policy.max_keywords {
        if keywords.len() > max {
            return Err(Error::TooManyKeywords {
                max,
                got: keywords.len(),
            });
        }
    }

    Ok(keywords)
}

/// 入力を検証してからバッチ検索を実行
pub fn run_request<I, S>(
    lines: I,
    policy: &BatchPolicy,
    catalog: Option<&CatalogSnapshot>,
    favorites: &FavoritesRegistry,
) -> Result<BatchResult>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let keywords = prepare_keywords(lines, policy)?;
    Ok(run_batch(&keywords, catalog, favorites))
}

/// バッチ検索
///
/// - 結果はキーワードの入力順
/// - ヒットなし・価格表未読み込みは 0件のグループ（エラーにしない）
/// - 同じ行が複数キーワードでヒットした場合はそれぞれ数える
pub fn run_batch<S>(
    keywords: &[S],
    catalog: Option<&CatalogSnapshot>,
    favorites: &FavoritesRegistry,
) -> BatchResult
where
    S: AsRef<str> + Sync,
{
    let keywords = trimmed_keywords(keywords);
    let favorite_names = favorites.snapshot();

    if catalog.is_none() {
        tracing::debug!("価格表が未読み込みのため全キーワード0件");
    }

    let results: Vec<KeywordGroup> = keywords
        .par_iter()
        .map(|keyword| match catalog {
            Some(snapshot) => match_group(keyword, snapshot, &favorite_names),
            None => KeywordGroup::empty(keyword.as_str()),
        })
        .collect();

    let total_items_found: usize = results.iter().map(|g| g.total_matches).sum();
    tracing::debug!(
        keywords = results.len(),
        total_items_found,
        "バッチ検索完了"
    );

    BatchResult {
        total_keywords: results.len(),
        total_items_found,
        results,
    }
}

/// キーワード1件分のグループを作成
pub fn match_group(
    keyword: &str,
    snapshot: &CatalogSnapshot,
    favorite_names: &HashSet<String>,
) -> KeywordGroup {
    let matches: Vec<Match> = match_prepared(keyword, snapshot.rows(), snapshot.names())
        .into_iter()
        .map(|hit| Match {
            matched_item_name: hit.row.product_name.clone(),
            prices: resolve(hit.row),
            match_score: hit.score,
            match_kind: hit.kind,
            is_favorite: favorite_names.contains(&hit.row.product_name),
        })
        .collect();

    tracing::debug!(keyword, hits = matches.len(), "キーワード照合");

    KeywordGroup {
        keyword: keyword.to_string(),
        total_matches: matches.len(),
        matches,
    }
}

fn trimmed_keywords<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .map(|line| line.as_ref().trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}
