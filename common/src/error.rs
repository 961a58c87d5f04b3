//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("キーワードが指定されていません（空行のみ）")]
    EmptyBatch,

    #[error("キーワードが多すぎます: {got}件（上限 {max}件）")]
    TooManyKeywords { max: usize, got: usize },

    #[error("価格表に見つかりません: '{0}'")]
    ItemNotFound(String),

    #[error("有効な価格がありません: {0}")]
    NoValidPricing(String),

    #[error("価格表に有効な行がありません")]
    EmptyCatalog,

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// 呼び出し側の入力エラーか（バッチは実行されない）
    pub fn is_input_error(&self) -> bool {
        matches!(self, Error::EmptyBatch | Error::TooManyKeywords { .. })
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
