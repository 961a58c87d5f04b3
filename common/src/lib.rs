//! Cotação Common Library
//!
//! 価格表の照合・価格導出エンジン。CLIから使用される型とロジック。
//!
//! 処理の流れ:
//! batch（キーワードごと）→ matcher（照合・スコア）→ resolver（価格導出）
//! → favorites（お気に入り付与）→ BatchResult

pub mod types;
pub mod text;
pub mod error;
pub mod matcher;
pub mod resolver;
pub mod favorites;
pub mod catalog;
pub mod ingest;
pub mod batch;
pub mod quote;
pub mod export;

pub use types::{
    BatchResult, CatalogRow, CellColor, KeywordGroup, Match, MatchKind, PriceCell, PriceSource,
    Quotation, ResolvedPrice,
};
pub use error::{Error, Result};
pub use matcher::{match_keyword, ScoredRow};
pub use resolver::resolve;
pub use favorites::FavoritesRegistry;
pub use catalog::{CatalogSnapshot, CatalogStore};
pub use batch::{prepare_keywords, run_batch, run_request, BatchPolicy, DEFAULT_MAX_KEYWORDS};
pub use quote::quote;
