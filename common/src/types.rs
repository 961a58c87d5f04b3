//! 価格表・検索結果の型定義
//!
//! CLIとエンジンで共有される型:
//! - CatalogRow: 価格表の1行（PDF解析済み）
//! - ResolvedPrice: 1行から導出した表示用の価格フィールド
//! - Match / KeywordGroup / BatchResult: キーワード検索の出力

use serde::{Deserialize, Serialize};
use std::fmt;

/// 元PDFでのセルの色
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellColor {
    #[default]
    None,
    Yellow,
    Green,
}

impl CellColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            CellColor::None => "none",
            CellColor::Yellow => "yellow",
            CellColor::Green => "green",
        }
    }
}

impl fmt::Display for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 価格セル（表示用文字列 + 色）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceCell {
    /// 書式付きの金額（例: "120,00"）。元の表記のまま保持する
    pub value: String,
    #[serde(default)]
    pub color: CellColor,
}

impl PriceCell {
    pub fn new(value: impl Into<String>, color: CellColor) -> Self {
        Self {
            value: value.into(),
            color,
        }
    }

    pub fn plain(value: impl Into<String>) -> Self {
        Self::new(value, CellColor::None)
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// 価格表の1行
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRow {
    /// 品名（先頭に品番を含む場合あり: "1570.THINER 5 LITROS FARBEN"）
    pub product_name: String,
    pub valor_venda: PriceCell,
    pub limite_sistema: PriceCell,
    pub limite_tabela: PriceCell,
    /// 「5%」列。行によっては存在しない
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cinco_porcento: Option<PriceCell>,
}

/// 1行から導出した表示用の価格フィールド
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPrice {
    pub valor_venda: PriceCell,
    pub limite_sistema: PriceCell,
    pub limite_tabela: PriceCell,
    pub cinco_porcento_display: String,
    pub cinco_porcento_color: CellColor,
    /// 「5%」が無く limite_tabela で代替したか
    pub fallback_applied: bool,
}

/// 照合の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// 品名全体と一致
    Exact,
    /// 単語の先頭から部分一致
    Boundary,
    /// 単語の途中から部分一致
    Partial,
}

/// キーワード1件 × 価格表1行の照合結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub matched_item_name: String,
    #[serde(flatten)]
    pub prices: ResolvedPrice,
    /// 0〜100
    pub match_score: u8,
    pub match_kind: MatchKind,
    pub is_favorite: bool,
}

impl Match {
    pub fn fallback_applied(&self) -> bool {
        self.prices.fallback_applied
    }
}

/// キーワードごとの結果グループ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordGroup {
    pub keyword: String,
    pub matches: Vec<Match>,
    pub total_matches: usize,
}

impl KeywordGroup {
    pub fn empty(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            matches: Vec::new(),
            total_matches: 0,
        }
    }
}

/// バッチ検索の結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub results: Vec<KeywordGroup>,
    pub total_items_found: usize,
    pub total_keywords: usize,
}

/// 見積値の出所
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceSource {
    #[serde(rename = "5%")]
    CincoPorcento,
    #[serde(rename = "limit")]
    LimiteTabela,
}

impl fmt::Display for PriceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceSource::CincoPorcento => write!(f, "5%"),
            PriceSource::LimiteTabela => write!(f, "limit"),
        }
    }
}

/// 単品見積の結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quotation {
    pub item_name: String,
    pub quotation_value: String,
    pub source: PriceSource,
    pub full_item_data: CatalogRow,
}
