//! キーワード照合モジュール
//!
//! キーワード1件を価格表の全行と照合し、スコア順に並べて返す。
//!
//! ## スコア
//! - 完全一致: 100
//! - 品番を除いた品名との一致: 99（単語先頭一致の最上位）
//! - 単語先頭からの部分一致: 50〜99
//! - 単語途中からの部分一致: 1〜49
//!
//! 部分一致の点数は「品名に占めるキーワード長の割合」と
//! 「一致箇所を単語単位に広げた範囲との類似度」の平均で決まる。
//! 同点は品名の短い順、次に価格表の順。

use crate::text::{find_all, is_token_boundary, normalize, similarity, strip_item_code, widen_to_tokens};
use crate::types::{CatalogRow, MatchKind};
use std::cmp::Ordering;

pub const EXACT_SCORE: u8 = 100;
/// "1570.THINER" に対する "thiner" など
pub const CODE_STRIPPED_SCORE: u8 = EXACT_SCORE - 1;
const BOUNDARY_BASE: f64 = 50.0;
const BOUNDARY_RANGE: f64 = 49.0;
const PARTIAL_BASE: f64 = 1.0;
const PARTIAL_RANGE: f64 = 48.0;

/// 照合用に前処理した品名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedName {
    full: Vec<char>,
    without_code: Option<Vec<char>>,
    /// 元の品名の文字数（同点時の並び順に使用）
    display_len: usize,
}

impl NormalizedName {
    pub fn new(product_name: &str) -> Self {
        let normalized = normalize(product_name);
        let without_code = strip_item_code(&normalized).map(|s| s.chars().collect());
        Self {
            full: normalized.chars().collect(),
            without_code,
            display_len: product_name.chars().count(),
        }
    }
}

/// 照合でヒットした行
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRow<'a> {
    pub row: &'a CatalogRow,
    /// 価格表内の位置
    pub index: usize,
    pub score: u8,
    pub kind: MatchKind,
}

/// 全行の品名を前処理
pub fn prepare_names(rows: &[CatalogRow]) -> Vec<NormalizedName> {
    rows.iter().map(|r| NormalizedName::new(&r.product_name)).collect()
}

/// キーワードを価格表と照合する
///
/// ヒットなしは空のVec（エラーではない）。件数の上限は設けない。
pub fn match_keyword<'a>(keyword: &str, rows: &'a [CatalogRow]) -> Vec<ScoredRow<'a>> {
    let names = prepare_names(rows);
    match_prepared(keyword, rows, &names)
}

/// 前処理済みの品名を使って照合する
///
/// `names` は `rows` と同じ順・同じ長さであること
pub fn match_prepared<'a>(
    keyword: &str,
    rows: &'a [CatalogRow],
    names: &[NormalizedName],
) -> Vec<ScoredRow<'a>> {
    debug_assert_eq!(rows.len(), names.len());

    let needle: Vec<char> = normalize(keyword).chars().collect();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<(ScoredRow<'a>, usize)> = rows
        .iter()
        .zip(names)
        .enumerate()
        .filter_map(|(index, (row, name))| {
            score_name(&needle, name).map(|(score, kind)| {
                (ScoredRow { row, index, score, kind }, name.display_len)
            })
        })
        .collect();

    hits.sort_by(|(a, a_len), (b, b_len)| compare_hits(a, *a_len, b, *b_len));
    hits.into_iter().map(|(hit, _)| hit).collect()
}

fn compare_hits(a: &ScoredRow<'_>, a_len: usize, b: &ScoredRow<'_>, b_len: usize) -> Ordering {
    b.score
        .cmp(&a.score)
        .then(a_len.cmp(&b_len))
        .then(a.index.cmp(&b.index))
}

/// 正規化済みキーワードと品名のスコアを計算（不一致は None）
pub fn score_name(needle: &[char], name: &NormalizedName) -> Option<(u8, MatchKind)> {
    if needle.is_empty() {
        return None;
    }

    if name.full == needle {
        return Some((EXACT_SCORE, MatchKind::Exact));
    }
    if name.without_code.as_deref() == Some(needle) {
        return Some((CODE_STRIPPED_SCORE, MatchKind::Boundary));
    }

    let positions = find_all(&name.full, needle);
    let first = *positions.first()?;

    // 単語先頭での一致を優先
    let (start, kind) = positions
        .iter()
        .find(|&&p| is_token_boundary(&name.full, p))
        .map(|&p| (p, MatchKind::Boundary))
        .unwrap_or((first, MatchKind::Partial));

    let (span_start, span_end) = widen_to_tokens(&name.full, start, start + needle.len());
    let span_similarity = similarity(needle, &name.full[span_start..span_end]);
    let coverage = needle.len() as f64 / name.full.len() as f64;
    let quality = ((coverage + span_similarity) / 2.0).clamp(0.0, 1.0);

    let score = match kind {
        MatchKind::Boundary => BOUNDARY_BASE + (BOUNDARY_RANGE * quality).round(),
        _ => PARTIAL_BASE + (PARTIAL_RANGE * quality).round(),
    };

    Some((score.min(f64::from(EXACT_SCORE - 1)) as u8, kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PriceCell;

    fn row(name: &str) -> CatalogRow {
        CatalogRow {
            product_name: name.to_string(),
            valor_venda: PriceCell::plain("1,00"),
            limite_sistema: PriceCell::plain("1,00"),
            limite_tabela: PriceCell::plain("1,00"),
            cinco_porcento: None,
        }
    }

    fn names(hits: &[ScoredRow<'_>]) -> Vec<String> {
        hits.iter().map(|h| h.row.product_name.clone()).collect()
    }

    fn sample_catalog() -> Vec<CatalogRow> {
        vec![
            row("1570.THINER 5 LITROS FARBEN"),
            row("ACAB. EMBUTIR PERFIL LED"),
            row("THINER"),
            row("SOLVENTE PARATHINER 900ML"),
            row("1600.THINER 18 LITROS FARBEN"),
        ]
    }

    #[test]
    fn test_exact_match_scores_100() {
        let catalog = sample_catalog();
        let hits = match_keyword("thiner", &catalog);
        assert_eq!(hits[0].row.product_name, "THINER");
        assert_eq!(hits[0].score, 100);
        assert_eq!(hits[0].kind, MatchKind::Exact);
    }

    #[test]
    fn test_item_code_stripped_equality_scores_99() {
        let catalog = sample_catalog();
        let hits = match_keyword("THINER 5 LITROS FARBEN", &catalog);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].kind, MatchKind::Boundary);
        assert_eq!(hits[0].score, 99);
        assert_eq!(hits[0].row.product_name, "1570.THINER 5 LITROS FARBEN");
    }

    #[test]
    fn test_full_equality_outranks_code_stripped_equality() {
        let catalog = vec![row("1570.THINER"), row("THINER")];
        let hits = match_keyword("thiner", &catalog);
        assert_eq!(names(&hits), vec!["THINER", "1570.THINER"]);
        assert_eq!((hits[0].score, hits[0].kind), (100, MatchKind::Exact));
        assert_eq!((hits[1].score, hits[1].kind), (99, MatchKind::Boundary));
    }

    #[test]
    fn test_exact_does_not_exclude_partial() {
        let catalog = sample_catalog();
        let hits = match_keyword("thiner", &catalog);
        assert_eq!(hits.len(), 4);
        assert_eq!(hits[0].kind, MatchKind::Exact);
        assert!(hits[1..].iter().all(|h| h.kind != MatchKind::Exact));
    }

    #[test]
    fn test_boundary_ranks_above_mid_word() {
        let catalog = sample_catalog();
        let hits = match_keyword("thiner", &catalog);
        let last = hits.last().unwrap();
        assert_eq!(last.row.product_name, "SOLVENTE PARATHINER 900ML");
        assert_eq!(last.kind, MatchKind::Partial);
        assert!(last.score < 50);
        assert!(hits[1].score >= 50 && hits[1].score < 100);
    }

    #[test]
    fn test_tie_broken_by_shorter_name_then_order() {
        let catalog = vec![row("LIXA 100 XX"), row("LIXA 100 X"), row("LIXA 100 Y")];
        let hits = match_keyword("lixa", &catalog);
        // 同じ長さの "X" と "Y" は価格表の順
        assert_eq!(names(&hits), vec!["LIXA 100 X", "LIXA 100 Y", "LIXA 100 XX"]);
    }

    #[test]
    fn test_case_and_accent_invariance() {
        let catalog = vec![row("THÍNER 5 LITROS"), row("thiner 18 litros"), row("Solução")];
        let a = match_keyword("thiner", &catalog);
        let b = match_keyword("THÍNER", &catalog);
        assert_eq!(a, b);
        assert_eq!(a.len(), 2);
        assert_eq!(match_keyword("SOLUCAO", &catalog).len(), 1);
    }

    #[test]
    fn test_deterministic() {
        let catalog = sample_catalog();
        assert_eq!(match_keyword("litros", &catalog), match_keyword("litros", &catalog));
    }

    #[test]
    fn test_no_match_is_empty() {
        let catalog = sample_catalog();
        assert!(match_keyword("zzz", &catalog).is_empty());
        assert!(match_keyword("   ", &catalog).is_empty());
        assert!(match_keyword("thiner", &[]).is_empty());
    }

    #[test]
    fn test_longer_coverage_scores_higher() {
        let catalog = vec![row("TINTA ACRILICA BRANCA 18L")];
        let short = match_keyword("tinta", &catalog)[0].score;
        let long = match_keyword("tinta acrilica", &catalog)[0].score;
        assert!(long > short);
    }
}
