//! 照合用テキスト正規化
//!
//! ポルトガル語の価格表を想定し、大文字小文字とアクセント記号の違いを無視する。
//! "THÍNER" と "thiner" は同じ文字列として扱う。
//! 記号（"ACAB." の "." など）は空白とみなす。

use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// 小文字化・アクセント除去・記号の空白化・連続空白の単一化
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 品名先頭の品番を除いた部分を返す
///
/// "1570.thiner 5 litros" → Some("thiner 5 litros")。品番が無ければ None
pub fn strip_item_code(name: &str) -> Option<&str> {
    lazy_static::lazy_static! {
        static ref ITEM_CODE_RE: Regex = Regex::new(r"^\d+\s*[.\-]?\s*").unwrap();
    }

    let m = ITEM_CODE_RE.find(name)?;
    let rest = &name[m.end()..];
    if rest.is_empty() {
        None
    } else {
        Some(rest)
    }
}

/// idx の文字が単語の先頭か
pub fn is_token_boundary(chars: &[char], idx: usize) -> bool {
    idx == 0 || !chars[idx - 1].is_alphanumeric()
}

/// [start, end) を単語単位に広げる
pub fn widen_to_tokens(chars: &[char], start: usize, end: usize) -> (usize, usize) {
    let mut s = start;
    while s > 0 && chars[s - 1].is_alphanumeric() {
        s -= 1;
    }
    let mut e = end;
    while e < chars.len() && chars[e].is_alphanumeric() {
        e += 1;
    }
    (s, e)
}

/// 文字単位で部分文字列を探す（すべての出現位置）
pub fn find_all(haystack: &[char], needle: &[char]) -> Vec<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return Vec::new();
    }
    haystack
        .windows(needle.len())
        .enumerate()
        .filter(|(_, w)| *w == needle)
        .map(|(i, _)| i)
        .collect()
}

/// 類似度を計算（編集距離ベース、0.0〜1.0）
pub fn similarity(a: &[char], b: &[char]) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let distance = levenshtein_distance(a, b);
    let max_len = a.len().max(b.len());

    1.0 - (distance as f64 / max_len as f64)
}

/// レーベンシュタイン距離を計算
fn levenshtein_distance(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // 1行分だけ保持
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_normalize_case_and_accents() {
        assert_eq!(normalize("THÍNER"), "thiner");
        assert_eq!(normalize("Ação Pintura"), "acao pintura");
        assert_eq!(normalize("  VERNIZ   BRILHANTE "), "verniz brilhante");
        assert_eq!(normalize("ACAB. EMBUTIR"), "acab embutir");
        assert_eq!(normalize("1570.THINER"), "1570 thiner");
    }

    #[test]
    fn test_strip_item_code() {
        assert_eq!(strip_item_code("1570.thiner 5 litros farben"), Some("thiner 5 litros farben"));
        assert_eq!(strip_item_code("1570 thiner"), Some("thiner"));
        assert_eq!(strip_item_code("0042 - lixa"), Some("lixa"));
        assert_eq!(strip_item_code("thiner"), None);
        assert_eq!(strip_item_code("1570"), None);
    }

    #[test]
    fn test_token_boundary() {
        let c = chars("1570.thiner 5");
        assert!(is_token_boundary(&c, 0));
        assert!(is_token_boundary(&c, 5)); // '.'の直後
        assert!(!is_token_boundary(&c, 6));
        assert!(is_token_boundary(&c, 12));
    }

    #[test]
    fn test_widen_to_tokens() {
        let c = chars("acab embutir perfil");
        // "but" → "embutir"
        assert_eq!(widen_to_tokens(&c, 7, 10), (5, 12));
    }

    #[test]
    fn test_find_all() {
        assert_eq!(find_all(&chars("abcabc"), &chars("bc")), vec![1, 4]);
        assert!(find_all(&chars("abc"), &chars("")).is_empty());
        assert!(find_all(&chars("ab"), &chars("abc")).is_empty());
    }

    #[test]
    fn test_similarity() {
        assert!((similarity(&chars("thiner"), &chars("thiner")) - 1.0).abs() < 0.01);
        assert!((similarity(&chars("thin"), &chars("thiner")) - 4.0 / 6.0).abs() < 0.01);
        assert_eq!(similarity(&chars(""), &chars("abc")), 0.0);
    }

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance(&chars(""), &chars("abc")), 3);
        assert_eq!(levenshtein_distance(&chars("abc"), &chars("abc")), 0);
        assert_eq!(levenshtein_distance(&chars("kitten"), &chars("sitting")), 3);
    }
}
