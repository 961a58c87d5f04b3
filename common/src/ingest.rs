//! 価格表データの取り込み
//!
//! PDF解析器（外部）が出力した表データを CatalogRow に変換・検証する。
//!
//! 列構成（ヘッダー行は読み飛ばす）:
//! produto, valor_venda, limite_sistema, limite_tabela, cinco_porcento,
//! [valor_venda_cor, limite_sistema_cor, limite_tabela_cor, cinco_porcento_cor]

use crate::error::{Error, Result};
use crate::types::{CatalogRow, CellColor, PriceCell};
use std::collections::HashSet;

/// 必須列の数
pub const REQUIRED_COLUMNS: usize = 5;
const COLOR_OFFSET: usize = REQUIRED_COLUMNS;

/// 色の表記を解釈（不明な表記は None）
pub fn parse_color(text: &str) -> Option<CellColor> {
    match text.trim().to_lowercase().as_str() {
        "" | "none" | "nenhuma" | "sem cor" => Some(CellColor::None),
        "yellow" | "amarelo" | "amarela" => Some(CellColor::Yellow),
        "green" | "verde" => Some(CellColor::Green),
        _ => None,
    }
}

fn color_at(fields: &[&str], idx: usize, product: &str) -> CellColor {
    let raw = fields.get(idx).copied().unwrap_or("");
    parse_color(raw).unwrap_or_else(|| {
        tracing::warn!(product, color = raw, "不明な色指定のため色なしとして扱います");
        CellColor::None
    })
}

/// 1行分のフィールドから CatalogRow を作成
///
/// 列数不足・品名なしは None
pub fn row_from_fields(fields: &[&str]) -> Option<CatalogRow> {
    if fields.len() < REQUIRED_COLUMNS {
        return None;
    }

    let product = fields[0].trim();
    if product.is_empty() {
        return None;
    }

    let cell = |idx: usize| PriceCell::new(fields[idx].trim(), color_at(fields, COLOR_OFFSET + idx - 1, product));

    let cinco = cell(4);
    Some(CatalogRow {
        product_name: product.to_string(),
        valor_venda: cell(1),
        limite_sistema: cell(2),
        limite_tabela: cell(3),
        cinco_porcento: if cinco.is_blank() { None } else { Some(cinco) },
    })
}

/// CSV文字列から行データを読み込み
pub fn rows_from_csv_str(content: &str) -> Result<Vec<CatalogRow>> {
    let mut lines = content.lines();
    let header = lines
        .next()
        .ok_or_else(|| Error::Parse("CSVが空です".into()))?;
    let delimiter = detect_delimiter(header);

    let rows = lines
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let fields = parse_csv_line(line, delimiter);
            let row = row_from_fields(&fields);
            if row.is_none() {
                tracing::debug!(line, "列数不足または品名なしの行をスキップ");
            }
            row
        })
        .collect();

    Ok(rows)
}

/// 行データを検証して整える
///
/// - 品名・価格の前後空白を除去
/// - 品名が空の行は除外
/// - 品名の重複は最初の行を採用
/// - 空の「5%」は「なし」として扱う
pub fn validate_rows(rows: Vec<CatalogRow>) -> Result<Vec<CatalogRow>> {
    let mut seen = HashSet::new();
    let mut valid = Vec::with_capacity(rows.len());

    for mut row in rows {
        row.product_name = row.product_name.trim().to_string();
        if row.product_name.is_empty() {
            tracing::warn!("品名が空の行を除外");
            continue;
        }
        if !seen.insert(row.product_name.clone()) {
            tracing::warn!(product = %row.product_name, "品名が重複しているため後の行を除外");
            continue;
        }

        trim_cell(&mut row.valor_venda);
        trim_cell(&mut row.limite_sistema);
        trim_cell(&mut row.limite_tabela);
        row.cinco_porcento = row.cinco_porcento.take().and_then(|mut cell| {
            trim_cell(&mut cell);
            (!cell.is_blank()).then_some(cell)
        });

        valid.push(row);
    }

    if valid.is_empty() {
        return Err(Error::EmptyCatalog);
    }
    Ok(valid)
}

fn trim_cell(cell: &mut PriceCell) {
    let trimmed = cell.value.trim();
    if trimmed.len() != cell.value.len() {
        cell.value = trimmed.to_string();
    }
}

/// ヘッダー行から区切り文字を推定（; が多ければ ;）
fn detect_delimiter(header: &str) -> char {
    if header.matches(';').count() > header.matches(',').count() {
        ';'
    } else {
        ','
    }
}

/// CSV行をパース（ダブルクォート対応）
fn parse_csv_line(line: &str, delimiter: char) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut in_quotes = false;
    let mut field_start = 0;

    for (i, c) in line.char_indices() {
        if c == '"' {
            in_quotes = !in_quotes;
        } else if c == delimiter && !in_quotes {
            fields.push(trim_quotes(&line[field_start..i]));
            field_start = i + c.len_utf8();
        }
    }

    // 最後のフィールド
    fields.push(trim_quotes(&line[field_start..]));
    fields
}

fn trim_quotes(s: &str) -> &str {
    let s = s.trim();
    if s.starts_with('"') && s.ends_with('"') && s.len() >= 2 {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_CSV: &str = r#"produto,valor_venda,limite_sistema,limite_tabela,cinco_porcento,valor_venda_cor,limite_sistema_cor,limite_tabela_cor,cinco_porcento_cor
"1570.THINER 5 LITROS FARBEN","120,00","115,00","110,00","","verde","","amarelo",""
"ACAB. EMBUTIR PERFIL LED","45,90","44,00","42,00","39,90","","","verde","amarelo"
"","1,00","1,00","1,00","1,00"
"LIXA 100","2,00"
"#;

    #[test]
    fn test_rows_from_csv() {
        let rows = rows_from_csv_str(TEST_CSV).unwrap();
        assert_eq!(rows.len(), 2);

        let thiner = &rows[0];
        assert_eq!(thiner.product_name, "1570.THINER 5 LITROS FARBEN");
        assert_eq!(thiner.valor_venda, PriceCell::new("120,00", CellColor::Green));
        assert_eq!(thiner.limite_tabela.color, CellColor::Yellow);
        assert!(thiner.cinco_porcento.is_none());

        let acab = &rows[1];
        assert_eq!(acab.cinco_porcento, Some(PriceCell::new("39,90", CellColor::Yellow)));
        assert_eq!(acab.limite_tabela.color, CellColor::Green);
    }

    #[test]
    fn test_rows_without_color_columns() {
        let csv = "produto;valor_venda;limite_sistema;limite_tabela;cinco_porcento\nTHINER;10,00;9,00;8,00;7,50\n";
        let rows = rows_from_csv_str(csv).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].limite_tabela, PriceCell::plain("8,00"));
        assert_eq!(rows[0].cinco_porcento, Some(PriceCell::plain("7,50")));
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("VERDE"), Some(CellColor::Green));
        assert_eq!(parse_color(" yellow "), Some(CellColor::Yellow));
        assert_eq!(parse_color(""), Some(CellColor::None));
        assert_eq!(parse_color("azul"), None);
    }

    #[test]
    fn test_unknown_color_is_none() {
        let row = row_from_fields(&["X", "1", "2", "3", "4", "azul"]).unwrap();
        assert_eq!(row.valor_venda.color, CellColor::None);
    }

    #[test]
    fn test_validate_rows_dedupes_and_trims() {
        let rows = vec![
            CatalogRow {
                product_name: " THINER ".into(),
                valor_venda: PriceCell::plain(" 10,00 "),
                cinco_porcento: Some(PriceCell::plain("  ")),
                ..Default::default()
            },
            CatalogRow {
                product_name: "THINER".into(),
                valor_venda: PriceCell::plain("99,00"),
                ..Default::default()
            },
            CatalogRow {
                product_name: "   ".into(),
                ..Default::default()
            },
        ];

        let valid = validate_rows(rows).unwrap();
        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].product_name, "THINER");
        assert_eq!(valid[0].valor_venda.value, "10,00");
        assert!(valid[0].cinco_porcento.is_none());
    }

    #[test]
    fn test_validate_rows_empty() {
        assert!(matches!(validate_rows(vec![]), Err(Error::EmptyCatalog)));
    }

    #[test]
    fn test_parse_csv_line_quotes() {
        let fields = parse_csv_line(r#""A, B","1,00",x"#, ',');
        assert_eq!(fields, vec!["A, B", "1,00", "x"]);
    }
}
