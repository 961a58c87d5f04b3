//! Excel生成（共通ライブラリ）
//!
//! バッチ検索結果を1シートの見積表として出力する。
//! 価格セルは元PDFの色（黄・緑）で塗る。

use crate::types::{BatchResult, CellColor, Match};
use rust_xlsxwriter::*;

const YELLOW: u32 = 0xFFFF00;
const GREEN: u32 = 0x92D050;

const HEADERS: [(&str, f64); 8] = [
    ("Palavra-chave", 22.0),
    ("Item", 48.0),
    ("Valor Venda", 14.0),
    ("Limite Sistema", 14.0),
    ("Limite Tabela", 14.0),
    ("5%", 14.0),
    ("Score", 8.0),
    ("Favorito", 10.0),
];

fn cell_format(base: &Format, color: CellColor) -> Format {
    match color {
        CellColor::None => base.clone(),
        CellColor::Yellow => base.clone().set_background_color(Color::RGB(YELLOW)),
        CellColor::Green => base.clone().set_background_color(Color::RGB(GREEN)),
    }
}

/// 見積表Excelをバッファに生成
pub fn generate_quotation_buffer(result: &BatchResult) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0x333333))
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    let value_format = Format::new()
        .set_align(FormatAlign::Left)
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let price_format = value_format.clone().set_align(FormatAlign::Right);

    let missing_format = value_format
        .clone()
        .set_italic()
        .set_font_color(Color::RGB(0x999999));

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name("Cotacao")
        .map_err(|e| format!("シート名設定エラー: {}", e))?;

    for (col, (title, width)) in HEADERS.iter().enumerate() {
        let col = col as u16;
        worksheet
            .set_column_width(col, *width)
            .map_err(|e| format!("列幅設定エラー: {}", e))?;
        worksheet
            .write_string_with_format(0, col, *title, &header_format)
            .map_err(|e| format!("ヘッダー書き込みエラー: {}", e))?;
    }

    let mut row: u32 = 1;
    for group in &result.results {
        if group.matches.is_empty() {
            worksheet
                .write_string_with_format(row, 0, &group.keyword, &value_format)
                .and_then(|ws| ws.write_string_with_format(row, 1, "Não encontrado", &missing_format))
                .map_err(|e| format!("書き込みエラー: {}", e))?;
            row += 1;
            continue;
        }

        for m in &group.matches {
            write_match(worksheet, row, &group.keyword, m, &value_format, &price_format)
                .map_err(|e| format!("書き込みエラー: {}", e))?;
            row += 1;
        }
    }

    worksheet
        .set_freeze_panes(1, 0)
        .map_err(|e| format!("ウィンドウ枠固定エラー: {}", e))?;

    workbook
        .save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}

fn write_match(
    worksheet: &mut Worksheet,
    row: u32,
    keyword: &str,
    m: &Match,
    value_format: &Format,
    price_format: &Format,
) -> Result<(), XlsxError> {
    let prices = &m.prices;

    worksheet.write_string_with_format(row, 0, keyword, value_format)?;
    worksheet.write_string_with_format(row, 1, &m.matched_item_name, value_format)?;

    let cells = [
        (&prices.valor_venda.value, prices.valor_venda.color),
        (&prices.limite_sistema.value, prices.limite_sistema.color),
        (&prices.limite_tabela.value, prices.limite_tabela.color),
        (&prices.cinco_porcento_display, prices.cinco_porcento_color),
    ];
    for (offset, (value, color)) in cells.into_iter().enumerate() {
        let format = cell_format(price_format, color);
        worksheet.write_string_with_format(row, 2 + offset as u16, value, &format)?;
    }

    worksheet.write_number_with_format(row, 6, f64::from(m.match_score), price_format)?;
    worksheet.write_string_with_format(
        row,
        7,
        if m.is_favorite { "★" } else { "" },
        value_format,
    )?;

    Ok(())
}
