//! 価格フィールド導出モジュール
//!
//! 価格表の1行から表示用の4項目（valor_venda / limite_sistema /
//! limite_tabela / 5%）を導出する。I/Oや共有状態を持たない純粋関数。
//!
//! 「5%」列が無い行は limite_tabela の値で代替する。このとき
//! limite_tabela が緑なら緑、それ以外は色なしで表示する。

use crate::types::{CatalogRow, CellColor, PriceCell, ResolvedPrice};

/// 1行から表示用の価格フィールドを導出
pub fn resolve(row: &CatalogRow) -> ResolvedPrice {
    let (cinco_porcento_display, cinco_porcento_color, fallback_applied) =
        match row.cinco_porcento.as_ref() {
            Some(cell) => (cell.value.clone(), cell.color, false),
            None => (
                row.limite_tabela.value.clone(),
                fallback_color(&row.limite_tabela),
                true,
            ),
        };

    ResolvedPrice {
        valor_venda: row.valor_venda.clone(),
        limite_sistema: row.limite_sistema.clone(),
        limite_tabela: row.limite_tabela.clone(),
        cinco_porcento_display,
        cinco_porcento_color,
        fallback_applied,
    }
}

/// 代替時の表示色（元の「5%」が無いので緑以外は色なし）
fn fallback_color(limite_tabela: &PriceCell) -> CellColor {
    match limite_tabela.color {
        CellColor::Green => CellColor::Green,
        _ => CellColor::None,
    }
}
