//! 検索結果のコンソール表示

use crate::app::CatalogStatus;
use cotacao_common::{BatchResult, CatalogRow, CellColor, KeywordGroup, Match, PriceCell, Quotation};

/// 色付きの値を表示用に整形（例: "110,00 [verde]"）
fn colored(value: &str, color: CellColor) -> String {
    let value = if value.is_empty() { "-" } else { value };
    match color {
        CellColor::None => value.to_string(),
        CellColor::Yellow => format!("{} [amarelo]", value),
        CellColor::Green => format!("{} [verde]", value),
    }
}

fn cell(cell: &PriceCell) -> String {
    colored(&cell.value, cell.color)
}

pub fn print_batch(result: &BatchResult, display_limit: Option<usize>) {
    for group in &result.results {
        print_group(group, display_limit);
    }

    println!(
        "\n✔ {}件のキーワードで {}件ヒット",
        result.total_keywords, result.total_items_found
    );
}

fn print_group(group: &KeywordGroup, display_limit: Option<usize>) {
    println!("\n🔍 {} ({}件)", group.keyword, group.total_matches);

    if group.matches.is_empty() {
        println!("  見つかりません");
        return;
    }

    let limit = display_limit.unwrap_or(group.matches.len());
    for m in group.matches.iter().take(limit) {
        print_match(m);
    }

    if group.matches.len() > limit {
        println!("  ... 他 {}件", group.matches.len() - limit);
    }
}

fn print_match(m: &Match) {
    let prices = &m.prices;
    let star = if m.is_favorite { "★ " } else { "" };
    println!("  {}{} (score: {})", star, m.matched_item_name, m.match_score);
    println!(
        "    Valor Venda: {} | Limite Sistema: {} | Limite Tabela: {} | 5%: {}{}",
        cell(&prices.valor_venda),
        cell(&prices.limite_sistema),
        cell(&prices.limite_tabela),
        colored(&prices.cinco_porcento_display, prices.cinco_porcento_color),
        if prices.fallback_applied { " (Limite Tabela)" } else { "" },
    );
}

pub fn print_quotation(q: &Quotation) {
    println!("💰 {}", q.item_name);
    println!("  見積値: {} (source: {})", q.quotation_value, q.source);
}

pub fn print_items(rows: &[CatalogRow], total: usize) {
    for row in rows {
        let cinco = row
            .cinco_porcento
            .as_ref()
            .map(cell)
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{} | {} | {} | {} | {}",
            row.product_name,
            cell(&row.valor_venda),
            cell(&row.limite_sistema),
            cell(&row.limite_tabela),
            cinco
        );
    }
    println!("\n{} / {}件を表示", rows.len(), total);
}

pub fn print_status(status: &CatalogStatus) {
    if !status.loaded {
        println!("価格表: 未読み込み");
        return;
    }

    println!("価格表: 読み込み済み");
    println!("  件数: {}", status.items_count);
    if let Some(source) = &status.source {
        println!("  ファイル: {}", source);
    }
    if let Some(at) = &status.uploaded_at {
        println!("  取込日時: {}", at.to_rfc3339());
    }
    if let Some(fp) = &status.fingerprint {
        println!("  SHA-256: {}", fp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colored() {
        assert_eq!(colored("110,00", CellColor::Green), "110,00 [verde]");
        assert_eq!(colored("110,00", CellColor::Yellow), "110,00 [amarelo]");
        assert_eq!(colored("110,00", CellColor::None), "110,00");
        assert_eq!(colored("", CellColor::None), "-");
    }
}
