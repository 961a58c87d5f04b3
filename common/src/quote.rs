//! 単品見積
//!
//! 最上位のヒット1件について見積値を決める。
//! 「5%」列を優先し、無ければ limite_tabela を使う。

use crate::catalog::CatalogSnapshot;
use crate::error::{Error, Result};
use crate::matcher::match_prepared;
use crate::types::{CatalogRow, PriceSource, Quotation};

/// キーワード1件の見積を取得
pub fn quote(keyword: &str, catalog: Option<&CatalogSnapshot>) -> Result<Quotation> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return Err(Error::EmptyBatch);
    }

    let snapshot = catalog.ok_or_else(|| Error::ItemNotFound(keyword.to_string()))?;
    let best = match_prepared(keyword, snapshot.rows(), snapshot.names())
        .into_iter()
        .next()
        .ok_or_else(|| Error::ItemNotFound(keyword.to_string()))?;

    quotation_for(best.row)
}

/// 行から見積値を決定
pub fn quotation_for(row: &CatalogRow) -> Result<Quotation> {
    let (quotation_value, source) = match row.cinco_porcento.as_ref() {
        Some(cell) if !cell.is_blank() => (cell.value.clone(), PriceSource::CincoPorcento),
        _ if !row.limite_tabela.is_blank() => {
            (row.limite_tabela.value.clone(), PriceSource::LimiteTabela)
        }
        _ => return Err(Error::NoValidPricing(row.product_name.clone())),
    };

    Ok(Quotation {
        item_name: row.product_name.clone(),
        quotation_value,
        source,
        full_item_data: row.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PriceCell;

    fn catalog() -> CatalogSnapshot {
        CatalogSnapshot::from_rows(
            vec![
                CatalogRow {
                    product_name: "THINER 5 LITROS FARBEN".into(),
                    valor_venda: PriceCell::plain("120,00"),
                    limite_sistema: PriceCell::plain("115,00"),
                    limite_tabela: PriceCell::plain("110,00"),
                    cinco_porcento: None,
                },
                CatalogRow {
                    product_name: "ACAB. EMBUTIR PERFIL LED".into(),
                    valor_venda: PriceCell::plain("45,90"),
                    limite_sistema: PriceCell::plain("44,00"),
                    limite_tabela: PriceCell::plain("42,00"),
                    cinco_porcento: Some(PriceCell::plain("39,90")),
                },
                CatalogRow {
                    product_name: "SEM PRECO".into(),
                    ..Default::default()
                },
            ],
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_quote_prefers_cinco_porcento() {
        let catalog = catalog();
        let q = quote("acab embutir", Some(&catalog)).unwrap();
        assert_eq!(q.item_name, "ACAB. EMBUTIR PERFIL LED");
        assert_eq!(q.quotation_value, "39,90");
        assert_eq!(q.source, PriceSource::CincoPorcento);
    }

    #[test]
    fn test_quote_falls_back_to_limite_tabela() {
        let catalog = catalog();
        let q = quote("THINER 5 LITROS", Some(&catalog)).unwrap();
        assert_eq!(q.quotation_value, "110,00");
        assert_eq!(q.source, PriceSource::LimiteTabela);
    }

    #[test]
    fn test_quote_not_found() {
        let catalog = catalog();
        assert!(matches!(quote("NONEXISTENT ITEM", Some(&catalog)), Err(Error::ItemNotFound(_))));
        assert!(matches!(quote("thiner", None), Err(Error::ItemNotFound(_))));
    }

    #[test]
    fn test_quote_without_any_price() {
        let catalog = catalog();
        assert!(matches!(quote("sem preco", Some(&catalog)), Err(Error::NoValidPricing(_))));
    }
}
