//! Terminal rendering

use bond_screener::RankedBond;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table, presets};
use regex::Regex;
use std::sync::LazyLock;

static TAG: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"</?[a-zA-Z][^>]*>").ok());

/// Ranked bonds as a table
pub fn bonds_table(bonds: &[RankedBond]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            ["#", "SECID", "Название", "Рейтинг", "Купон, %", "Лет", "Выплат/год", "Погашение"]
                .into_iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold)),
        );

    for (i, bond) in bonds.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(bond.id()),
            Cell::new(&bond.record.short_name),
            Cell::new(bond.rating.badge()),
            Cell::new(format!("{:.2}", bond.coupon_percent())).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.1}", bond.years_to_maturity)).set_alignment(CellAlignment::Right),
            Cell::new(bond.coupon_frequency).set_alignment(CellAlignment::Right),
            Cell::new(
                bond.record
                    .maturity_date
                    .map(|d| d.format("%d.%m.%Y").to_string())
                    .unwrap_or_default(),
            ),
        ]);
    }
    table
}

/// Chat HTML reduced to plain terminal text
pub fn strip_html(html: &str) -> String {
    let text = match TAG.as_ref() {
        Some(tag) => tag.replace_all(html, "").into_owned(),
        None => html.to_string(),
    };
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use bond_screener::{BondRecord, RatingTier};

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<b>1. SU26219</b>\n   <i>x</i>"), "1. SU26219\n   x");
        assert_eq!(strip_html("ООО &lt;Ромашка&gt; &amp; Ко"), "ООО <Ромашка> & Ко");
        assert_eq!(strip_html("3 < 5"), "3 < 5");
    }

    #[test]
    fn test_bonds_table() {
        let bond = RankedBond {
            record: BondRecord::new("SU26219RMFS6", "ОФЗ 26219", ""),
            rating: RatingTier::Sovereign,
            coupon_frequency: 2,
            years_to_maturity: 1.9,
            coupon_cash_value: None,
        };
        let rendered = bonds_table(&[bond]).to_string();
        assert!(rendered.contains("SU26219RMFS6"));
        assert!(rendered.contains("1.9"));
    }
}
