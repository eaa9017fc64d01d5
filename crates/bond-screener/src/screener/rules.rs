//! Name-based heuristics
//!
//! Keyword lists and rule order are fixed; changing them changes which bonds
//! are shown.

use crate::model::{BondRecord, RatingTier};

/// Substrings marking an early redemption (offer) clause
pub const OFFER_KEYWORDS: &[&str] = &["оферта", "оферты", "досрочн", "погашен", "call", "put", "досроч"];

/// Substrings marking amortizing repayment
pub const AMORTIZATION_KEYWORDS: &[&str] = &["аморт", "амортизац", "погашен", "погашени"];

const STATE_CORPORATIONS: &[&str] = &[
    "вэб",
    "ржд",
    "росатом",
    "роснефть",
    "газпром",
    "транснефть",
    "акционерная энергетическая компания",
];

const SYSTEMIC_BANKS: &[&str] = &["сбербанк", "втб"];

const LARGE_CORPORATES: &[&str] = &[
    "газпром",
    "лукойл",
    "сургутнефтегаз",
    "норникель",
    "алроса",
    "мтс",
    "мегафон",
];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

fn names_contain_any(record: &BondRecord, needles: &[&str]) -> bool {
    contains_any(&record.issuer_name.to_lowercase(), needles)
        || contains_any(&record.short_name.to_lowercase(), needles)
}

/// Whether either name mentions an offer
pub fn has_offer(record: &BondRecord) -> bool {
    names_contain_any(record, OFFER_KEYWORDS)
}

/// Whether either name mentions amortization
pub fn has_amortization(record: &BondRecord) -> bool {
    names_contain_any(record, AMORTIZATION_KEYWORDS)
}

/// Assign a tier; the first matching rule wins
pub fn rate(record: &BondRecord) -> RatingTier {
    let issuer = record.issuer_name.to_lowercase();
    let short = record.short_name.to_lowercase();

    if short.contains("офз") || issuer.contains("федеральн") {
        RatingTier::Sovereign
    } else if contains_any(&issuer, STATE_CORPORATIONS) {
        RatingTier::StateCorporation
    } else if contains_any(&issuer, SYSTEMIC_BANKS) {
        RatingTier::SystemicBank
    } else if contains_any(&issuer, LARGE_CORPORATES) {
        RatingTier::LargeCorporate
    } else {
        RatingTier::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(short: &str, issuer: &str) -> BondRecord {
        BondRecord::new("X", short, issuer)
    }

    #[test]
    fn test_sovereign_by_short_name() {
        assert_eq!(rate(&named("ОФЗ-26219", "")), RatingTier::Sovereign);
        assert_eq!(
            rate(&named("ОФЗ 26238", "Министерство финансов")),
            RatingTier::Sovereign
        );
    }

    #[test]
    fn test_sovereign_by_issuer() {
        assert_eq!(
            rate(&named("SU26219", "Федеральный заем 26219")),
            RatingTier::Sovereign
        );
    }

    #[test]
    fn test_gazprom_is_state_corporation_not_large_corporate() {
        // First match wins: газпром appears in both lists
        assert_eq!(
            rate(&named("Газпром 1", "ПАО Газпром БО-001Р-01")),
            RatingTier::StateCorporation
        );
    }

    #[test]
    fn test_bank_and_corporate_tiers() {
        assert_eq!(rate(&named("Сбер", "ПАО Сбербанк 001Р")), RatingTier::SystemicBank);
        assert_eq!(rate(&named("ВТБ Б-1", "Банк ВТБ (ПАО)")), RatingTier::SystemicBank);
        assert_eq!(rate(&named("МТС", "ПАО МТС 001P-08")), RatingTier::LargeCorporate);
        assert_eq!(rate(&named("Ромашка", "ООО Ромашка")), RatingTier::Other);
    }

    #[test]
    fn test_short_name_does_not_drive_corporate_tiers() {
        assert_eq!(rate(&named("Сбербанк", "ООО Ромашка")), RatingTier::Other);
    }

    #[test]
    fn test_offer_detection() {
        assert!(has_offer(&named("Оферта", "")));
        assert!(has_offer(&named("", "Облигации с офертой ОФЕРТЫ")));
        assert!(has_offer(&named("", "Досрочное погашение")));
        assert!(has_offer(&named("CALL 2027", "")));
        assert!(!has_offer(&named("ОФЗ-26219", "ОФЗ-ПД 26219")));
    }

    #[test]
    fn test_amortization_detection() {
        assert!(has_amortization(&named("", "ОФЗ-АД 46020 с амортизацией")));
        assert!(has_amortization(&named("", "частичное погашение")));
        assert!(!has_amortization(&named("ОФЗ-26219", "ОФЗ-ПД 26219")));
    }

    #[test]
    fn test_rating_is_total() {
        for record in [named("", ""), named("???", "!!!"), named("ОФЗ", "мтс")] {
            let tier = rate(&record);
            assert!((1..=5).contains(&tier.ordinal()));
        }
    }
}
