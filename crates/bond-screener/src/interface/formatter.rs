//! Message rendering for the bond bot
//!
//! Every function here is pure: same input, byte-identical output. Callback
//! ids produced here are decoded by [`crate::bot::BondAction::parse`].

use crate::model::{BondDetail, RankedBond};
use bot_core::{FormattedMessage, escape_html, truncate_chars};

pub const ACTION_REFRESH: &str = "refresh";
pub const ACTION_BACK: &str = "back_to_list";
pub const ACTION_SELECT_PREFIX: &str = "bond_";

pub const REFRESH_LABEL: &str = "🔄 Обновить данные";
pub const BACK_LABEL: &str = "🔙 Назад к списку";

pub const LOADING_LIST: &str = "⏳ Загружаю данные с Московской биржи...";
pub const REFRESHING_LIST: &str = "⏳ Обновляю данные с Московской биржи...";
pub const FETCH_FAILED: &str = "❌ Ошибка загрузки данных. Попробуйте позже.";
pub const NO_MATCHES: &str = "❌ Не найдено облигаций, соответствующих критериям.";
pub const STALE_LIST: &str = "❌ Данные устарели. Используйте /bonds";
pub const NOT_IN_LIST: &str = "❌ Облигация не найдена в списке.";

const SHORT_NAME_LIMIT: usize = 28;
const ISSUER_LIMIT: usize = 60;
const NOT_AVAILABLE: &str = "N/A";

pub fn loading_detail(id: &str) -> String {
    format!("⏳ Загружаю информацию о {}...", escape_html(id))
}

pub fn select_action(id: &str) -> String {
    format!("{ACTION_SELECT_PREFIX}{id}")
}

/// Welcome text for `/start`
pub fn render_welcome(top_n: usize) -> FormattedMessage {
    FormattedMessage::html(format!(
        "🤖 <b>Бот надёжных облигаций Мосбиржи</b>\n\n\
         Я помогу вам найти самые надёжные облигации без оферты и амортизации.\n\n\
         📊 <b>Что я умею:</b>\n\
         • Показывать топ-{top_n} надёжных облигаций\n\
         • Отображать ключевые параметры: доходность, срок, рейтинг\n\
         • Давать подробную информацию по каждой бумаге\n\n\
         💼 <b>Критерии отбора:</b>\n\
         ✓ Без оферты\n\
         ✓ Без амортизации\n\
         ✓ Высокая ликвидность (1-й уровень листинга)\n\
         ✓ Объём выпуска от 1 млрд ₽\n\n\
         👉 Используйте команду /bonds чтобы начать!"
    ))
}

/// Command list for `/help`
pub fn render_help() -> FormattedMessage {
    FormattedMessage::html(
        "📖 <b>Команды бота:</b>\n\n\
         /start - приветствие и описание\n\
         /bonds - топ надёжных облигаций\n\
         /help - эта справка\n\n\
         Нажмите на облигацию в списке, чтобы увидеть подробности.",
    )
}

/// Plain apology with nothing to press
pub fn render_error(text: &str) -> FormattedMessage {
    FormattedMessage::plain(text)
}

/// Ranked list with one button per bond
pub fn render_summary(bonds: &[RankedBond]) -> FormattedMessage {
    if bonds.is_empty() {
        return FormattedMessage::plain(NO_MATCHES).with_action(REFRESH_LABEL, ACTION_REFRESH);
    }

    let mut text = format!("🔝 <b>Топ {} надёжных облигаций</b>\n\n", bonds.len());
    text.push_str("<i>✅ Без оферты | ✅ Без амортизации | ✅ Высокая ликвидность</i>\n\n");

    for (i, bond) in bonds.iter().enumerate() {
        text.push_str(&format!(
            "<b>{}. {}</b>\n   {}\n   {} | {:.2}% | {:.1}г | {}×/год\n\n",
            i + 1,
            escape_html(bond.id()),
            escape_html(&truncate_chars(&bond.record.short_name, SHORT_NAME_LIMIT)),
            bond.rating.badge(),
            bond.coupon_percent(),
            bond.years_to_maturity,
            bond.coupon_frequency,
        ));
    }
    text.push_str("👉 <i>Выберите облигацию для подробной информации:</i>");

    bonds
        .iter()
        .enumerate()
        .fold(FormattedMessage::html(text), |msg, (i, bond)| {
            msg.with_action(
                format!("{}. {} ({:.1}%)", i + 1, bond.id(), bond.coupon_percent()),
                select_action(bond.id()),
            )
        })
        .with_action(REFRESH_LABEL, ACTION_REFRESH)
}

/// Detail card for one bond
pub fn render_detail(bond: &RankedBond, detail: &BondDetail) -> FormattedMessage {
    let record = &bond.record;
    let mut text = format!("📜 <b>Облигация: {}</b>\n\n", escape_html(bond.id()));

    text.push_str(&format!(
        "📌 <b>Название:</b> {}\n",
        escape_html(&record.short_name)
    ));
    text.push_str(&format!(
        "🏢 <b>Эмитент:</b> {}\n",
        escape_html(&truncate_chars(&record.issuer_name, ISSUER_LIMIT))
    ));
    text.push_str(&format!("⭐ <b>Рейтинг:</b> {}\n\n", bond.rating.label()));

    text.push_str("💵 <b>Купонные характеристики:</b>\n");
    text.push_str(&format!(
        "   • Доходность: {:.2}% годовых\n",
        bond.coupon_percent()
    ));
    text.push_str(&format!(
        "   • Размер купона: {} ₽\n",
        bond.coupon_cash_value
            .map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("{v:.2}"))
    ));
    text.push_str(&format!(
        "   • Выплат в году: {} раз(а)\n",
        bond.coupon_frequency
    ));
    text.push_str(&format!(
        "   • Период: каждые {} дней\n\n",
        record.coupon_period_days.unwrap_or_default()
    ));

    text.push_str("⏳ <b>Срок обращения:</b>\n");
    text.push_str(&format!(
        "   • Погашение: {}\n",
        record
            .maturity_date
            .map_or_else(|| NOT_AVAILABLE.to_string(), |d| d.format("%d.%m.%Y").to_string())
    ));
    text.push_str(&format!(
        "   • До погашения: {:.1} года(лет)\n\n",
        bond.years_to_maturity
    ));

    text.push_str("💼 <b>Финансовые параметры:</b>\n");
    text.push_str(&format!(
        "   • Объём выпуска: {} ₽\n",
        record
            .issue_size
            .map_or_else(|| NOT_AVAILABLE.to_string(), format_thousands)
    ));
    text.push_str(&format!(
        "   • Номинал: {} {}\n",
        record
            .face_value
            .map_or_else(|| NOT_AVAILABLE.to_string(), format_amount),
        escape_html(record.currency.as_deref().unwrap_or_default())
    ));
    text.push_str(&format!(
        "   • Текущая доходность: {:.2}%\n\n",
        record.yield_close.unwrap_or(bond.coupon_percent())
    ));

    let extras = render_extras(detail);
    if !extras.is_empty() {
        text.push_str("📋 <b>Дополнительная информация:</b>\n");
        text.push_str(&extras);
        text.push('\n');
    }

    text.push_str("<i>ℹ️ Информация предоставлена Московской биржей (MOEX)</i>");

    FormattedMessage::html(text)
        .with_action(BACK_LABEL, ACTION_BACK)
        .with_action(REFRESH_LABEL, ACTION_REFRESH)
}

fn render_extras(detail: &BondDetail) -> String {
    let mut extras = String::new();
    if let Some(isin) = detail.get("ISIN") {
        extras.push_str(&format!("   • ISIN: {}\n", escape_html(isin)));
    }
    if let Some(issued) = detail.get("ISSUEDATE") {
        extras.push_str(&format!("   • Дата выпуска: {}\n", escape_html(issued)));
    }
    if let Some((date, value)) = detail.next_coupon() {
        extras.push_str(&format!(
            "   • Следующий купон: {} ({} ₽)\n",
            escape_html(date),
            escape_html(value)
        ));
    }
    extras
}

/// Whole number with space-separated thousands: `350 000 000 000`
pub fn format_thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Amount without a trailing `.0` for whole values
pub fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
