//! Weather report rendering

use crate::model::{CurrentWeather, Daily, Hourly};
use crate::wmo;
use bot_core::{FormattedMessage, escape_html};
use chrono::{Datelike, NaiveDate};

const MONTHS: [&str; 12] = [
    "янв", "фев", "мар", "апр", "мая", "июн", "июл", "авг", "сен", "окт", "ноя", "дек",
];
const WEEKDAYS: [&str; 7] = ["пн", "вт", "ср", "чт", "пт", "сб", "вс"];

const RULE: &str = "══════════════════════";
const DAY_RULE: &str = "────────────────";
const FORECAST_DAYS: usize = 3;
const DEFAULT_HUMIDITY: f64 = 50.0;

pub fn render_start() -> FormattedMessage {
    FormattedMessage::plain(
        "👋 Привет! Я погодный бот.\n\n\
         Я показываю актуальную погоду и прогноз.\n\
         Используй команды:\n\
         • /weather - текущая погода\n\
         • /forecast - прогноз на 3 дня\n\
         • /detailed - подробная информация\n\n\
         Для справки используй /help",
    )
}

pub fn render_help() -> FormattedMessage {
    FormattedMessage::html(
        "🌤️ <b>Погодный бот</b>\n\n\
         Доступные команды:\n\
         /start - приветствие\n\
         /help - эта справка\n\
         /weather - текущая погода\n\
         /forecast - прогноз на 3 дня\n\
         /detailed - подробная погода\n",
    )
}

/// Current conditions
pub fn render_current(current: &CurrentWeather, place: &str) -> FormattedMessage {
    let text = format!(
        "{} <b>Погода в {} сейчас</b>\n\
         {RULE}\n\
         🌡 <b>Температура:</b> {:.1}°C\n\
         💨 <b>Ветер:</b> {:.1} м/с {}\n\
         📌 <b>Состояние:</b> {}\n\
         {RULE}\n\
         <i>Данные обновляются каждый час</i>\n\n\
         <i>Используй /forecast для прогноза</i>",
        wmo::emoji(current.weathercode),
        escape_html(place),
        current.temperature,
        current.windspeed,
        wmo::wind_direction(current.winddirection),
        wmo::describe(current.weathercode),
    );
    FormattedMessage::html(text)
}

/// Up to three days of forecast
pub fn render_forecast(daily: &Daily) -> FormattedMessage {
    let mut text = format!("📅 <b>Прогноз погоды на 3 дня</b>\n{RULE}\n");

    for day in 0..daily.days().min(FORECAST_DAYS) {
        let code = daily.weathercode[day];
        text.push_str(&format!(
            "\n📆 <b>{}</b>\n\
             {} {}\n\
             ⬆️  <b>Макс:</b> {:.1}°C\n\
             ⬇️  <b>Мин:</b> {:.1}°C\n\
             💨 <b>Ветер:</b> {:.1} м/с\n\
             🌧 <b>Осадки:</b> {:.1} мм\n\
             {DAY_RULE}\n",
            format_day(&daily.time[day]),
            wmo::emoji(code),
            wmo::describe(code),
            daily.temperature_2m_max[day],
            daily.temperature_2m_min[day],
            daily.wind_max(day),
            daily.precipitation(day),
        ));
    }

    text.push_str("\n<i>Используй /weather для текущей погоды</i>");
    FormattedMessage::html(text)
}

/// Current conditions with approximate humidity
pub fn render_detailed(current: &CurrentWeather, hourly: &Hourly, place: &str) -> FormattedMessage {
    let humidity = hourly.first_humidity().unwrap_or(DEFAULT_HUMIDITY);

    let mut text = format!(
        "{} <b>Подробная погода в {}</b>\n\
         {RULE}\n\
         🌡 <b>Температура:</b> {:.1}°C\n\
         💧 <b>Влажность:</b> ~{:.0}%\n\
         💨 <b>Ветер:</b> {:.1} м/с {}\n",
        wmo::emoji(current.weathercode),
        escape_html(place),
        current.temperature,
        humidity,
        current.windspeed,
        wmo::wind_direction(current.winddirection),
    );
    if let Some(cover) = hourly.first_cloud_cover() {
        text.push_str(&format!(
            "☁️ <b>Облачность:</b> {cover:.0}% ({})\n",
            wmo::cloud_cover(cover)
        ));
    }
    text.push_str(&format!(
        "📌 <b>Состояние:</b> {}\n{RULE}\n<i>Приблизительные данные</i>",
        wmo::describe(current.weathercode)
    ));

    FormattedMessage::html(text)
}

/// `2026-10-16` as `16 окт (пт)`; unparseable dates are shown as is
pub fn format_day(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => format!(
            "{} {} ({})",
            date.day(),
            MONTHS[date.month0() as usize],
            WEEKDAYS[date.weekday().num_days_from_monday() as usize]
        ),
        Err(_) => escape_html(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current() -> CurrentWeather {
        CurrentWeather {
            temperature: 7.25,
            windspeed: 4.0,
            winddirection: 250.0,
            weathercode: 3,
            time: Some("2026-10-16T12:00".to_string()),
        }
    }

    #[test]
    fn test_current_report() {
        let msg = render_current(&current(), "Москве");
        assert!(msg.text.starts_with("☁️ <b>Погода в Москве сейчас</b>\n"));
        assert!(msg.text.contains("💨 <b>Ветер:</b> 4.0 м/с З\n"));
        assert!(msg.text.contains("📌 <b>Состояние:</b> Пасмурно\n"));
    }

    #[test]
    fn test_forecast_bounded_by_data() {
        let daily = Daily {
            time: vec!["2026-10-16".to_string(), "2026-10-17".to_string()],
            temperature_2m_max: vec![9.0, 8.0],
            temperature_2m_min: vec![2.0, 1.0],
            weathercode: vec![0, 61],
            precipitation_sum: Some(vec![Some(0.0), Some(3.2)]),
            windspeed_10m_max: None,
        };
        let msg = render_forecast(&daily);
        assert_eq!(msg.text.matches("📆").count(), 2);
        assert!(msg.text.contains("📆 <b>16 окт (пт)</b>\n☀️ Ясно\n"));
        assert!(msg.text.contains("🌧 <b>Осадки:</b> 3.2 мм\n"));
        assert!(msg.text.contains("💨 <b>Ветер:</b> 0.0 м/с\n"));
    }

    #[test]
    fn test_forecast_caps_at_three_days() {
        let daily = Daily {
            time: (10..15).map(|d| format!("2026-10-{d}")).collect(),
            temperature_2m_max: vec![1.0; 5],
            temperature_2m_min: vec![0.0; 5],
            weathercode: vec![3; 5],
            precipitation_sum: None,
            windspeed_10m_max: None,
        };
        assert_eq!(render_forecast(&daily).text.matches("📆").count(), 3);
    }

    #[test]
    fn test_detailed_humidity_default() {
        let msg = render_detailed(&current(), &Hourly::default(), "Москве");
        assert!(msg.text.contains("💧 <b>Влажность:</b> ~50%\n"));
        assert!(!msg.text.contains("Облачность"));

        let hourly = Hourly {
            time: vec!["2026-10-16T00:00".to_string()],
            relative_humidity_2m: vec![Some(81.0)],
            cloudcover: vec![Some(95.0)],
        };
        let msg = render_detailed(&current(), &hourly, "Москве");
        assert!(msg.text.contains("~81%"));
        assert!(msg.text.contains("☁️ <b>Облачность:</b> 95% (пасмурно)\n"));
    }

    #[test]
    fn test_format_day() {
        assert_eq!(format_day("2026-01-05"), "5 янв (пн)");
        assert_eq!(format_day("2026-05-31"), "31 мая (вс)");
        assert_eq!(format_day("soon"), "soon");
    }
}
