//! WMO weather codes and compass helpers

/// Russian description of a WMO weather code
pub fn describe(code: i32) -> &'static str {
    match code {
        0 => "Ясно",
        1 => "Преимущественно ясно",
        2 => "Переменная облачность",
        3 => "Пасмурно",
        45 => "Туман",
        48 => "Изморозь",
        51 => "Лёгкая морось",
        53 => "Умеренная морось",
        55 => "Сильная морось",
        56 => "Ледяная морось",
        57 => "Сильная ледяная морось",
        61 => "Небольшой дождь",
        63 => "Умеренный дождь",
        65 => "Сильный дождь",
        66 => "Ледяной дождь",
        67 => "Сильный ледяной дождь",
        71 => "Небольшой снег",
        73 => "Умеренный снег",
        75 => "Сильный снег",
        77 => "Снежные зерна",
        80 => "Небольшие ливни",
        81 => "Умеренные ливни",
        82 => "Сильные ливни",
        85 => "Небольшой снегопад",
        86 => "Сильный снегопад",
        95 => "Гроза",
        96 => "Гроза с небольшим градом",
        99 => "Гроза с сильным градом",
        _ => "Неизвестно",
    }
}

/// Emoji for a WMO weather code
pub fn emoji(code: i32) -> &'static str {
    match code {
        0 => "☀️",
        3 => "☁️",
        45 | 48 => "🌫️",
        51 | 53 | 55 | 56 | 57 | 61 | 63 | 65 | 66 | 67 | 80 | 81 | 82 => "🌧️",
        71 | 73 | 75 | 77 | 85 | 86 => "❄️",
        95 | 96 | 99 => "⛈️",
        _ => "🌤️",
    }
}

const DIRECTIONS: [&str; 8] = ["С", "СВ", "В", "ЮВ", "Ю", "ЮЗ", "З", "СЗ"];

/// 8-point compass direction; exact half-sectors round to the even sector
pub fn wind_direction(degrees: f64) -> &'static str {
    let sector = (degrees / 45.0).round_ties_even() as i64;
    DIRECTIONS[sector.rem_euclid(8) as usize]
}

/// Description of cloud cover in percent
pub fn cloud_cover(percent: f64) -> &'static str {
    if percent < 10.0 {
        "ясно"
    } else if percent < 30.0 {
        "малооблачно"
    } else if percent < 70.0 {
        "переменная облачность"
    } else if percent < 90.0 {
        "облачно"
    } else {
        "пасмурно"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        assert_eq!(describe(0), "Ясно");
        assert_eq!(describe(63), "Умеренный дождь");
        assert_eq!(describe(99), "Гроза с сильным градом");
        assert_eq!(describe(4), "Неизвестно");
        assert_eq!(describe(-1), "Неизвестно");
    }

    #[test]
    fn test_emoji_groups() {
        assert_eq!(emoji(0), "☀️");
        assert_eq!(emoji(1), "🌤️");
        assert_eq!(emoji(2), "🌤️");
        assert_eq!(emoji(3), "☁️");
        assert_eq!(emoji(48), "🌫️");
        assert_eq!(emoji(80), "🌧️");
        assert_eq!(emoji(86), "❄️");
        assert_eq!(emoji(96), "⛈️");
        assert_eq!(emoji(1000), "🌤️");
    }

    #[test]
    fn test_wind_direction() {
        assert_eq!(wind_direction(0.0), "С");
        assert_eq!(wind_direction(44.0), "СВ");
        assert_eq!(wind_direction(90.0), "В");
        assert_eq!(wind_direction(250.0), "З");
        assert_eq!(wind_direction(350.0), "С");
        assert_eq!(wind_direction(360.0), "С");
    }

    #[test]
    fn test_wind_direction_ties_round_to_even() {
        // 22.5 / 45 = 0.5 -> 0, 67.5 / 45 = 1.5 -> 2
        assert_eq!(wind_direction(22.5), "С");
        assert_eq!(wind_direction(67.5), "В");
        assert_eq!(wind_direction(112.5), "В");
    }

    #[test]
    fn test_cloud_cover() {
        assert_eq!(cloud_cover(0.0), "ясно");
        assert_eq!(cloud_cover(10.0), "малооблачно");
        assert_eq!(cloud_cover(69.9), "переменная облачность");
        assert_eq!(cloud_cover(70.0), "облачно");
        assert_eq!(cloud_cover(100.0), "пасмурно");
    }
}
