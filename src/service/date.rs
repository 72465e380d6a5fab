use crate::error::DateError;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeDelta};

/// 法语月份缩写 (下标即月份序号，0 = 一月)
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan.", "fév.", "mar.", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.", "déc.",
];

/// 可排序的日期；无法解析的日期排在所有有效日期之前 (降序时位于末尾)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OrderableDate {
    Invalid,
    Valid(NaiveDate),
}

/// 把账单的显示日期转换为可比较的日期
///
/// 支持 "YYYY-MM-DD" 与 "DD mon. YY" 两种格式：
/// - 年份一律加 2000 ("19 nov. 2021" 会得到 4021 年)
/// - 未知的月份缩写按一月处理
/// - 日期溢出顺延到下个月 ("31 fév. 21" => 2021-03-03)
/// - 其余字符串交给通用解析，失败时返回 `OrderableDate::Invalid`
pub fn normalize(input: &str) -> OrderableDate {
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return OrderableDate::Valid(date);
    }

    let parts: Vec<&str> = input.split(' ').collect();
    if parts.len() != 3 {
        return parse_generic(input);
    }

    let (Some(day), Some(year)) = (parse_int_prefix(parts[0]), parse_int_prefix(parts[2])) else {
        return OrderableDate::Invalid;
    };
    let month0 = month_index(parts[1]).unwrap_or(0);

    year.checked_add(2000)
        .and_then(|year| calendar_date(year, month0, day))
        .map(OrderableDate::Valid)
        .unwrap_or(OrderableDate::Invalid)
}

/// 格式化为 "D mon. YY" (例如 "19 nov. 21")
pub fn format_display(input: &str) -> Result<String, DateError> {
    match normalize(input) {
        OrderableDate::Valid(date) => Ok(format!(
            "{} {} {:02}",
            date.day(),
            MONTH_ABBREVIATIONS[date.month0() as usize],
            date.year().rem_euclid(100)
        )),
        OrderableDate::Invalid => Err(DateError::Unparseable(input.to_string())),
    }
}

/// 月份缩写查表 (忽略大小写)
pub fn month_index(abbrev: &str) -> Option<u32> {
    let lower = abbrev.to_lowercase();
    MONTH_ABBREVIATIONS
        .iter()
        .position(|m| *m == lower)
        .map(|idx| idx as u32)
}

/// 整数前缀解析: 允许前导空白和符号，之后至少一位数字，其余字符忽略
pub(crate) fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_len = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits_len == 0 {
        return None;
    }
    let value: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// 宽松构造日历日期，天数溢出时顺延 (第 0 天为上月最后一天)
fn calendar_date(year: i64, month0: u32, day: i64) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month0 + 1, 1)?;
    let offset = TimeDelta::try_days(day.checked_sub(1)?)?;
    first.checked_add_signed(offset)
}

fn parse_generic(input: &str) -> OrderableDate {
    let s = input.trim();

    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return OrderableDate::Valid(date);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return OrderableDate::Valid(dt.naive_local().date());
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return OrderableDate::Valid(dt.date());
        }
    }

    OrderableDate::Invalid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> OrderableDate {
        OrderableDate::Valid(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn iso_and_localized_forms_agree() {
        assert_eq!(normalize("2021-11-19"), ymd(2021, 11, 19));
        assert_eq!(normalize("19 nov. 21"), ymd(2021, 11, 19));
    }

    #[test]
    fn month_lookup_ignores_case() {
        assert_eq!(normalize("4 Avr. 04"), ymd(2004, 4, 4));
        assert_eq!(normalize("1 DÉC. 22"), ymd(2022, 12, 1));
        assert_eq!(normalize("15 mai 23"), ymd(2023, 5, 15));
    }

    #[test]
    fn unknown_month_defaults_to_january() {
        assert_eq!(normalize("19 xyz. 21"), ymd(2021, 1, 19));
        assert_eq!(normalize("3 Jui. 21"), ymd(2021, 1, 3));
    }

    #[test]
    fn four_digit_year_still_gets_2000_added() {
        assert_eq!(normalize("19 nov. 2021"), ymd(4021, 11, 19));
    }

    #[test]
    fn day_overflow_rolls_into_next_month() {
        assert_eq!(normalize("31 fév. 21"), ymd(2021, 3, 3));
        assert_eq!(normalize("0 mar. 24"), ymd(2024, 2, 29));
    }

    #[test]
    fn integer_prefix_parsing() {
        assert_eq!(normalize("19th nov. 21"), ymd(2021, 11, 19));
        assert_eq!(normalize("x nov. 21"), OrderableDate::Invalid);
        assert_eq!(normalize("19 nov. ''"), OrderableDate::Invalid);
    }

    #[test]
    fn generic_fallback() {
        assert_eq!(normalize("2021/11/19"), ymd(2021, 11, 19));
        assert_eq!(normalize("2021-11-19T10:30:00+02:00"), ymd(2021, 11, 19));
        assert_eq!(normalize("2021-11-19T23:59"), ymd(2021, 11, 19));
        assert_eq!(normalize("date-invalide"), OrderableDate::Invalid);
        assert_eq!(normalize(""), OrderableDate::Invalid);
        // 两个空格 => 四段，走通用解析
        assert_eq!(normalize("19  nov. 21"), OrderableDate::Invalid);
    }

    #[test]
    fn invalid_sorts_before_any_valid_date() {
        assert!(OrderableDate::Invalid < ymd(1970, 1, 1));
        assert!(ymd(2001, 1, 1) < ymd(2001, 1, 2));
    }

    #[test]
    fn format_display_uses_month_table() {
        assert_eq!(format_display("2021-11-19").unwrap(), "19 nov. 21");
        assert_eq!(format_display("2004-04-04").unwrap(), "4 avr. 04");
        assert_eq!(format_display("2023-05-01").unwrap(), "1 mai 23");
        assert_eq!(format_display("19 nov. 21").unwrap(), "19 nov. 21");
    }

    #[test]
    fn format_display_round_trips_through_normalize() {
        let shown = format_display("2022-08-15").unwrap();
        assert_eq!(shown, "15 août 22");
        assert_eq!(normalize(&shown), ymd(2022, 8, 15));
    }

    #[test]
    fn format_display_drops_the_century() {
        let shown = format_display("1999-12-31").unwrap();
        assert_eq!(shown, "31 déc. 99");
        // 重新解析时按 2000 + 年份，落在 2099 年
        assert_eq!(normalize(&shown), ymd(2099, 12, 31));
        assert!(normalize(&shown) > normalize("2021-11-19"));
    }

    #[test]
    fn format_display_rejects_garbage() {
        assert_eq!(
            format_display("date-invalide"),
            Err(DateError::Unparseable("date-invalide".to_string()))
        );
    }
}
