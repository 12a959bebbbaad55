//! DatePattern Module
//!
//! パイプラインから渡される日付パターン（例: `"yyyy-MM-dd HH:mm:ss.SSS"`）の
//! 構文解析と適用を提供します。

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use std::fmt::Write as _;

use super::tokens::PatternToken;
use crate::error::XlsxToJsonError;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// 日付パターン
///
/// パターン文字列を一度だけトークンに分解し、以後はセルごとに
/// トークン列を適用して文字列を生成します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern {
    /// 元のパターン文字列
    source: String,

    /// パースされたトークン
    tokens: Vec<PatternToken>,
}

impl DatePattern {
    /// パターン文字列をパース
    ///
    /// # 戻り値
    ///
    /// * `Ok(Self)` - パース成功
    /// * `Err(XlsxToJsonError::DatePattern)` - 未知のパターン文字、閉じられていない引用符など
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use chrono::NaiveDate;
    /// use xlsx2json::DatePattern;
    ///
    /// let pattern = DatePattern::parse("dd/MM/yyyy").unwrap();
    /// let dt = NaiveDate::from_ymd_opt(2023, 1, 15).unwrap().and_hms_opt(0, 0, 0).unwrap();
    /// assert_eq!(pattern.format(&dt), "15/01/2023");
    /// ```
    pub fn parse(pattern: &str) -> Result<Self, XlsxToJsonError> {
        let error = |message: String| XlsxToJsonError::DatePattern {
            pattern: pattern.to_string(),
            message,
        };

        let mut tokens = Vec::new();
        let mut chars = pattern.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                '\'' => {
                    // 連続する2つの引用符は引用符そのもの
                    if chars.peek() == Some(&'\'') {
                        chars.next();
                        Self::push_literal(&mut tokens, "'");
                        continue;
                    }

                    let mut quoted = String::new();
                    let mut closed = false;
                    while let Some(c) = chars.next() {
                        if c == '\'' {
                            if chars.peek() == Some(&'\'') {
                                chars.next();
                                quoted.push('\'');
                            } else {
                                closed = true;
                                break;
                            }
                        } else {
                            quoted.push(c);
                        }
                    }
                    if !closed {
                        return Err(error("unterminated quoted literal".to_string()));
                    }
                    Self::push_literal(&mut tokens, &quoted);
                }
                // 省略可能セクションの区切り（書式化時は常に出力）
                '[' | ']' => {}
                '#' | '{' | '}' => {
                    return Err(error(format!("reserved character '{}'", ch)));
                }
                c if c.is_ascii_alphabetic() => {
                    let width = Self::count_consecutive(&mut chars, c) + 1;
                    let token = Self::letter_token(c, width).map_err(error)?;
                    tokens.push(token);
                }
                c => {
                    let mut buf = [0u8; 4];
                    Self::push_literal(&mut tokens, c.encode_utf8(&mut buf));
                }
            }
        }

        Ok(Self {
            source: pattern.to_string(),
            tokens,
        })
    }

    /// 元のパターン文字列
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// パターン文字と幅からトークンを生成
    fn letter_token(letter: char, width: usize) -> Result<PatternToken, String> {
        let too_many = || format!("too many pattern letters '{}'", letter);

        let token = match letter {
            'G' if width <= 5 => PatternToken::Era(width),
            'y' => PatternToken::YearOfEra(width),
            'u' => PatternToken::Year(width),
            'Y' => PatternToken::WeekBasedYear(width),
            'Q' | 'q' if width <= 5 => PatternToken::Quarter(width),
            'M' | 'L' if width <= 5 => PatternToken::Month(width),
            'w' if width <= 2 => PatternToken::WeekOfWeekBasedYear(width),
            'W' if width == 1 => PatternToken::WeekOfMonth(width),
            'd' if width <= 2 => PatternToken::Day(width),
            'D' if width <= 3 => PatternToken::DayOfYear(width),
            'E' if width <= 5 => PatternToken::Weekday(width),
            'e' if width <= 5 => PatternToken::LocalizedWeekday(width),
            // 単独形の数値は1桁のみ
            'c' if width != 2 && width <= 5 => PatternToken::LocalizedWeekday(width),
            'H' if width <= 2 => PatternToken::Hour(width),
            'k' if width <= 2 => PatternToken::ClockHour(width),
            'h' if width <= 2 => PatternToken::HalfDayHour(width),
            'K' if width <= 2 => PatternToken::HalfDayHourZero(width),
            'm' if width <= 2 => PatternToken::Minute(width),
            's' if width <= 2 => PatternToken::Second(width),
            'S' if width <= 9 => PatternToken::Fraction(width),
            'n' => PatternToken::Nano(width),
            'a' if width == 1 => PatternToken::AmPm,
            'G' | 'Q' | 'q' | 'M' | 'L' | 'w' | 'W' | 'd' | 'D' | 'E' | 'e' | 'c' | 'H' | 'k'
            | 'h' | 'K' | 'm' | 's' | 'S' | 'a' => return Err(too_many()),
            _ => return Err(format!("unknown pattern letter '{}'", letter)),
        };
        Ok(token)
    }

    /// 直前のリテラルと連結してリテラルを追加
    fn push_literal(tokens: &mut Vec<PatternToken>, text: &str) {
        if let Some(PatternToken::Literal(last)) = tokens.last_mut() {
            last.push_str(text);
        } else {
            tokens.push(PatternToken::Literal(text.to_string()));
        }
    }

    /// 連続する同じ文字をカウント
    fn count_consecutive<I>(chars: &mut std::iter::Peekable<I>, target: char) -> usize
    where
        I: Iterator<Item = char>,
    {
        let mut count = 0;
        while chars.peek().is_some_and(|&c| c == target) {
            chars.next();
            count += 1;
        }
        count
    }

    /// 日時をフォーマット
    pub fn format(&self, datetime: &NaiveDateTime) -> String {
        let mut result = String::new();
        for token in &self.tokens {
            // Stringへの書き込みは失敗しない
            let _ = Self::write_token(&mut result, token, datetime);
        }
        result
    }

    fn write_token(
        out: &mut String,
        token: &PatternToken,
        datetime: &NaiveDateTime,
    ) -> std::fmt::Result {
        match token {
            PatternToken::Era(width) => {
                let (is_ce, _) = datetime.year_ce();
                let text = match (width, is_ce) {
                    (4, true) => "Anno Domini",
                    (4, false) => "Before Christ",
                    (5, true) => "A",
                    (5, false) => "B",
                    (_, true) => "AD",
                    (_, false) => "BC",
                };
                out.write_str(text)
            }
            PatternToken::YearOfEra(width) => {
                let (_, year) = datetime.year_ce();
                write_year(out, i64::from(year), *width)
            }
            PatternToken::Year(width) => write_year(out, i64::from(datetime.year()), *width),
            PatternToken::WeekBasedYear(width) => {
                let (year, _) = week_of_week_based_year(datetime.date());
                write_year(out, i64::from(year), *width)
            }
            PatternToken::Quarter(width) => {
                let quarter = datetime.month0() / 3 + 1;
                match width {
                    3 => write!(out, "Q{}", quarter),
                    4 => {
                        let ordinal = ["1st", "2nd", "3rd", "4th"][quarter as usize - 1];
                        write!(out, "{} quarter", ordinal)
                    }
                    5 => write!(out, "{}", quarter),
                    _ => write!(out, "{:0width$}", quarter, width = width),
                }
            }
            PatternToken::Month(width) => {
                let month = datetime.month();
                let name = MONTH_NAMES[datetime.month0() as usize];
                match width {
                    1 | 2 => write!(out, "{:0width$}", month, width = width),
                    3 => out.write_str(&name[..3]),
                    4 => out.write_str(name),
                    _ => out.write_str(&name[..1]),
                }
            }
            PatternToken::Day(width) => write!(out, "{:0width$}", datetime.day(), width = width),
            PatternToken::DayOfYear(width) => {
                write!(out, "{:0width$}", datetime.ordinal(), width = width)
            }
            PatternToken::WeekOfWeekBasedYear(width) => {
                let (_, week) = week_of_week_based_year(datetime.date());
                write!(out, "{:0width$}", week, width = width)
            }
            PatternToken::WeekOfMonth(width) => {
                let first_weekday = (datetime.weekday().num_days_from_sunday() + 35
                    - (datetime.day0() % 7))
                    % 7;
                let week = (datetime.day0() + first_weekday) / 7 + 1;
                write!(out, "{:0width$}", week, width = width)
            }
            PatternToken::Weekday(width) => {
                let name = WEEKDAY_NAMES[datetime.weekday().num_days_from_monday() as usize];
                match width {
                    4 => out.write_str(name),
                    5 => out.write_str(&name[..1]),
                    _ => out.write_str(&name[..3]),
                }
            }
            PatternToken::LocalizedWeekday(width) => {
                let weekday = datetime.weekday();
                match width {
                    1 | 2 => write!(
                        out,
                        "{:0width$}",
                        weekday.num_days_from_sunday() + 1,
                        width = width
                    ),
                    _ => Self::write_token(out, &PatternToken::Weekday(*width), datetime),
                }
            }
            PatternToken::Hour(width) => write!(out, "{:0width$}", datetime.hour(), width = width),
            PatternToken::ClockHour(width) => {
                let hour = match datetime.hour() {
                    0 => 24,
                    h => h,
                };
                write!(out, "{:0width$}", hour, width = width)
            }
            PatternToken::HalfDayHour(width) => {
                let hour = match datetime.hour() % 12 {
                    0 => 12,
                    h => h,
                };
                write!(out, "{:0width$}", hour, width = width)
            }
            PatternToken::HalfDayHourZero(width) => {
                write!(out, "{:0width$}", datetime.hour() % 12, width = width)
            }
            PatternToken::Minute(width) => {
                write!(out, "{:0width$}", datetime.minute(), width = width)
            }
            PatternToken::Second(width) => {
                write!(out, "{:0width$}", datetime.second(), width = width)
            }
            PatternToken::Fraction(width) => {
                // うるう秒表現（1_000_000_000以上）は秒の小数部に含めない
                let nanos = datetime.nanosecond() % 1_000_000_000;
                let digits = format!("{:09}", nanos);
                out.write_str(&digits[..*width])
            }
            PatternToken::Nano(width) => {
                let nanos = datetime.nanosecond() % 1_000_000_000;
                write!(out, "{:0width$}", nanos, width = width)
            }
            PatternToken::AmPm => out.write_str(if datetime.hour() < 12 { "AM" } else { "PM" }),
            PatternToken::Literal(text) => out.write_str(text),
        }
    }
}

/// 年を出力（幅2は下2桁、それ以外は最低その桁数でゼロ埋め）
fn write_year(out: &mut String, year: i64, width: usize) -> std::fmt::Result {
    if width == 2 {
        write!(out, "{:02}", year.rem_euclid(100))
    } else {
        write!(out, "{:0width$}", year, width = width)
    }
}

/// 週基準の年と週番号
///
/// 週は日曜日に始まり、1月1日を含む週がその年の第1週になります。
/// 週の土曜日が属する年が週基準の年です。
fn week_of_week_based_year(date: NaiveDate) -> (i32, u32) {
    let to_saturday = 6 - i64::from(date.weekday().num_days_from_sunday());
    let saturday = date
        .checked_add_signed(Duration::days(to_saturday))
        .unwrap_or(date);
    (saturday.year(), saturday.ordinal0() / 7 + 1)
}
