//! PatternToken Module
//!
//! 日付パターン文字列のトークン定義を提供します。

/// 日付パターンのトークン
///
/// 各フィールドは連続したパターン文字の個数（幅）を保持します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PatternToken {
    /// 紀元（1-3: "AD", 4: "Anno Domini", 5: "A"）
    Era(usize),

    /// 紀元年（"yy" -> 下2桁, それ以外 -> 最低その桁数でゼロ埋め）
    YearOfEra(usize),

    /// 先発グレゴリオ暦の年（紀元前は0以下）
    Year(usize),

    /// 週基準の年（日曜始まり、1月1日を含む週が第1週）
    WeekBasedYear(usize),

    /// 四半期（1-2: 数値, 3: "Q1", 4: "1st quarter", 5: 数値）
    Quarter(usize),

    /// 月（1-2: 数値, 3: 短縮名, 4: 完全名, 5: 頭文字）
    Month(usize),

    /// 日（1-31）
    Day(usize),

    /// 年内通算日（1-366）
    DayOfYear(usize),

    /// 週基準の年における週番号
    WeekOfWeekBasedYear(usize),

    /// 月内の週番号（1日を含む週が第1週）
    WeekOfMonth(usize),

    /// 曜日（1-3: 短縮名, 4: 完全名, 5: 頭文字）
    Weekday(usize),

    /// ローカライズされた曜日（1-2: 日曜日を1とする数値, 3以上: 名前）
    LocalizedWeekday(usize),

    /// 時（0-23）
    Hour(usize),

    /// 時（1-24）
    ClockHour(usize),

    /// 時（1-12）
    HalfDayHour(usize),

    /// 時（0-11）
    HalfDayHourZero(usize),

    /// 分
    Minute(usize),

    /// 秒
    Second(usize),

    /// 秒の小数部（桁数分を切り捨てで出力）
    Fraction(usize),

    /// ナノ秒
    Nano(usize),

    /// 午前・午後（"AM" / "PM"）
    AmPm,

    /// リテラル文字列（例: "-", " ", 引用符で囲まれた文字列）
    Literal(String),
}
