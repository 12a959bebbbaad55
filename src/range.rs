//! Range Module
//!
//! `"A1:B10"`形式の範囲指定を列・行の座標に変換するモジュール。

use std::fmt;
use std::str::FromStr;

use crate::error::XlsxToJsonError;

/// 抽出対象の矩形範囲
///
/// 列は0始まり、行は1始まり（範囲指定の表記どおり）で保持します。
/// 開始 ≤ 終了 の検証は行いません。逆順の範囲は空の結果になります。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeSpec {
    /// 開始列（0始まり）
    pub col_start: u32,
    /// 終了列（0始まり、含む）
    pub col_end: u32,
    /// 開始行（1始まり、含む）
    pub row_start: u32,
    /// 終了行（1始まり、含む）
    pub row_end: u32,
}

impl RangeSpec {
    /// 範囲指定をパースする
    ///
    /// 各セル参照から英字以外を取り除いたものを列、数字以外を取り除いたものを
    /// 行番号として扱います。そのため`"$A$1:$B$10"`もそのまま受け付けます。
    ///
    /// # 戻り値
    ///
    /// * `Ok(RangeSpec)` - パース成功
    /// * `Err(XlsxToJsonError::RangeFormat)` - `':'`の欠落、列文字なし、行番号不正
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use xlsx2json::RangeSpec;
    ///
    /// let range = RangeSpec::parse("A1:AA10").unwrap();
    /// assert_eq!((range.col_start, range.col_end), (0, 26));
    /// assert_eq!((range.row_start, range.row_end), (1, 10));
    /// ```
    pub fn parse(expression: &str) -> Result<Self, XlsxToJsonError> {
        let mut parts = expression.split(':');
        let (start, end) = match (parts.next(), parts.next(), parts.next()) {
            (Some(start), Some(end), None) => (start, end),
            (_, None, _) => {
                return Err(XlsxToJsonError::RangeFormat(format!(
                    "missing ':' in '{}'",
                    expression
                )))
            }
            _ => {
                return Err(XlsxToJsonError::RangeFormat(format!(
                    "expected exactly one ':' in '{}'",
                    expression
                )))
            }
        };

        let (col_start, row_start) = parse_cell_reference(start)?;
        let (col_end, row_end) = parse_cell_reference(end)?;

        Ok(Self {
            col_start,
            col_end,
            row_start,
            row_end,
        })
    }

    /// 範囲の列数（逆順の場合は0）
    pub fn width(&self) -> usize {
        span(self.col_start, self.col_end)
    }

    /// 範囲の行数（逆順の場合は0）
    pub fn height(&self) -> usize {
        span(self.row_start, self.row_end)
    }

    /// 先頭行を除いた範囲（ヘッダー行を消費した後のデータ範囲）
    ///
    /// 先頭行が `u32::MAX` の場合は次の行が存在しないため、行数0の範囲を返します。
    pub(crate) fn without_first_row(&self) -> Self {
        match self.row_start.checked_add(1) {
            Some(row_start) => Self { row_start, ..*self },
            None => Self {
                row_end: self.row_start - 1,
                ..*self
            },
        }
    }
}

impl FromStr for RangeSpec {
    type Err = XlsxToJsonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}:{}{}",
            col_index_to_letter(self.col_start),
            self.row_start,
            col_index_to_letter(self.col_end),
            self.row_end
        )
    }
}

fn span(start: u32, end: u32) -> usize {
    if end < start {
        0
    } else {
        (end - start) as usize + 1
    }
}

/// セル参照（例: `"AB12"`）を(列インデックス, 行番号)に変換
fn parse_cell_reference(reference: &str) -> Result<(u32, u32), XlsxToJsonError> {
    let letters: String = reference
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .collect();
    let digits: String = reference.chars().filter(|c| c.is_ascii_digit()).collect();

    let col = col_letter_to_index(&letters).ok_or_else(|| {
        XlsxToJsonError::RangeFormat(format!("invalid column letters in '{}'", reference))
    })?;

    let row: u32 = digits.parse().map_err(|_| {
        XlsxToJsonError::RangeFormat(format!("invalid row number in '{}'", reference))
    })?;
    if row == 0 {
        return Err(XlsxToJsonError::RangeFormat(format!(
            "row numbers start at 1 in '{}'",
            reference
        )));
    }

    Ok((col, row))
}

/// 列文字を0始まりのインデックスに変換（"A" -> 0, "Z" -> 25, "AA" -> 26）
///
/// 大文字小文字は区別しません。空文字列やオーバーフローは`None`。
pub(crate) fn col_letter_to_index(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }

    let mut index: u32 = 0;
    for ch in letters.chars() {
        let ch = ch.to_ascii_uppercase();
        if !ch.is_ascii_uppercase() {
            return None;
        }
        let digit = (ch as u8 - b'A') as u32 + 1;
        index = index.checked_mul(26)?.checked_add(digit)?;
    }
    Some(index - 1)
}

/// 列インデックスを文字列に変換（0 -> "A", 25 -> "Z", 26 -> "AA"）
pub(crate) fn col_index_to_letter(mut col: u32) -> String {
    let mut result = String::new();
    loop {
        let remainder = col % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    result
}
