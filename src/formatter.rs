//! Formatter Module
//!
//! 型付きセルをJSONの値に変換するモジュール。
//! 本文セルとヘッダーセルは同じディスパッチを通り、役割ごとの規則で仕上げられます。

use crate::api::FormulaMode;
use crate::format::DatePattern;
use crate::types::{CellValue, NumericCell, TypedCell};

/// ディスパッチ結果
///
/// 本文とヘッダーで扱いが異なるのはエラー値と値なしの場合のみです。
#[derive(Debug, Clone, PartialEq)]
enum Resolved {
    /// 値が得られた
    Value(CellValue),

    /// エラー値（例: `#DIV/0!`）
    Error(String),

    /// 値なし（空セル、存在しないセル、解釈できない型）
    Absent,
}

/// セル変換器
///
/// 日付パターンと数式モードを保持し、セルを1つずつ変換します。
/// 変換は失敗せず、異常なセルは空文字列（本文）または未解決（ヘッダー）になります。
#[derive(Debug, Clone, Copy)]
pub(crate) struct CellCoercer<'a> {
    /// 日付書式のセルに適用するパターン
    pattern: &'a DatePattern,

    /// 数式セルの出力モード
    formula_mode: FormulaMode,
}

impl<'a> CellCoercer<'a> {
    pub fn new(pattern: &'a DatePattern, formula_mode: FormulaMode) -> Self {
        Self {
            pattern,
            formula_mode,
        }
    }

    /// 本文セルを変換
    ///
    /// # 引数
    ///
    /// * `cell` - 変換するセル（存在しないセルは`None`）
    ///
    /// # 戻り値
    ///
    /// JSONに出力する値。値のないセルは空文字列になります。
    pub fn coerce_body(&self, cell: Option<&TypedCell>) -> CellValue {
        match self.resolve(cell) {
            Resolved::Value(value) => value,
            Resolved::Error(text) => CellValue::String(text),
            Resolved::Absent => CellValue::empty(),
        }
    }

    /// ヘッダーセルを変換
    ///
    /// # 戻り値
    ///
    /// * `Some(String)` - ヘッダーキー
    /// * `None` - キーを得られない場合（呼び出し側で序数に置き換える）
    pub fn coerce_header(&self, cell: Option<&TypedCell>) -> Option<String> {
        match self.resolve(cell) {
            Resolved::Value(CellValue::Bool(b)) => Some(b.to_string()),
            Resolved::Value(CellValue::Number(n)) => Some(java_double_string(n)),
            Resolved::Value(CellValue::String(s)) => Some(s),
            Resolved::Error(_) | Resolved::Absent => None,
        }
    }

    fn resolve(&self, cell: Option<&TypedCell>) -> Resolved {
        let Some(cell) = cell else {
            return Resolved::Absent;
        };

        match cell {
            TypedCell::Formula { expression, result } => match self.formula_mode {
                FormulaMode::Formula => {
                    Resolved::Value(CellValue::String(formula_text(expression)))
                }
                FormulaMode::CachedValue => self.resolve_formula_result(expression, result),
            },
            other => self.resolve_value(other),
        }
    }

    /// 数式の評価結果を通常のセルと同じ規則で変換
    fn resolve_formula_result(&self, expression: &str, result: &TypedCell) -> Resolved {
        match result {
            TypedCell::Formula { .. } | TypedCell::Unknown(_) => {
                log::warn!("formula '{}' has no usable result", expression);
                Resolved::Absent
            }
            other => self.resolve_value(other),
        }
    }

    fn resolve_value(&self, cell: &TypedCell) -> Resolved {
        match cell {
            TypedCell::Boolean(b) => Resolved::Value(CellValue::Bool(*b)),
            TypedCell::Numeric(numeric) => Resolved::Value(self.numeric_value(numeric)),
            TypedCell::Text(s) => Resolved::Value(CellValue::String(s.clone())),
            TypedCell::Error(text) => Resolved::Error(text.clone()),
            TypedCell::Blank | TypedCell::Unknown(_) | TypedCell::Formula { .. } => {
                Resolved::Absent
            }
        }
    }

    fn numeric_value(&self, numeric: &NumericCell) -> CellValue {
        match &numeric.date_time {
            Some(date_time) => CellValue::String(self.pattern.format(date_time)),
            None => CellValue::Number(numeric.value),
        }
    }
}

/// 数式文字列に先頭の`=`を付与
fn formula_text(expression: &str) -> String {
    if expression.starts_with('=') {
        expression.to_string()
    } else {
        format!("={}", expression)
    }
}

/// 浮動小数点数をJavaの`Double.toString`と同じ表記に変換
///
/// 10^-3以上10^7未満は小数表記（`30.0`）、それ以外は指数表記（`1.0E7`）になります。
pub(crate) fn java_double_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    let magnitude = value.abs();
    if (1e-3..1e7).contains(&magnitude) {
        let text = value.to_string();
        if text.contains('.') {
            text
        } else {
            format!("{}.0", text)
        }
    } else {
        let text = format!("{:e}", value);
        let (mantissa, exponent) = text.split_once('e').unwrap_or((text.as_str(), "0"));
        if mantissa.contains('.') {
            format!("{}E{}", mantissa, exponent)
        } else {
            format!("{}.0E{}", mantissa, exponent)
        }
    }
}
