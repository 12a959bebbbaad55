//! Workbook Module
//!
//! calamineを使用したワークブック読み込みの実装。
//! ワークブック全体をメモリに展開し、指定シートのセルを型付きセルとして提供します。

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use chrono::{NaiveDate, NaiveDateTime};
use std::io::{Cursor, Read};

use crate::api::SheetSelector;
use crate::error::XlsxToJsonError;
use crate::security::SecurityConfig;
use crate::types::{NumericCell, TypedCell};

/// ワークブックパーサー
///
/// calamineのラッパーとして、ワークブックレベルの操作を提供します。
/// 入力はメモリ上のバッファとして保持され、パーサーのドロップ時に解放されます。
pub(crate) struct WorkbookParser {
    /// calamineのワークブック（XLSX / XLSB / XLS / ODS）
    workbook: Sheets<Cursor<Vec<u8>>>,
}

impl WorkbookParser {
    /// ワークブックを開く
    ///
    /// # 引数
    ///
    /// * `reader` - ワークブックを読み込むためのリーダー
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - ワークブックの読み込みに成功した場合
    /// * `Err(XlsxToJsonError::SecurityViolation)` - 入力サイズが上限を超えた場合
    /// * `Err(XlsxToJsonError::Parse)` - ワークブックとして解析できない場合
    pub fn open<R: Read>(reader: R) -> Result<Self, XlsxToJsonError> {
        let security_config = SecurityConfig::default();

        // 上限+1バイトまでだけ読み込み、超過を検出する
        let mut buffer = Vec::new();
        let bytes_read = reader
            .take(security_config.max_input_file_size + 1)
            .read_to_end(&mut buffer)?;

        if bytes_read as u64 > security_config.max_input_file_size {
            return Err(XlsxToJsonError::SecurityViolation(format!(
                "Input file size exceeds maximum: {} bytes",
                security_config.max_input_file_size
            )));
        }

        log::debug!("opening workbook ({} bytes)", bytes_read);
        let workbook = open_workbook_auto_from_rs(Cursor::new(buffer))?;

        Ok(Self { workbook })
    }

    /// すべてのシート名を取得
    pub fn get_sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    /// シート選択方式に基づいてシートを1つ選択
    ///
    /// # 戻り値
    ///
    /// * `Ok(String)` - 選択されたシート名
    /// * `Err(XlsxToJsonError::SheetIndex)` - インデックスが範囲外の場合
    /// * `Err(XlsxToJsonError::SheetNotFound)` - 名前が見つからない場合
    pub fn select_sheet(&self, selector: &SheetSelector) -> Result<String, XlsxToJsonError> {
        let all_sheet_names = self.get_sheet_names();

        match selector {
            SheetSelector::Index(index) => {
                all_sheet_names
                    .get(*index)
                    .cloned()
                    .ok_or(XlsxToJsonError::SheetIndex {
                        index: *index,
                        count: all_sheet_names.len(),
                    })
            }
            SheetSelector::Name(name) => {
                if all_sheet_names.contains(name) {
                    Ok(name.clone())
                } else {
                    Err(XlsxToJsonError::SheetNotFound(name.clone()))
                }
            }
        }
    }

    /// シートの値と数式を読み込む
    ///
    /// 数式を取得できない形式の場合は、値のみのシートとして扱います。
    pub fn load_sheet(&mut self, sheet_name: &str) -> Result<SheetCells, XlsxToJsonError> {
        let values = self.workbook.worksheet_range(sheet_name)?;

        // 数式情報は全セルで再利用するため1回だけ取得する
        let formulas = match self.workbook.worksheet_formula(sheet_name) {
            Ok(formulas) => Some(formulas),
            Err(e) => {
                log::debug!("formulas unavailable for sheet '{}': {}", sheet_name, e);
                None
            }
        };

        log::debug!(
            "loaded sheet '{}' (used area {:?} .. {:?})",
            sheet_name,
            values.start(),
            values.end()
        );

        Ok(SheetCells { values, formulas })
    }
}

/// 1シート分のセルデータ
///
/// 値と数式は絶対座標（0始まり）で参照します。
pub(crate) struct SheetCells {
    values: Range<Data>,
    formulas: Option<Range<String>>,
}

impl SheetCells {
    #[cfg(test)]
    pub(crate) fn from_ranges(values: Range<Data>, formulas: Option<Range<String>>) -> Self {
        Self { values, formulas }
    }

    /// 行番号（1始まり）と列インデックス（0始まり）でセルを取得
    ///
    /// シートの使用範囲外（行ごと存在しない場合を含む）は`None`を返します。
    pub fn cell(&self, row: u32, col: u32) -> Option<TypedCell> {
        let position = (row.checked_sub(1)?, col);
        let value = self.values.get_value(position);
        let expression = self
            .formulas
            .as_ref()
            .and_then(|formulas| formulas.get_value(position))
            .filter(|expression| !expression.is_empty());

        match (value, expression) {
            (value, Some(expression)) => Some(TypedCell::Formula {
                expression: expression.clone(),
                result: Box::new(value.map_or(TypedCell::Blank, typed_cell_from_data)),
            }),
            (Some(value), None) => Some(typed_cell_from_data(value)),
            (None, None) => None,
        }
    }
}

/// calamineのセル値を型付きセルに変換
fn typed_cell_from_data(data: &Data) -> TypedCell {
    match data {
        Data::Int(i) => TypedCell::Numeric(NumericCell::number(*i as f64)),
        Data::Float(f) => TypedCell::Numeric(NumericCell::number(*f)),
        Data::String(s) => TypedCell::Text(s.clone()),
        Data::Bool(b) => TypedCell::Boolean(*b),
        Data::DateTime(dt) => {
            let date_time = dt.as_datetime();
            if date_time.is_none() {
                log::warn!("date value {} is out of calendar range", dt.as_f64());
            }
            TypedCell::Numeric(NumericCell::date(dt.as_f64(), date_time))
        }
        Data::DateTimeIso(s) => match parse_iso_datetime(s) {
            Some(datetime) => {
                TypedCell::Numeric(NumericCell::date(excel_serial(&datetime), Some(datetime)))
            }
            None => TypedCell::Text(s.clone()),
        },
        Data::DurationIso(s) => TypedCell::Unknown(s.clone()),
        Data::Error(e) => TypedCell::Error(e.to_string()),
        Data::Empty => TypedCell::Blank,
    }
}

/// ISO 8601形式の日付・日時文字列をパース（ODS形式で使用）
fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    let raw = s.trim_end_matches('Z');
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// 日時を1900年エポックのシリアル値に変換
fn excel_serial(datetime: &NaiveDateTime) -> f64 {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or_default();
    (*datetime - epoch).num_milliseconds() as f64 / 86_400_000.0
}
