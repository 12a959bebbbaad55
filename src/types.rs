//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// ワークブックから読み取った型付きセル
///
/// セルの種類ごとに閉じた列挙型として表現します。
/// 数式セルは評価結果のセルを保持し、変換時には結果の型で再度ディスパッチされます。
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TypedCell {
    /// 論理値
    Boolean(bool),

    /// 数値（日付書式の場合は日時を伴う）
    Numeric(NumericCell),

    /// 文字列
    Text(String),

    /// 数式（式と評価結果）
    Formula {
        expression: String,
        result: Box<TypedCell>,
    },

    /// 空セル
    Blank,

    /// エラー値（例: `#DIV/0!`）
    Error(String),

    /// 解釈できない型（元の表現を保持）
    Unknown(String),
}

/// 数値セル
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct NumericCell {
    /// シリアル値を含む数値
    pub value: f64,

    /// 日付書式が適用されている場合の日時
    ///
    /// 日付書式でも暦日に変換できない値は`None`になります。
    pub date_time: Option<NaiveDateTime>,
}

impl NumericCell {
    /// 通常の数値セルを生成
    pub fn number(value: f64) -> Self {
        Self {
            value,
            date_time: None,
        }
    }

    /// 日付書式の数値セルを生成
    pub fn date(value: f64, date_time: Option<NaiveDateTime>) -> Self {
        Self { value, date_time }
    }
}

/// JSONに出力されるセル値
///
/// 日付は常に書式化済みの文字列になり、独立した日付型は持ちません。
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// 論理値
    Bool(bool),

    /// 数値（JSONでは常に浮動小数点数として出力）
    Number(f64),

    /// 文字列
    String(String),
}

impl CellValue {
    /// 空文字列の値
    pub fn empty() -> Self {
        CellValue::String(String::new())
    }

    /// 文字列値の場合はその参照を返す
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Bool(b) => serializer.serialize_bool(*b),
            CellValue::Number(n) => serializer.serialize_f64(*n),
            CellValue::String(s) => serializer.serialize_str(s),
        }
    }
}

/// 1行分のレコード（ヘッダーキー → セル値）
///
/// 挿入順を保持します。同じキーを再度挿入すると、最初の位置のまま値だけが
/// 上書きされます（後勝ち）。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: IndexMap<String, CellValue>,
}

impl Record {
    /// 指定した列数分の容量を確保したレコードを生成
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: IndexMap::with_capacity(capacity),
        }
    }

    /// 値を挿入する（既存キーは上書き）
    pub(crate) fn insert(&mut self, key: &str, value: CellValue) {
        match self.fields.get_mut(key) {
            Some(existing) => *existing = value,
            None => {
                self.fields.insert(key.to_string(), value);
            }
        }
    }

    /// キーに対応する値を取得
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.fields.get(key)
    }

    /// 挿入順にキーを列挙
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// 挿入順に(キー, 値)を列挙
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// フィールド数
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// フィールドが空かどうか
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// 変換結果のドキュメント（レコードの配列）
///
/// 呼び出しごとに生成され、返却後は変更されません。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    records: Vec<Record>,
}

impl Document {
    pub(crate) fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// レコードのスライス
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// レコード数
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// レコードが空かどうか
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// レコードの所有権を取り出す
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.records.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_serialization() {
        assert_eq!(serde_json::to_string(&CellValue::Bool(true)).unwrap(), "true");
        assert_eq!(serde_json::to_string(&CellValue::Number(42.5)).unwrap(), "42.5");
        assert_eq!(serde_json::to_string(&CellValue::Number(30.0)).unwrap(), "30.0");
        assert_eq!(
            serde_json::to_string(&CellValue::String("a\"b".to_string())).unwrap(),
            r#""a\"b""#
        );
    }

    #[test]
    fn test_cell_value_as_str() {
        assert_eq!(CellValue::empty().as_str(), Some(""));
        assert_eq!(CellValue::Bool(false).as_str(), None);
    }

    #[test]
    fn test_record_keeps_insertion_order() {
        let mut record = Record::with_capacity(3);
        record.insert("b", CellValue::Number(1.0));
        record.insert("a", CellValue::Number(2.0));
        record.insert("c", CellValue::Number(3.0));

        let keys: Vec<&str> = record.keys().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"b":1.0,"a":2.0,"c":3.0}"#
        );
    }

    #[test]
    fn test_record_duplicate_key_last_write_wins() {
        let mut record = Record::default();
        record.insert("x", CellValue::String("first".to_string()));
        record.insert("y", CellValue::Bool(true));
        record.insert("x", CellValue::String("second".to_string()));

        assert_eq!(record.len(), 2);
        assert_eq!(
            record.get("x"),
            Some(&CellValue::String("second".to_string()))
        );
        assert_eq!(record.keys().next(), Some("x"));
    }

    #[test]
    fn test_wide_record_keeps_order_and_replaces_in_place() {
        let mut record = Record::with_capacity(5000);
        for col in 0..5000 {
            record.insert(&col.to_string(), CellValue::Number(col as f64));
        }
        record.insert("2500", CellValue::String("replaced".to_string()));

        assert_eq!(record.len(), 5000);
        assert_eq!(record.keys().nth(2500), Some("2500"));
        assert_eq!(
            record.get("2500"),
            Some(&CellValue::String("replaced".to_string()))
        );
        assert_eq!(record.keys().last(), Some("4999"));
    }

    #[test]
    fn test_document_serialization() {
        let mut record = Record::default();
        record.insert("Name", CellValue::String("Ana".to_string()));
        let document = Document::new(vec![record, Record::default()]);

        assert_eq!(document.len(), 2);
        assert_eq!(
            serde_json::to_string(&document).unwrap(),
            r#"[{"Name":"Ana"},{}]"#
        );
        assert_eq!(serde_json::to_string(&Document::default()).unwrap(), "[]");
    }
}
