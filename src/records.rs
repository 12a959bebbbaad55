//! Records Module
//!
//! データ行をレコードに組み立てます。

use crate::formatter::CellCoercer;
use crate::parser::SheetCells;
use crate::range::RangeSpec;
use crate::types::Record;

/// レコードの組み立て
///
/// 範囲内のすべての行について、空行や存在しない行も含めて1行1レコードを生成します。
pub(crate) struct RecordAssembler<'a> {
    coercer: CellCoercer<'a>,
}

impl<'a> RecordAssembler<'a> {
    pub fn new(coercer: CellCoercer<'a>) -> Self {
        Self { coercer }
    }

    /// レコードを組み立てる
    ///
    /// # 引数
    ///
    /// * `cells` - 読み込み済みのシート
    /// * `range` - データ行の範囲（ヘッダー行を除く）
    /// * `headers` - 列位置ごとのキー（長さは範囲の列数）
    pub fn assemble(
        &self,
        cells: &SheetCells,
        range: &RangeSpec,
        headers: &[String],
    ) -> Vec<Record> {
        let mut records = Vec::with_capacity(range.height());

        for row in range.row_start..=range.row_end {
            let mut record = Record::with_capacity(headers.len());
            for (offset, header) in headers.iter().enumerate() {
                let col = range.col_start + offset as u32;
                let cell = cells.cell(row, col);
                record.insert(header, self.coercer.coerce_body(cell.as_ref()));
            }
            log::trace!("row {}: {} fields", row, record.len());
            records.push(record);
        }

        log::debug!("assembled {} records", records.len());
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FormulaMode;
    use crate::format::DatePattern;
    use crate::types::CellValue;
    use calamine::{Data, Range};

    fn sample_cells() -> SheetCells {
        let mut values = Range::new((0, 0), (2, 1));
        values.set_value((0, 0), Data::String("Name".to_string()));
        values.set_value((0, 1), Data::String("Age".to_string()));
        values.set_value((1, 0), Data::String("Ana".to_string()));
        values.set_value((1, 1), Data::Float(30.0));
        values.set_value((2, 1), Data::String("31".to_string()));
        SheetCells::from_ranges(values, None)
    }

    fn headers(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_assemble_rows() {
        let pattern = DatePattern::parse("yyyy-MM-dd HH:mm:ss.SSS").unwrap();
        let assembler = RecordAssembler::new(CellCoercer::new(&pattern, FormulaMode::CachedValue));
        let range = RangeSpec::parse("A2:B3").unwrap();

        let records = assembler.assemble(&sample_cells(), &range, &headers(&["Name", "Age"]));

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("Name"), Some(&CellValue::String("Ana".to_string())));
        assert_eq!(records[0].get("Age"), Some(&CellValue::Number(30.0)));
        assert_eq!(records[1].get("Name"), Some(&CellValue::empty()));
        assert_eq!(records[1].get("Age"), Some(&CellValue::String("31".to_string())));
    }

    #[test]
    fn test_missing_rows_produce_empty_records() {
        let pattern = DatePattern::parse("yyyy-MM-dd HH:mm:ss.SSS").unwrap();
        let assembler = RecordAssembler::new(CellCoercer::new(&pattern, FormulaMode::CachedValue));
        let range = RangeSpec::parse("A4:B5").unwrap();

        let records = assembler.assemble(&sample_cells(), &range, &headers(&["0", "1"]));

        assert_eq!(records.len(), 2);
        for record in &records {
            assert_eq!(record.get("0"), Some(&CellValue::empty()));
            assert_eq!(record.get("1"), Some(&CellValue::empty()));
        }
    }

    #[test]
    fn test_duplicate_headers_last_write_wins() {
        let pattern = DatePattern::parse("yyyy-MM-dd HH:mm:ss.SSS").unwrap();
        let assembler = RecordAssembler::new(CellCoercer::new(&pattern, FormulaMode::CachedValue));
        let range = RangeSpec::parse("A2:B2").unwrap();

        let records = assembler.assemble(&sample_cells(), &range, &headers(&["k", "k"]));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].len(), 1);
        assert_eq!(records[0].get("k"), Some(&CellValue::Number(30.0)));
    }

    #[test]
    fn test_reversed_rows_produce_no_records() {
        let pattern = DatePattern::parse("yyyy-MM-dd HH:mm:ss.SSS").unwrap();
        let assembler = RecordAssembler::new(CellCoercer::new(&pattern, FormulaMode::CachedValue));
        let range = RangeSpec::parse("A3:B2").unwrap();

        assert!(assembler
            .assemble(&sample_cells(), &range, &headers(&["a", "b"]))
            .is_empty());
    }
}
