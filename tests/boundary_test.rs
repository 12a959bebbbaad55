//! Boundary Tests for xlsx2json
//!
//! Edge cases around range shapes, empty sheets, duplicate keys and invalid
//! configuration.

use rust_xlsxwriter::*;
use std::io::Cursor;
use xlsx2json::{CellValue, ExtractorBuilder, JsonLayout, RangeSpec, XlsxToJsonError};

// Helper module for generating boundary test fixtures
mod fixtures {
    use super::*;

    /// Workbook with one sheet and no cells
    pub fn generate_empty_sheet() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("EmptySheet")?;
        Ok(workbook.save_to_buffer()?)
    }

    /// Two columns sharing the header "key"
    pub fn generate_duplicate_headers() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        worksheet.write_string(0, 0, "key")?;
        worksheet.write_string(0, 1, "other")?;
        worksheet.write_string(0, 2, "key")?;
        worksheet.write_string(1, 0, "first")?;
        worksheet.write_string(1, 1, "middle")?;
        worksheet.write_string(1, 2, "last")?;

        Ok(workbook.save_to_buffer()?)
    }

    /// Data placed beyond column Z, starting at AA10
    pub fn generate_wide_offset() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        worksheet.write_string(9, 26, "AA")?;
        worksheet.write_string(9, 27, "AB")?;
        worksheet.write_number(10, 26, 1.0)?;
        worksheet.write_number(10, 27, 2.0)?;

        Ok(workbook.save_to_buffer()?)
    }

    /// Header row only, with a gap row before the last data row
    pub fn generate_sparse_rows() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        worksheet.write_string(0, 0, "Value")?;
        worksheet.write_number(1, 0, 1.0)?;
        // row 3 is empty
        worksheet.write_number(3, 0, 4.0)?;

        Ok(workbook.save_to_buffer()?)
    }
}

#[test]
fn test_empty_sheet_yields_placeholder_records() {
    let extractor = ExtractorBuilder::new()
        .with_range("A1:B3")
        .with_json_layout(JsonLayout::Compact)
        .build()
        .unwrap();
    let input = Cursor::new(fixtures::generate_empty_sheet().unwrap());

    let json = extractor.convert_to_string(input).unwrap();

    assert_eq!(json, r#"[{"0":"","1":""},{"0":"","1":""}]"#);
}

#[test]
fn test_header_only_range_is_empty_document() {
    let extractor = ExtractorBuilder::new()
        .with_range("A1:B1")
        .with_json_layout(JsonLayout::Compact)
        .build()
        .unwrap();
    let input = Cursor::new(fixtures::generate_duplicate_headers().unwrap());

    let json = extractor.convert_to_string(input).unwrap();

    assert_eq!(json, "[]");
}

#[test]
fn test_default_range_is_single_header_cell() {
    let extractor = ExtractorBuilder::new().build().unwrap();
    let input = Cursor::new(fixtures::generate_duplicate_headers().unwrap());

    let document = extractor.extract(input).unwrap();

    assert!(document.is_empty());
}

#[test]
fn test_duplicate_headers_last_write_wins() {
    let extractor = ExtractorBuilder::new().with_range("A1:C2").build().unwrap();
    let input = Cursor::new(fixtures::generate_duplicate_headers().unwrap());

    let document = extractor.extract(input).unwrap();
    let record = &document.records()[0];

    assert_eq!(record.len(), 2);
    let keys: Vec<&str> = record.keys().collect();
    assert_eq!(keys, vec!["key", "other"]);
    assert_eq!(record.get("key"), Some(&CellValue::String("last".to_string())));
}

#[test]
fn test_multi_letter_columns() {
    let extractor = ExtractorBuilder::new()
        .with_range("aa10:ab11")
        .with_json_layout(JsonLayout::Compact)
        .build()
        .unwrap();
    let input = Cursor::new(fixtures::generate_wide_offset().unwrap());

    let json = extractor.convert_to_string(input).unwrap();

    assert_eq!(json, r#"[{"AA":1.0,"AB":2.0}]"#);
}

#[test]
fn test_every_row_produces_a_record() {
    let extractor = ExtractorBuilder::new().with_range("A1:A6").build().unwrap();
    let input = Cursor::new(fixtures::generate_sparse_rows().unwrap());

    let document = extractor.extract(input).unwrap();
    let values: Vec<&CellValue> = document
        .records()
        .iter()
        .filter_map(|record| record.get("Value"))
        .collect();

    // 空行とシートの使用範囲外の行も空文字列のレコードになる
    assert_eq!(
        values,
        vec![
            &CellValue::Number(1.0),
            &CellValue::empty(),
            &CellValue::Number(4.0),
            &CellValue::empty(),
            &CellValue::empty(),
        ]
    );
}

#[test]
fn test_reversed_rows_yield_empty_document() {
    let extractor = ExtractorBuilder::new().with_range("A4:A1").build().unwrap();
    let input = Cursor::new(fixtures::generate_sparse_rows().unwrap());

    let document = extractor.extract(input).unwrap();

    assert!(document.is_empty());
}

#[test]
fn test_record_count_matches_rows() {
    for (range, headers, expected) in [
        ("A1:A6", true, 5),
        ("A1:A6", false, 6),
        ("A2:A2", false, 1),
        ("A3:A3", true, 0),
        ("A4294967295:A4294967295", true, 0),
        ("A4294967294:A4294967295", true, 1),
    ] {
        let extractor = ExtractorBuilder::new()
            .with_range(range)
            .with_headers(headers)
            .build()
            .unwrap();
        let input = Cursor::new(fixtures::generate_sparse_rows().unwrap());

        let document = extractor.extract(input).unwrap();
        assert_eq!(document.len(), expected, "range {} headers {}", range, headers);
    }
}

#[test]
fn test_invalid_ranges_fail_at_build() {
    for range in ["", "A1", "A1:B2:C3", "1:2", "A:B", "A0:B2"] {
        let result = ExtractorBuilder::new().with_range(range).build();
        assert!(
            matches!(result, Err(XlsxToJsonError::RangeFormat(_))),
            "range {:?} should be rejected",
            range
        );
    }
}

#[test]
fn test_range_spec_parse() {
    let range: RangeSpec = "$B$2:$D$10".parse().unwrap();

    assert_eq!(range.col_start, 1);
    assert_eq!(range.col_end, 3);
    assert_eq!(range.row_start, 2);
    assert_eq!(range.row_end, 10);
    assert_eq!(range.width(), 3);
    assert_eq!(range.height(), 9);
}

#[test]
fn test_missing_file_is_io_error() {
    let extractor = ExtractorBuilder::new().build().unwrap();

    let result = extractor.convert_file_to_string("/nonexistent/dir/missing.xlsx");

    assert!(matches!(result, Err(XlsxToJsonError::Io(_))));
}

#[test]
fn test_empty_input_is_error_not_empty_document() {
    let extractor = ExtractorBuilder::new().build().unwrap();

    let result = extractor.extract(Cursor::new(Vec::new()));

    assert!(result.is_err());
}
