//! Headers Module
//!
//! レコードのキーとなるヘッダーリストを構築します。

use crate::formatter::CellCoercer;
use crate::parser::SheetCells;
use crate::range::RangeSpec;

/// ヘッダーリストの構築
///
/// ヘッダー行を使用する場合は範囲の先頭行を読み込み、キーを得られない列は
/// 列ごとに増加するカウンターの値（序数）で補います。
pub(crate) struct HeaderBuilder<'a> {
    coercer: CellCoercer<'a>,
}

impl<'a> HeaderBuilder<'a> {
    pub fn new(coercer: CellCoercer<'a>) -> Self {
        Self { coercer }
    }

    /// ヘッダーリストを構築
    ///
    /// # 引数
    ///
    /// * `cells` - 読み込み済みのシート
    /// * `range` - 抽出範囲
    /// * `use_header_row` - 先頭行をヘッダーとして使用するかどうか
    ///
    /// # 戻り値
    ///
    /// 範囲の列数と同じ長さのキーのリスト
    pub fn build(
        &self,
        cells: &SheetCells,
        range: &RangeSpec,
        use_header_row: bool,
    ) -> Vec<String> {
        if !use_header_row {
            return Self::ordinal_headers(range.width());
        }

        let mut headers = Vec::with_capacity(range.width());
        // 列ごとに必ず1つ進めるカウンター（キーが得られた列も含む）
        let mut counter: usize = 0;

        for col in range.col_start..=range.col_end {
            let cell = cells.cell(range.row_start, col);
            let header = self
                .coercer
                .coerce_header(cell.as_ref())
                .unwrap_or_else(|| counter.to_string());
            headers.push(header);
            counter += 1;
        }

        log::debug!("resolved {} headers from row {}", headers.len(), range.row_start);
        headers
    }

    /// 範囲内の位置をキーとする序数ヘッダー
    pub fn ordinal_headers(width: usize) -> Vec<String> {
        (0..width).map(|i| i.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FormulaMode;
    use crate::format::DatePattern;
    use calamine::{Data, Range};
    use proptest::prelude::*;

    /// A1:C2 のシート（1行目: "Name", 空, 30.0 / 2行目: "Ana", "x", 空）
    fn sample_cells() -> SheetCells {
        let mut values = Range::new((0, 0), (1, 2));
        values.set_value((0, 0), Data::String("Name".to_string()));
        values.set_value((0, 2), Data::Float(30.0));
        values.set_value((1, 0), Data::String("Ana".to_string()));
        values.set_value((1, 1), Data::String("x".to_string()));
        SheetCells::from_ranges(values, None)
    }

    #[test]
    fn test_ordinal_headers() {
        assert_eq!(
            HeaderBuilder::ordinal_headers(3),
            vec!["0".to_string(), "1".to_string(), "2".to_string()]
        );
        assert!(HeaderBuilder::ordinal_headers(0).is_empty());
    }

    #[test]
    fn test_header_row_with_fallbacks() {
        let pattern = DatePattern::parse("yyyy-MM-dd").unwrap();
        let builder = HeaderBuilder::new(CellCoercer::new(&pattern, FormulaMode::CachedValue));
        let range = RangeSpec::parse("A1:D2").unwrap();

        // 空セルと範囲外の列は列位置の序数になる
        assert_eq!(
            builder.build(&sample_cells(), &range, true),
            vec!["Name", "1", "30.0", "3"]
        );
    }

    #[test]
    fn test_without_header_row() {
        let pattern = DatePattern::parse("yyyy-MM-dd").unwrap();
        let builder = HeaderBuilder::new(CellCoercer::new(&pattern, FormulaMode::CachedValue));
        let range = RangeSpec::parse("B1:C2").unwrap();

        assert_eq!(builder.build(&sample_cells(), &range, false), vec!["0", "1"]);
    }

    #[test]
    fn test_reversed_range_has_no_headers() {
        let pattern = DatePattern::parse("yyyy-MM-dd").unwrap();
        let builder = HeaderBuilder::new(CellCoercer::new(&pattern, FormulaMode::CachedValue));
        let range = RangeSpec::parse("C1:A2").unwrap();

        assert!(builder.build(&sample_cells(), &range, true).is_empty());
        assert!(builder.build(&sample_cells(), &range, false).is_empty());
    }

    proptest! {
        #[test]
        fn test_header_count_matches_width(
            col_start in 0u32..30,
            extra in 0u32..30,
            row in 1u32..5,
            use_header_row in any::<bool>(),
        ) {
            let pattern = DatePattern::parse("yyyy-MM-dd").unwrap();
            let builder = HeaderBuilder::new(CellCoercer::new(&pattern, FormulaMode::CachedValue));
            let range = RangeSpec {
                col_start,
                col_end: col_start + extra,
                row_start: row,
                row_end: row + 1,
            };

            let headers = builder.build(&sample_cells(), &range, use_header_row);
            prop_assert_eq!(headers.len(), (extra + 1) as usize);
        }
    }
}
