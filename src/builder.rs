//! Builder Module
//!
//! Fluent Builder APIを提供し、`Extractor`インスタンスを段階的に構築する。

use std::fs::File;
use std::io::{Read, Seek, Write};
use std::path::Path;

use crate::api::{FormulaMode, JsonLayout, SheetSelector};
use crate::error::XlsxToJsonError;
use crate::format::DatePattern;
use crate::formatter::CellCoercer;
use crate::headers::HeaderBuilder;
use crate::output::OutputFormatter;
use crate::parser::WorkbookParser;
use crate::range::RangeSpec;
use crate::records::RecordAssembler;
use crate::types::Document;

/// 抽出処理の設定を保持する内部構造体
///
/// 文字列で受け取った設定は`build()`で検証・変換されます。
#[derive(Debug, Clone)]
pub(crate) struct ExtractionConfig {
    /// 抽出範囲（例: `"A1:B10"`）
    pub range: String,

    /// シート選択方式
    pub sheet_selector: SheetSelector,

    /// 先頭行をヘッダーとして使用するか
    pub headers: bool,

    /// ヘッダーセルの日付パターン
    pub header_date_format: String,

    /// 本文セルの日付パターン
    pub body_date_format: String,

    /// 数式出力モード
    pub formula_mode: FormulaMode,

    /// JSON出力レイアウト
    pub json_layout: JsonLayout,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            range: "A1:A1".to_string(),
            sheet_selector: SheetSelector::Index(0),
            headers: true,
            header_date_format: "yyyy-MM-dd".to_string(),
            body_date_format: "yyyy-MM-dd HH:mm:ss.SSS".to_string(),
            formula_mode: FormulaMode::CachedValue,
            json_layout: JsonLayout::Pretty,
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// `Extractor`インスタンスを段階的に構築するためのビルダーです。
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsx2json::{ExtractorBuilder, SheetSelector};
///
/// # fn main() -> Result<(), xlsx2json::XlsxToJsonError> {
/// let extractor = ExtractorBuilder::new()
///     .with_range("A1:C20")
///     .with_sheet_selector(SheetSelector::Name("Data".to_string()))
///     .build()?;
/// let json = extractor.convert_file_to_string("report.xlsx")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ExtractorBuilder {
    /// 内部設定（構築中）
    config: ExtractionConfig,
}

impl Default for ExtractorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractorBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 範囲: `"A1:A1"`
    /// - シート選択: 先頭のシート（`Index(0)`）
    /// - ヘッダー行: 使用する
    /// - ヘッダーの日付パターン: `"yyyy-MM-dd"`
    /// - 本文の日付パターン: `"yyyy-MM-dd HH:mm:ss.SSS"`
    /// - 数式モード: キャッシュ値を出力
    /// - 出力レイアウト: 整形済みJSON
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
        }
    }

    /// 抽出範囲をA1形式で指定する
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use xlsx2json::ExtractorBuilder;
    ///
    /// let builder = ExtractorBuilder::new().with_range("B2:D10");
    /// ```
    pub fn with_range(mut self, range: &str) -> Self {
        self.config.range = range.to_string();
        self
    }

    /// 抽出対象のシートを選択する
    pub fn with_sheet_selector(mut self, selector: SheetSelector) -> Self {
        self.config.sheet_selector = selector;
        self
    }

    /// 範囲の先頭行をヘッダーとして使用するかを指定する
    ///
    /// `false`の場合、キーは範囲内の列位置（`"0"`, `"1"`, ...）になり、
    /// 先頭行もデータとして扱われます。
    pub fn with_headers(mut self, headers: bool) -> Self {
        self.config.headers = headers;
        self
    }

    /// ヘッダーセルの日付パターンを指定する
    pub fn with_header_date_format(mut self, pattern: &str) -> Self {
        self.config.header_date_format = pattern.to_string();
        self
    }

    /// 本文セルの日付パターンを指定する
    pub fn with_body_date_format(mut self, pattern: &str) -> Self {
        self.config.body_date_format = pattern.to_string();
        self
    }

    /// 数式セルの出力方法を指定する
    pub fn with_formula_mode(mut self, mode: FormulaMode) -> Self {
        self.config.formula_mode = mode;
        self
    }

    /// JSON出力のレイアウトを指定する
    pub fn with_json_layout(mut self, layout: JsonLayout) -> Self {
        self.config.json_layout = layout;
        self
    }

    /// 設定を検証し、`Extractor`インスタンスを構築する
    ///
    /// # 発生し得るエラー
    ///
    /// * `XlsxToJsonError::RangeFormat` - 範囲を解析できない場合
    /// * `XlsxToJsonError::DatePattern` - 日付パターンが不正な場合
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use xlsx2json::{ExtractorBuilder, XlsxToJsonError};
    ///
    /// let result = ExtractorBuilder::new().with_body_date_format("yyyy-MM-dd {").build();
    /// assert!(matches!(result, Err(XlsxToJsonError::DatePattern { .. })));
    /// ```
    pub fn build(self) -> Result<Extractor, XlsxToJsonError> {
        // 1. 範囲の検証
        let range = RangeSpec::parse(&self.config.range)?;

        // 2. 日付パターンの検証
        let header_pattern = DatePattern::parse(&self.config.header_date_format)?;
        let body_pattern = DatePattern::parse(&self.config.body_date_format)?;

        // 3. Extractorインスタンス生成
        Ok(Extractor {
            range,
            sheet_selector: self.config.sheet_selector,
            headers: self.config.headers,
            header_pattern,
            body_pattern,
            formula_mode: self.config.formula_mode,
            json_layout: self.config.json_layout,
        })
    }
}

/// 抽出処理のファサード
///
/// ワークブックの1シートから範囲を抽出し、レコードの配列に変換します。
/// 構築後は不変で、呼び出しごとに入力を開いて処理し、終了時に解放します。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsx2json::ExtractorBuilder;
/// use std::fs::File;
///
/// # fn main() -> Result<(), xlsx2json::XlsxToJsonError> {
/// let extractor = ExtractorBuilder::new().with_range("A1:B3").build()?;
/// let input = File::open("people.xlsx")?;
/// let document = extractor.extract(input)?;
/// for record in document.records() {
///     println!("{:?}", record.get("Name"));
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Extractor {
    range: RangeSpec,
    sheet_selector: SheetSelector,
    headers: bool,
    header_pattern: DatePattern,
    body_pattern: DatePattern,
    formula_mode: FormulaMode,
    json_layout: JsonLayout,
}

impl Extractor {
    /// 抽出範囲
    pub fn range(&self) -> &RangeSpec {
        &self.range
    }

    /// ワークブックから範囲を抽出してドキュメントを生成
    ///
    /// # 引数
    ///
    /// * `input` - ワークブックを読み込むためのリーダー
    ///
    /// # 戻り値
    ///
    /// * `Ok(Document)` - 抽出に成功した場合（空の範囲では空のドキュメント）
    /// * `Err(XlsxToJsonError)` - 入力の読み込み、解析、シート選択に失敗した場合
    ///
    /// # 処理フロー
    ///
    /// 1. ワークブックを開き、シートを選択
    /// 2. ヘッダーリストを構築
    /// 3. データ行をレコードに組み立て
    pub fn extract<R: Read + Seek>(&self, input: R) -> Result<Document, XlsxToJsonError> {
        let mut parser = WorkbookParser::open(input)?;
        let sheet_name = parser.select_sheet(&self.sheet_selector)?;
        log::debug!("selected sheet '{}', range {}", sheet_name, self.range);

        let cells = parser.load_sheet(&sheet_name)?;

        let header_coercer = CellCoercer::new(&self.header_pattern, self.formula_mode);
        let headers = HeaderBuilder::new(header_coercer).build(&cells, &self.range, self.headers);

        // ヘッダー行を使用する場合、データは次の行から
        let body_range = if self.headers {
            self.range.without_first_row()
        } else {
            self.range
        };

        let body_coercer = CellCoercer::new(&self.body_pattern, self.formula_mode);
        let records = RecordAssembler::new(body_coercer).assemble(&cells, &body_range, &headers);

        Ok(Document::new(records))
    }

    /// ファイルパスを指定して範囲を抽出
    ///
    /// ファイルハンドルはこの呼び出しの中で開かれ、成功・失敗にかかわらず閉じられます。
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<Document, XlsxToJsonError> {
        let path = path.as_ref();
        log::debug!("opening {}", path.display());
        let file = File::open(path)?;
        self.extract(file)
    }

    /// ワークブックをJSONに変換して書き込む
    ///
    /// # 引数
    ///
    /// * `input` - ワークブックを読み込むためのリーダー
    /// * `output` - JSON出力先のライター
    pub fn convert<R: Read + Seek, W: Write>(
        &self,
        input: R,
        mut output: W,
    ) -> Result<(), XlsxToJsonError> {
        let document = self.extract(input)?;
        OutputFormatter::from_layout(self.json_layout).render(&document, &mut output)
    }

    /// ワークブックをJSON文字列に変換
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use std::fs::File;
    /// use xlsx2json::ExtractorBuilder;
    ///
    /// # fn main() -> Result<(), xlsx2json::XlsxToJsonError> {
    /// let extractor = ExtractorBuilder::new().with_range("A1:B10").build()?;
    /// let json = extractor.convert_to_string(File::open("example.xlsx")?)?;
    /// println!("{}", json);
    /// # Ok(())
    /// # }
    /// ```
    pub fn convert_to_string<R: Read + Seek>(&self, input: R) -> Result<String, XlsxToJsonError> {
        let mut buffer = Vec::new();
        self.convert(input, &mut buffer)?;

        let result = String::from_utf8(buffer).map_err(|e| {
            XlsxToJsonError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;

        Ok(result)
    }

    /// ファイルパスを指定してJSON文字列に変換
    pub fn convert_file_to_string<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<String, XlsxToJsonError> {
        let file = File::open(path.as_ref())?;
        self.convert_to_string(file)
    }
}
