//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

/// 数式セルの出力モード
///
/// 数式セルをJSONに変換する際の出力方法を指定します。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum FormulaMode {
    /// 評価結果（キャッシュされた値）を出力（デフォルト）
    ///
    /// 結果の型に応じて、通常のセルと同じ規則で変換されます。
    /// 例: `=SUM(A1:A10)` → `100.0`
    ///
    /// 数式の評価は行わず、ファイルに保存された計算結果のみを使用します。
    /// 計算結果が保存されていないファイル（一部のライブラリで生成したものなど）では、
    /// 本文セルは`""`、ヘッダーセルは列の序数になります。
    CachedValue,

    /// 数式文字列を出力
    ///
    /// 例: `=SUM(A1:A10)` → `"=SUM(A1:A10)"`
    Formula,
}

/// シート選択方式
///
/// 読み込むシートを1つ選択します。
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SheetSelector {
    /// インデックス指定（0始まり、デフォルトは`Index(0)`）
    Index(usize),

    /// シート名指定
    ///
    /// 例: `SheetSelector::Name("Sheet1".to_string())`
    Name(String),
}

/// JSON出力のレイアウト
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum JsonLayout {
    /// インデント付きの整形済みJSON（デフォルト）
    ///
    /// ```json
    /// [
    ///   {
    ///     "Name": "Ana",
    ///     "Age": 30.0
    ///   }
    /// ]
    /// ```
    Pretty,

    /// 1行のコンパクトなJSON
    ///
    /// ```json
    /// [{"Name":"Ana","Age":30.0}]
    /// ```
    Compact,
}
