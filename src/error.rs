//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// xlsx2jsonクレート全体で使用するエラー型
///
/// ワークブックの読み込み、範囲指定の解析、JSON出力中に発生する
/// すべてのエラーを統一的に扱います。
///
/// 空の範囲は正常終了（空の配列）として扱われるため、呼び出し側は
/// 「レコード0件」と「失敗」を常に区別できます。
///
/// # エラーの種類
///
/// - `RangeFormat`: 範囲指定（例: `"A1:B10"`）の解析に失敗
/// - `Io`: ファイルのオープン・読み込みに失敗
/// - `Parse`: ワークブックの解析に失敗（calamine由来）
/// - `SheetIndex` / `SheetNotFound`: 指定されたシートが存在しない
/// - `DatePattern`: 日付パターンが不正
/// - `Json`: JSONのシリアライズに失敗
/// - `SecurityViolation`: 入力サイズ制限に違反
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsx2json::{ExtractorBuilder, XlsxToJsonError};
///
/// match ExtractorBuilder::new().with_range("A1B10").build() {
///     Err(XlsxToJsonError::RangeFormat(msg)) => println!("範囲エラー: {}", msg),
///     _ => {}
/// }
/// ```
#[derive(Error, Debug)]
pub enum XlsxToJsonError {
    /// 範囲指定の解析に失敗したエラー
    ///
    /// `':'`がない、列文字がない、行番号が数値でない、などの場合に発生します。
    #[error("Invalid range expression: {0}")]
    RangeFormat(String),

    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ワークブックの解析中に発生したエラー
    ///
    /// ファイル形式が不正、破損したファイルなどが原因となります。
    #[error("Failed to parse workbook: {0}")]
    Parse(#[from] calamine::Error),

    /// シートインデックスが範囲外
    #[error("Sheet index {index} is out of range (total: {count})")]
    SheetIndex {
        /// 要求されたインデックス（0始まり）
        index: usize,
        /// ワークブック内のシート数
        count: usize,
    },

    /// 指定された名前のシートが存在しない
    #[error("Sheet '{0}' not found")]
    SheetNotFound(String),

    /// 日付パターンが不正
    #[error("Invalid date pattern '{pattern}': {message}")]
    DatePattern {
        /// 元のパターン文字列
        pattern: String,
        /// 詳細メッセージ
        message: String,
    },

    /// JSONのシリアライズに失敗したエラー
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// セキュリティ制限に違反したエラー
    ///
    /// 入力ファイルサイズの上限を超えた場合などに発生します。
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}
