//! Output Formatters Implementation
//!
//! 各JSONレイアウトの実装を提供するモジュール。

use crate::error::XlsxToJsonError;
use crate::types::Document;
use std::io::Write;

/// 整形済みJSON（2スペースインデント）のフォーマッター
pub(crate) struct PrettyJsonFormatter;

impl PrettyJsonFormatter {
    pub fn render<W: Write>(
        &self,
        document: &Document,
        writer: &mut W,
    ) -> Result<(), XlsxToJsonError> {
        serde_json::to_writer_pretty(&mut *writer, document)?;
        writer.flush()?;
        Ok(())
    }
}

/// 1行JSONのフォーマッター
pub(crate) struct CompactJsonFormatter;

impl CompactJsonFormatter {
    pub fn render<W: Write>(
        &self,
        document: &Document,
        writer: &mut W,
    ) -> Result<(), XlsxToJsonError> {
        serde_json::to_writer(&mut *writer, document)?;
        writer.flush()?;
        Ok(())
    }
}
