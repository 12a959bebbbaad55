//! Output Format Module
//!
//! JSON出力レイアウトの切り替えを提供するモジュール。

mod formatters;

use crate::api::JsonLayout;
use crate::error::XlsxToJsonError;
use crate::types::Document;
use std::io::Write;

pub(crate) use formatters::{CompactJsonFormatter, PrettyJsonFormatter};

/// 出力フォーマッター
///
/// 各レイアウトをenumとして表現します。
#[derive(Debug, Clone, Copy)]
pub(crate) enum OutputFormatter {
    Pretty,
    Compact,
}

impl OutputFormatter {
    /// 出力レイアウトからフォーマッターを生成
    pub fn from_layout(layout: JsonLayout) -> Self {
        match layout {
            JsonLayout::Pretty => OutputFormatter::Pretty,
            JsonLayout::Compact => OutputFormatter::Compact,
        }
    }

    /// ドキュメントを指定されたレイアウトで出力する
    ///
    /// # 戻り値
    ///
    /// * `Ok(())` - 出力に成功した場合
    /// * `Err(XlsxToJsonError)` - シリアライズまたは書き込みに失敗した場合
    pub fn render<W: Write>(
        &self,
        document: &Document,
        writer: &mut W,
    ) -> Result<(), XlsxToJsonError> {
        match self {
            OutputFormatter::Pretty => PrettyJsonFormatter.render(document, writer),
            OutputFormatter::Compact => CompactJsonFormatter.render(document, writer),
        }
    }
}
