//! Format Module
//!
//! 日付パターン文字列の構文解析と適用を提供します。

mod parser;
mod tokens;

pub use parser::DatePattern;
