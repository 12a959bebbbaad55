//! Parser Module
//!
//! calamineを使用したワークブック解析の実装。
//! 入力全体を読み込んだ後、選択したシートのセルを型付きセルとして提供します。

mod workbook;

pub(crate) use workbook::{SheetCells, WorkbookParser};
