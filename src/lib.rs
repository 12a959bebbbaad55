//! xlsx2json - Extract a rectangular range of a spreadsheet sheet as JSON records
//!
//! This crate reads one sheet of a workbook (XLSX, XLSB, XLS or ODS), takes a
//! range such as `"A1:B10"`, and turns every row of the range into a JSON object.
//! The first row of the range can be promoted to the object keys.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use xlsx2json::ExtractorBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // First row of A1:B3 becomes the keys, rows 2-3 become records
//!     let extractor = ExtractorBuilder::new().with_range("A1:B3").build()?;
//!
//!     let json = extractor.convert_file_to_string("people.xlsx")?;
//!     println!("{}", json);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Custom Configuration
//!
//! ```rust,no_run
//! use std::fs::File;
//! use xlsx2json::{ExtractorBuilder, FormulaMode, JsonLayout, SheetSelector};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let extractor = ExtractorBuilder::new()
//!         .with_range("B2:E40")
//!         .with_sheet_selector(SheetSelector::Name("Orders".to_string()))
//!         .with_header_date_format("MMM yyyy")
//!         .with_body_date_format("dd/MM/yyyy")
//!         .with_formula_mode(FormulaMode::CachedValue)
//!         .with_json_layout(JsonLayout::Compact)
//!         .build()?;
//!
//!     let input = File::open("orders.xlsx")?;
//!     let output = File::create("orders.json")?;
//!     extractor.convert(input, output)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Working with Records
//!
//! ```rust,no_run
//! use xlsx2json::{CellValue, ExtractorBuilder};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let extractor = ExtractorBuilder::new().with_range("A1:C100").build()?;
//!     let document = extractor.extract_file("people.xlsx")?;
//!
//!     for record in document.records() {
//!         if let Some(CellValue::Number(age)) = record.get("Age") {
//!             println!("age: {}", age);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

mod api;
mod builder;
mod error;
mod format;
mod formatter;
mod headers;
mod output;
mod parser;
mod range;
mod records;
mod security;
mod types;

// 公開API
pub use api::{FormulaMode, JsonLayout, SheetSelector};
pub use builder::{Extractor, ExtractorBuilder};
pub use error::XlsxToJsonError;
pub use format::DatePattern;
pub use range::RangeSpec;
pub use types::{CellValue, Document, Record};
