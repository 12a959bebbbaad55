//! Command-line front end for xlsx2json.
//!
//! ```sh
//! xlsx2json people.xlsx --range A1:B3
//! xlsx2json orders.xlsx --range B2:E40 --sheet-name Orders --compact -o orders.json
//! ```

use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use xlsx2json::{ExtractorBuilder, FormulaMode, JsonLayout, SheetSelector, XlsxToJsonError};

/// Extract a cell range of a spreadsheet sheet as a JSON array of records
#[derive(Parser, Debug)]
#[command(name = "xlsx2json", version)]
struct Args {
    /// Workbook to read (xlsx, xlsm, xlsb, xls, ods)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Range in A1 notation, e.g. A1:B10
    #[arg(short, long, default_value = "A1:A1")]
    range: String,

    /// Zero-based sheet index
    #[arg(long, default_value_t = 0, conflicts_with = "sheet_name")]
    sheet_index: usize,

    /// Sheet name (overrides --sheet-index)
    #[arg(long)]
    sheet_name: Option<String>,

    /// Use the first row of the range as keys
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    headers: bool,

    /// Date pattern for header cells
    #[arg(long, default_value = "yyyy-MM-dd")]
    format_date_header: String,

    /// Date pattern for body cells
    #[arg(long, default_value = "yyyy-MM-dd HH:mm:ss.SSS")]
    format_date_body: String,

    /// How formula cells are written
    #[arg(long, value_enum, default_value = "cached-value")]
    formula_mode: FormulaModeArg,

    /// Write the JSON on a single line
    #[arg(long)]
    compact: bool,

    /// Output file (stdout when omitted)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormulaModeArg {
    /// Evaluated result stored in the workbook
    CachedValue,
    /// Formula text such as =SUM(A1:A3)
    Formula,
}

impl From<FormulaModeArg> for FormulaMode {
    fn from(arg: FormulaModeArg) -> Self {
        match arg {
            FormulaModeArg::CachedValue => FormulaMode::CachedValue,
            FormulaModeArg::Formula => FormulaMode::Formula,
        }
    }
}

fn run(args: Args) -> Result<(), XlsxToJsonError> {
    let selector = match args.sheet_name {
        Some(name) => SheetSelector::Name(name),
        None => SheetSelector::Index(args.sheet_index),
    };
    let layout = if args.compact {
        JsonLayout::Compact
    } else {
        JsonLayout::Pretty
    };

    let extractor = ExtractorBuilder::new()
        .with_range(&args.range)
        .with_sheet_selector(selector)
        .with_headers(args.headers)
        .with_header_date_format(&args.format_date_header)
        .with_body_date_format(&args.format_date_body)
        .with_formula_mode(args.formula_mode.into())
        .with_json_layout(layout)
        .build()?;

    // The output file is only created once the whole document has been rendered
    let json = extractor.convert_file_to_string(&args.input)?;
    match args.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            writeln!(writer, "{}", json)?;
            writer.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            writeln!(writer, "{}", json)?;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
