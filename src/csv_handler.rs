//! CSV file handling module for colframe
//!
//! This module sits between raw delimited text and [`Table`]s. It provides:
//!
//! - Header extraction, turning rows into name-keyed [`Record`]s
//! - Loading text or files into tables, optionally inferring numeric columns
//! - Writing tables back out as CSV
//!
//! The missing-value sentinels (`NA` and the empty string) are translated to
//! [`Value::Null`] here on the way in and back to `NA` on the way out. No other
//! part of the engine looks at them.

use std::fs;
use std::io::{self, BufWriter};
use std::path::Path;

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::error::ColframeResult;
use crate::table::Table;
use crate::tokenizer::Tokenizer;
use crate::value::{is_missing_field, is_numeric_field, Value};

/// One data row keyed by header name, in header order
pub type Record = IndexMap<String, String>;

/// Split parsed rows into a header and name-keyed records
///
/// The first row becomes the header. Every following row is padded with
/// empty strings when it is shorter than the header and truncated when it is
/// longer. A header that repeats a name keeps the name's first position and
/// its last value.
///
/// # Example
/// ```
/// # use colframe::csv_handler::with_header;
/// let rows = vec![
///     vec!["id".to_string(), "name".to_string()],
///     vec!["1".to_string()],
///     vec!["2".to_string(), "Bo".to_string(), "extra".to_string()],
/// ];
/// let (header, records) = with_header(rows);
/// assert_eq!(header, vec!["id", "name"]);
/// assert_eq!(records[0]["name"], "");
/// assert_eq!(records[1].len(), 2);
/// ```
pub fn with_header(rows: Vec<Vec<String>>) -> (Vec<String>, Vec<Record>) {
    let mut rows = rows.into_iter();
    let header = match rows.next() {
        Some(header) => header,
        None => return (Vec::new(), Vec::new()),
    };
    let records = rows
        .map(|row| {
            let mut fields = row.into_iter();
            header
                .iter()
                .map(|name| (name.clone(), fields.next().unwrap_or_default()))
                .collect()
        })
        .collect();
    (header, records)
}

/// Generated column names for header-less input: `a`..`z`, `aa`, `ab`, ...
pub fn default_column_name(mut index: usize) -> String {
    let mut name = Vec::new();
    loop {
        name.push(b'a' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    name.reverse();
    String::from_utf8_lossy(&name).into_owned()
}

/// Options controlling how text becomes a table
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Field delimiter
    pub delimiter: char,
    /// Quote character
    pub quote: char,
    /// Whether the first row holds the column names
    pub has_header: bool,
    /// Whether to store all-numeric columns as numbers instead of text
    pub infer_types: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            delimiter: ',',
            quote: '"',
            has_header: true,
            infer_types: false,
        }
    }
}

/// Loads delimited text into tables and writes tables back out
#[derive(Debug, Clone, Default)]
pub struct CsvHandler {
    options: LoadOptions,
}

impl CsvHandler {
    /// Create a handler with the given options
    pub fn new(options: LoadOptions) -> Self {
        CsvHandler { options }
    }

    /// The options this handler loads with
    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    fn tokenizer(&self) -> Tokenizer {
        Tokenizer::new()
            .delimiter(self.options.delimiter)
            .quote(self.options.quote)
    }

    /// Parse text into name-keyed records, consuming the first row as header
    pub fn read_records(&self, text: &str) -> ColframeResult<Vec<Record>> {
        let rows = self.tokenizer().parse(text)?;
        Ok(with_header(rows).1)
    }

    /// Parse text into a table
    ///
    /// With a header, columns are the header names and short or long rows are
    /// padded or truncated. Without one, columns are named `a`, `b`, ... after
    /// the width of the first row and the same padding rule applies.
    ///
    /// # Example
    /// ```
    /// # use colframe::csv_handler::CsvHandler;
    /// let table = CsvHandler::default().load_str("NOC,Medal\nUSA,Gold\nFRA,NA\n").unwrap();
    /// assert_eq!(table.shape(), (2, 2));
    /// assert!(table.column("Medal").unwrap()[1].is_null());
    /// ```
    pub fn load_str(&self, text: &str) -> ColframeResult<Table> {
        let rows = self.tokenizer().parse(text)?;

        let (names, fields) = if self.options.has_header {
            let (header, records) = with_header(rows);
            let mut names: Vec<String> = Vec::with_capacity(header.len());
            for name in header {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
            let fields: Vec<Vec<String>> = names
                .iter()
                .map(|name| {
                    records
                        .iter()
                        .map(|record| record.get(name).cloned().unwrap_or_default())
                        .collect()
                })
                .collect();
            (names, fields)
        } else {
            let width = rows.first().map_or(0, Vec::len);
            let names: Vec<String> = (0..width).map(default_column_name).collect();
            let mut fields = vec![Vec::with_capacity(rows.len()); width];
            for row in rows {
                let mut row = row.into_iter();
                for column in fields.iter_mut() {
                    column.push(row.next().unwrap_or_default());
                }
            }
            (names, fields)
        };

        let data = fields
            .into_iter()
            .map(|column| self.convert_column(column))
            .collect();
        let table = Table::from_parts(names, data)?;
        debug!(
            rows = table.row_count(),
            columns = table.column_count(),
            "loaded table"
        );
        Ok(table)
    }

    /// Turn raw fields into values, numeric when inference applies
    fn convert_column(&self, column: Vec<String>) -> Vec<Value> {
        let numeric = self.options.infer_types
            && column
                .iter()
                .all(|field| is_missing_field(field) || is_numeric_field(field));
        column
            .iter()
            .map(|field| {
                if numeric {
                    Value::infer_field(field)
                } else {
                    Value::from_field(field)
                }
            })
            .collect()
    }

    /// Read a file and parse it into a table
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> ColframeResult<Table> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let table = self.load_str(&text)?;
        info!(
            path = %path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            "loaded file"
        );
        Ok(table)
    }

    /// Write a table as CSV: a header row, then one record per row
    ///
    /// Missing cells are written as `NA`. The handler's delimiter and quote are
    /// used when they are ASCII, otherwise `,` and `"`.
    pub fn write_csv<W: io::Write>(&self, table: &Table, writer: W) -> ColframeResult<()> {
        let delimiter = ascii_byte(self.options.delimiter).unwrap_or(b',');
        let quote = ascii_byte(self.options.quote).unwrap_or(b'"');
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .quote(quote)
            .from_writer(writer);

        csv_writer.write_record(table.columns())?;
        for row in table.rows() {
            csv_writer.write_record(row.values().map(Value::to_field))?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Write a table as CSV to a file, replacing it if it exists
    pub fn save_file<P: AsRef<Path>>(&self, table: &Table, path: P) -> ColframeResult<()> {
        let file = fs::File::create(path.as_ref())?;
        self.write_csv(table, BufWriter::new(file))
    }
}

fn ascii_byte(c: char) -> Option<u8> {
    if c.is_ascii() {
        Some(c as u8)
    } else {
        None
    }
}
