//! Character-level CSV tokenizer
//!
//! Turns raw text into ordered rows of string fields. The scanner is a small
//! two-state machine (outside quotes / inside quotes) following RFC 4180
//! quoting: a field may begin with the quote character, a doubled quote inside
//! a quoted span is a literal quote, and quoted spans may contain delimiters
//! and line breaks.
//!
//! Blank physical lines are dropped. A row of several empty fields (for
//! example `,,`) is not blank and is kept.

use tracing::debug;

use crate::error::{ColframeError, ColframeResult};

/// Scanner state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Unquoted,
    InQuotes,
}

/// Configurable CSV tokenizer
///
/// # Example
/// ```
/// # use colframe::tokenizer::Tokenizer;
/// let rows = Tokenizer::new().parse("a,b\n\"x, y\",z\n").unwrap();
/// assert_eq!(rows, vec![vec!["a", "b"], vec!["x, y", "z"]]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer {
    delimiter: char,
    quote: char,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Tokenizer {
            delimiter: ',',
            quote: '"',
        }
    }
}

/// Accumulates fields and rows while scanning
struct RowBuilder {
    rows: Vec<Vec<String>>,
    row: Vec<String>,
    field: String,
}

impl RowBuilder {
    fn new() -> Self {
        RowBuilder {
            rows: Vec::new(),
            row: Vec::new(),
            field: String::new(),
        }
    }

    fn end_field(&mut self) {
        self.row.push(std::mem::take(&mut self.field));
    }

    fn end_row(&mut self) {
        self.end_field();
        let row = std::mem::take(&mut self.row);
        // A lone empty field is a blank line
        if row.len() > 1 || !row[0].is_empty() {
            self.rows.push(row);
        }
    }

    fn finish(mut self) -> Vec<Vec<String>> {
        if !self.field.is_empty() || !self.row.is_empty() {
            self.end_field();
            let row = std::mem::take(&mut self.row);
            self.rows.push(row);
        }
        self.rows
    }
}

impl Tokenizer {
    /// Create a tokenizer with `,` as delimiter and `"` as quote character
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the quote character
    pub fn quote(mut self, quote: char) -> Self {
        self.quote = quote;
        self
    }

    /// Split text into rows of fields
    ///
    /// `\n`, `\r\n` and a lone `\r` all terminate a record outside quotes.
    /// Any content after the last terminator is finalized as the last row.
    ///
    /// # Returns
    /// * `Ok(rows)` with every non-blank record in input order
    /// * `Err(MalformedField)` if a quote appears after other characters in an unquoted field
    /// * `Err(UnterminatedQuote)` if the input ends inside a quoted span
    pub fn parse(&self, text: &str) -> ColframeResult<Vec<Vec<String>>> {
        let mut builder = RowBuilder::new();
        let mut state = State::Unquoted;
        let mut line = 1;
        let mut quote_line = 1;
        let mut chars = text.chars().peekable();

        while let Some(ch) = chars.next() {
            match state {
                State::InQuotes => {
                    if ch == self.quote {
                        if chars.peek() == Some(&self.quote) {
                            chars.next();
                            builder.field.push(self.quote);
                        } else {
                            state = State::Unquoted;
                        }
                    } else {
                        if ch == '\n' {
                            line += 1;
                        }
                        builder.field.push(ch);
                    }
                }
                State::Unquoted => {
                    if ch == self.quote {
                        if !builder.field.is_empty() {
                            return Err(ColframeError::MalformedField { line });
                        }
                        state = State::InQuotes;
                        quote_line = line;
                    } else if ch == self.delimiter {
                        builder.end_field();
                    } else if ch == '\n' || ch == '\r' {
                        if ch == '\r' && chars.peek() == Some(&'\n') {
                            chars.next();
                        }
                        line += 1;
                        builder.end_row();
                    } else {
                        builder.field.push(ch);
                    }
                }
            }
        }

        if state == State::InQuotes {
            return Err(ColframeError::UnterminatedQuote { line: quote_line });
        }

        let rows = builder.finish();
        debug!(rows = rows.len(), lines = line, "tokenized input");
        Ok(rows)
    }
}

/// Split text into rows using the default delimiter and quote character
pub fn parse(text: &str) -> ColframeResult<Vec<Vec<String>>> {
    Tokenizer::new().parse(text)
}
