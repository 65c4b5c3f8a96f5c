//! CLI argument parsing module for colframe
//!
//! This module defines the command-line interface using the clap crate. The
//! global options describe how input files are read; each subcommand runs one
//! table operation and prints the result.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command-line arguments for colframe
#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "Filter, group, aggregate and join CSV files in memory"
)]
pub struct ColframeArgs {
    /// Field separator character for input and output
    ///
    /// Similar to awk's -F option. Use `\t` or `tab` for tab-separated files.
    #[clap(short = 'F', long, global = true, help = "Field separator character")]
    pub field_separator: Option<String>,

    /// Quote character used around fields that contain separators or newlines
    #[clap(long, global = true, help = "Quote character")]
    pub quote: Option<String>,

    /// Treat the first row as data and name columns a, b, c, ...
    #[clap(long, global = true, help = "Input files have no header row")]
    pub no_header: bool,

    /// Store columns whose values are all numbers as numbers instead of text
    #[clap(long, global = true, help = "Infer numeric columns")]
    pub infer_types: bool,

    /// Enable verbose diagnostic output on stderr
    #[clap(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Command,
}

/// Table operations available from the command line
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a preview of the first rows of a file
    Show {
        /// Input file
        file: PathBuf,

        /// Only show the first N rows
        #[clap(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Print per-column statistics for a file
    Describe {
        /// Input file
        file: PathBuf,
    },

    /// Filter rows and pick columns, printing CSV
    Select {
        /// Input file
        file: PathBuf,

        /// Comma-separated columns to keep, in output order
        #[clap(short, long)]
        columns: Option<String>,

        /// Keep rows where COLUMN equals VALUE (repeatable)
        #[clap(short = 'w', long = "where", value_name = "COLUMN=VALUE")]
        conditions: Vec<String>,

        /// Keep rows where COLUMN matches a regular expression (repeatable)
        #[clap(short = 'm', long = "match", value_name = "COLUMN=REGEX")]
        matches: Vec<String>,
    },

    /// Group rows and aggregate columns, printing CSV
    Aggregate {
        /// Input file
        file: PathBuf,

        /// Comma-separated grouping columns; omit to aggregate the whole table
        #[clap(short, long)]
        by: Option<String>,

        /// Aggregation as COLUMN:AGG[,AGG...] (repeatable)
        #[clap(short, long, required = true, value_name = "COLUMN:AGGS")]
        agg: Vec<String>,
    },

    /// Join two files on key columns, printing CSV
    Join {
        /// Left input file
        left: PathBuf,

        /// Right input file
        right: PathBuf,

        /// Comma-separated key columns present in both files
        #[clap(long)]
        on: String,

        /// Join type: inner, left, right or outer
        #[clap(long, default_value = "inner")]
        how: String,

        /// Suffixes for overlapping columns as LEFT,RIGHT
        #[clap(long, default_value = "_x,_y")]
        suffixes: String,
    },
}

/// Parse command-line arguments into the ColframeArgs structure
pub fn parse_args() -> ColframeArgs {
    ColframeArgs::parse()
}
