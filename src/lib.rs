//! colframe library crate
//!
//! colframe is a small relational data-processing engine for delimited text.
//! The library provides:
//!
//! - A character-level CSV tokenizer with RFC 4180 quoting
//! - An immutable, column-oriented in-memory [`Table`]
//! - Row filtering and column projection
//! - Grouping with first-seen group order and aggregation (sum, mean, min,
//!   max, count, std, var)
//! - Hash equi-joins in inner, left, right and outer modes
//! - Column summaries for a quick look at a dataset
//!
//! Every operation reads its inputs and returns a new table; nothing is
//! mutated in place.
//!
//! ```
//! use colframe::{AggSpec, CsvHandler, JoinOptions, JoinType};
//!
//! let athletes = CsvHandler::default()
//!     .load_str("Name,NOC\nAnn,USA\nBo,FRA\nCy,USA\n")
//!     .unwrap();
//! let regions = CsvHandler::default()
//!     .load_str("NOC,region\nUSA,United States\n")
//!     .unwrap();
//!
//! let joined = athletes
//!     .join(&regions, &JoinOptions::on(&["NOC"]).how(JoinType::Left))
//!     .unwrap();
//! let per_region = joined
//!     .group_by(&["region"])
//!     .unwrap()
//!     .agg(&AggSpec::new().add_named("Name", &["count"]).unwrap())
//!     .unwrap();
//! assert_eq!(per_region.shape(), (2, 2));
//! ```

pub mod aggregate;
pub mod cli;
pub mod commands;
pub mod config;
pub mod csv_handler;
pub mod error;
pub mod group;
pub mod join;
pub mod summary;
pub mod table;
pub mod tokenizer;
pub mod value;

pub use aggregate::{AggSpec, Aggregator};
pub use csv_handler::{CsvHandler, LoadOptions};
pub use error::{ColframeError, ColframeResult};
pub use group::{GroupKey, GroupedTable};
pub use join::{join, JoinOptions, JoinType};
pub use table::{ColumnKind, RowView, Table};
pub use value::Value;
