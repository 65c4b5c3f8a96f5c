//! Configuration module for colframe
//!
//! [`AppConfig`] gathers the settings shared by every command. It is built
//! once from the command-line arguments and passed to the components that
//! need it.

use crate::cli::ColframeArgs;
use crate::csv_handler::LoadOptions;
use crate::error::{ColframeError, ColframeResult};

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Whether to show verbose output
    verbose: bool,

    /// Field separator for input and output
    delimiter: char,

    /// Quote character for input
    quote: char,

    /// Whether input files start with a header row
    has_header: bool,

    /// Whether to infer numeric columns while loading
    infer_types: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            verbose: false,
            delimiter: ',',
            quote: '"',
            has_header: true,
            infer_types: false,
        }
    }
}

/// Parse a single-character setting, accepting `\t` and `tab` for a tab
pub fn parse_char_setting(setting: &str, what: &str) -> ColframeResult<char> {
    match setting {
        "\\t" | "tab" => return Ok('\t'),
        _ => {}
    }
    let mut chars = setting.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ColframeError::InvalidSpec(format!(
            "{} must be a single character, got '{}'",
            what, setting
        ))),
    }
}

impl AppConfig {
    /// Build the configuration from parsed command-line arguments
    pub fn from_args(args: &ColframeArgs) -> ColframeResult<Self> {
        let mut config = AppConfig {
            verbose: args.verbose,
            has_header: !args.no_header,
            infer_types: args.infer_types,
            ..AppConfig::default()
        };
        if let Some(separator) = &args.field_separator {
            config.delimiter = parse_char_setting(separator, "field separator")?;
        }
        if let Some(quote) = &args.quote {
            config.quote = parse_char_setting(quote, "quote character")?;
        }
        if config.delimiter == config.quote {
            return Err(ColframeError::InvalidSpec(
                "field separator and quote character must differ".to_string(),
            ));
        }
        Ok(config)
    }

    /// Get the verbose flag
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Get the field separator
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Options for loading input files under this configuration
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            delimiter: self.delimiter,
            quote: self.quote,
            has_header: self.has_header,
            infer_types: self.infer_types,
        }
    }
}
