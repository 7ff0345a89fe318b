//! Smarten is a library of small, composable input-normalization functions.
//!
//! The core is a typographic normalization engine with two independent
//! stages: [`normalize_quotes`] rewrites ASCII straight quotes into
//! correctly-disambiguated curly quotes and prime marks, and
//! [`capitalize_name`] re-capitalizes free-form proper-noun text with the
//! usual linguistic exceptions (roman-numeral suffixes, name particles,
//! internal capitals like "McDonald"). Both are total functions: any text
//! in, normalized text out, never an error.
//!
//! # Example
//!
//! ```
//! use smarten::{Options, normalize};
//!
//! let options = Options {
//!     capitalize_names: true,
//!     ..Options::default()
//! };
//! let output = normalize("john q. o'donnel, III", &options);
//! assert_eq!(output, "John Q O\u{2019}Donnel, III");
//! ```

pub mod config;
mod normalizer;
pub mod pipeline;

pub use normalizer::capitalize::capitalize_name;
pub use normalizer::quotes::{
    DOUBLE_PRIME, ELLIPSIS, EM_DASH, LEFT_DOUBLE_QUOTE, LEFT_SINGLE_QUOTE, PRIME,
    RIGHT_DOUBLE_QUOTE, RIGHT_SINGLE_QUOTE, TRIPLE_PRIME, normalize_quotes,
};

/// Normalization options for the top-level [`normalize`] entry point.
#[derive(Debug, Clone)]
pub struct Options {
    /// Rewrite straight quotes, apostrophes, double hyphens, and period runs
    /// into typographic punctuation. Default: true.
    pub smart_quotes: bool,
    /// Re-capitalize the input as proper-noun text. Default: false.
    pub capitalize_names: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            smart_quotes: true,
            capitalize_names: false,
        }
    }
}

/// Applies the enabled normalizations to `input`.
///
/// Quote normalization runs first so that the capitalizer sees curly
/// apostrophes, which it treats as part of a name token; the stages are
/// otherwise independent.
pub fn normalize(input: &str, options: &Options) -> String {
    let mut output = if options.smart_quotes {
        normalize_quotes(input)
    } else {
        input.to_string()
    };
    if options.capitalize_names {
        output = capitalize_name(&output);
    }
    output
}
