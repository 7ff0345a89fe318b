//! Typographic normalization engine.
//!
//! Two independent, stateless stages: [`quotes::normalize_quotes`] rewrites
//! ASCII straight quotes into directional typographic quotes and prime marks,
//! and [`capitalize::capitalize_name`] re-capitalizes free-form proper-noun
//! text (person, company, and address names). Callers may apply either stage
//! alone or compose them in any order; neither shares state with the other.

pub mod capitalize;
pub mod quotes;

/// Whether `c` is a word character in the sense used by the quote rules:
/// a letter, digit, or underscore.
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Whether `c` is a letter from the Latin-1 supplement block (accented
/// letters such as `é` or `Ü`; excludes the multiplication and division
/// signs that sit in the same range).
pub(crate) fn is_latin1_letter(c: char) -> bool {
    ('\u{00C0}'..='\u{00FF}').contains(&c) && c.is_alphabetic()
}
