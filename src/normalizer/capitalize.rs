//! Proper-noun capitalization for person, company, and address names.
//!
//! Free-form name input arrives in every casing imaginable ("JOHN SMITH",
//! "mcdonald", "VON trap"). Plain title-casing mangles the linguistic
//! exceptions: roman-numeral generation suffixes, lowercase name particles,
//! internal capitals after Mc/Mac/O'/D' prefixes, and deliberately
//! mixed-case short tokens. This module re-capitalizes token by token
//! through an ordered classification chain that encodes those exceptions as
//! static lookup tables rather than nested conditionals.

use super::is_latin1_letter;
use super::quotes::RIGHT_SINGLE_QUOTE;

/// Roman-numeral generation suffixes, kept fully uppercase ("III").
const ROMAN_SUFFIXES: &[&str] = &["ii", "iii", "iv", "v"];

/// Name particles kept fully lowercase ("von Trap").
const PARTICLES: &[&str] = &["dit", "de", "von"];

/// Compound-name prefixes whose following letter is capitalized
/// independently ("McDonald", "O'Donnel"). The apostrophe forms use the
/// curly glyph, which is what [`super::quotes::normalize_quotes`] emits for
/// possessives.
const COMPOUND_PREFIXES: &[&str] = &["mc", "mac", "o\u{2019}", "d\u{2019}"];

/// How a single name token is to be rewritten. Classification precedence is
/// the order of [`classify`]'s checks; first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenCase {
    /// Single character, a mid-name initial: always uppercased.
    Initial,
    /// Roman-numeral suffix: whole token uppercased.
    RomanSuffix,
    /// Name particle: whole token lowercased.
    Particle,
    /// Short token in input that already mixes cases: left as given.
    MixedPreserved,
    /// Everything else: title case with the compound-prefix fix-up.
    TitleCase,
}

/// Re-capitalizes a proper-noun string token by token.
///
/// Characters outside the allowed name set (letters including the Latin-1
/// supplement, digits, curly apostrophe, space, comma, hyphen) are dropped
/// to spaces, space runs are collapsed, and each remaining token is
/// rewritten according to its classification. Commas and hyphens separate
/// tokens but are preserved verbatim in the output.
///
/// Total function: never fails. Empty or fully-excluded input degrades to
/// an empty string.
pub fn capitalize_name(text: &str) -> String {
    // Mixed-case detection runs over the original input, before the
    // character-set restriction drops anything.
    let has_both_cases =
        text.chars().any(char::is_uppercase) && text.chars().any(char::is_lowercase);

    let restricted: String = text
        .chars()
        .map(|c| if is_name_char(c) { c } else { ' ' })
        .collect();
    let collapsed = collapse_spaces(restricted.trim());

    let mut result = String::with_capacity(collapsed.len());
    let mut token = String::new();
    for c in collapsed.chars() {
        if is_separator(c) {
            flush_token(&mut result, &mut token, has_both_cases);
            result.push(c);
        } else {
            token.push(c);
        }
    }
    flush_token(&mut result, &mut token, has_both_cases);

    result
}

fn flush_token(result: &mut String, token: &mut String, has_both_cases: bool) {
    if token.is_empty() {
        return;
    }
    let case = classify(token, has_both_cases);
    result.push_str(&rewrite(token, case));
    token.clear();
}

/// Classifies a token through the ordered exception chain.
///
/// List membership is checked before mixed-case preservation on purpose: a
/// particle stays lowercase even when the caller typed it as "VON".
fn classify(token: &str, has_both_cases: bool) -> TokenCase {
    let len = token.chars().count();
    if len == 1 {
        return TokenCase::Initial;
    }
    if len <= 3 {
        let lower = token.to_lowercase();
        if ROMAN_SUFFIXES.contains(&lower.as_str()) {
            return TokenCase::RomanSuffix;
        }
        if PARTICLES.contains(&lower.as_str()) {
            return TokenCase::Particle;
        }
        if has_both_cases {
            return TokenCase::MixedPreserved;
        }
    }
    TokenCase::TitleCase
}

fn rewrite(token: &str, case: TokenCase) -> String {
    match case {
        TokenCase::Initial | TokenCase::RomanSuffix => token.to_uppercase(),
        TokenCase::Particle => token.to_lowercase(),
        TokenCase::MixedPreserved => token.to_string(),
        TokenCase::TitleCase => title_case(token),
    }
}

/// Lowercases the token, capitalizes its first character, and applies the
/// compound-prefix fix-up: `mc`/`mac`/`o'`/`d'` followed by at least two
/// more characters gets the remainder capitalized independently.
fn title_case(token: &str) -> String {
    let lower = token.to_lowercase();
    for prefix in COMPOUND_PREFIXES {
        if let Some(rest) = lower.strip_prefix(prefix) {
            if rest.chars().count() >= 2 {
                return format!("{}{}", capitalize_first(prefix), capitalize_first(rest));
            }
            break;
        }
    }
    capitalize_first(&lower)
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Whether `c` may appear in a name token or as a preserved separator.
fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || is_latin1_letter(c) || c == RIGHT_SINGLE_QUOTE || is_separator(c)
}

fn is_separator(c: char) -> bool {
    c == ' ' || c == ',' || c == '-'
}

fn collapse_spaces(s: &str) -> String {
    let mut collapsed = String::with_capacity(s.len());
    let mut previous_was_space = false;
    for c in s.chars() {
        if c == ' ' {
            if !previous_was_space {
                collapsed.push(c);
            }
            previous_was_space = true;
        } else {
            collapsed.push(c);
            previous_was_space = false;
        }
    }
    collapsed
}
