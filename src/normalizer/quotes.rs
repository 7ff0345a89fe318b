//! Smart-quote normalization (SmartyPants-style).
//!
//! Converts ASCII straight quotes, apostrophes, and related punctuation into
//! their typographic equivalents: directional curly quotes, prime marks for
//! measurements, em dashes, and ellipses.
//!
//! A bare apostrophe is structurally ambiguous: it can open a quotation,
//! close one, join a contraction or possessive, abbreviate a decade (`'93`),
//! or denote feet/minutes. No single left-to-right scan resolves all of
//! these, because the right reading of one apostrophe depends on how the
//! others in the same string resolve. The engine therefore applies an
//! ordered cascade of rewrite rules, each scanning the whole current string;
//! later rules deliberately correct the overreach of earlier ones, so the
//! rule order is a correctness invariant rather than an optimization.

use std::sync::LazyLock;

use regex::Regex;

use super::is_word_char;

// Unicode constants for punctuation characters
// Using escape sequences because some tooling normalizes curly quotes to
// straight quotes

/// Left double quotation mark (U+201C)
pub const LEFT_DOUBLE_QUOTE: char = '\u{201C}';
/// Right double quotation mark (U+201D)
pub const RIGHT_DOUBLE_QUOTE: char = '\u{201D}';
/// Left single quotation mark (U+2018)
pub const LEFT_SINGLE_QUOTE: char = '\u{2018}';
/// Right single quotation mark (U+2019) - also used as curly apostrophe
pub const RIGHT_SINGLE_QUOTE: char = '\u{2019}';
/// Prime (U+2032), used for feet and minutes
pub const PRIME: char = '\u{2032}';
/// Double prime (U+2033), used for inches and seconds
pub const DOUBLE_PRIME: char = '\u{2033}';
/// Triple prime (U+2034)
pub const TRIPLE_PRIME: char = '\u{2034}';
/// Em dash (U+2014)
pub const EM_DASH: char = '\u{2014}';
/// Horizontal ellipsis (U+2026)
pub const ELLIPSIS: char = '\u{2026}';

/// One step of the normalization cascade.
///
/// Most rules are plain pattern rewrites. The backwards-apostrophe rule is
/// the exception: deciding whether a left single quote is really a closing
/// mark requires scanning the remainder of the string for a consistent
/// closer, which a local pattern cannot express.
enum QuoteRule {
    Rewrite {
        pattern: Regex,
        replacement: &'static str,
    },
    FlipBackwardsApostrophes,
}

/// The ordered rule cascade. Each rule's output is the next rule's input;
/// reordering the list changes the semantics.
static QUOTE_RULES: LazyLock<Vec<QuoteRule>> = LazyLock::new(|| {
    let rewrite = |pattern: &str, replacement: &'static str| QuoteRule::Rewrite {
        pattern: Regex::new(pattern).unwrap(),
        replacement,
    };
    vec![
        // Triple apostrophe: a literal triple prime
        rewrite("'''", "\u{2034}"),
        // Opening double quote: after a non-word character or start of
        // string, before a word character
        rewrite("(\\W|^)\"(\\w)", "${1}\u{201C}${2}"),
        // Closing double quote: ends a span opened by a left double quote
        rewrite(
            "(\u{201C}[^\"]*)\"([^\"]*$|[^\u{201C}\"]*\u{201C})",
            "${1}\u{201D}${2}",
        ),
        // Remaining double quote after a non-digit: closing (digits keep
        // theirs for the inches fallback below)
        rewrite("([^0-9])\"", "${1}\u{201D}"),
        // Double apostrophe: a double prime, not a closing quote pair
        rewrite("''", "\u{2033}"),
        // Opening single quote: after a non-word character or start of
        // string, before a non-space character
        rewrite("(\\W|^)'(\\S)", "${1}\u{2018}${2}"),
        // Apostrophe between two letters: contraction or possession
        rewrite("(?i)([a-z])'([a-z])", "${1}\u{2019}${2}"),
        // Decade abbreviation ('93): the previous rule's opening quote was a
        // misfire; rewrite it as a closing-style apostrophe
        rewrite(
            "(?i)\u{2018}([0-9]{2}[^\u{2019}]*)(\u{2018}([^0-9]|$)|$|\u{2019}[a-z])",
            "\u{2019}${1}${2}",
        ),
        // Trailing apostrophe closing a word or an open single-quote span,
        // not followed by a digit
        rewrite("(?i)((\u{2018}[^']*)|[a-z])'([^0-9]|$)", "${1}\u{2019}${3}"),
        // Global consistency backstop, see flip_backwards_apostrophes
        QuoteRule::FlipBackwardsApostrophes,
        // Whatever is left was never confidently directional: plain
        // typographer's marks
        rewrite("'", "\u{2032}"),
        rewrite("\"", "\u{2033}"),
        // Double hyphen: em dash
        rewrite("--", "\u{2014}"),
        // Two or more periods: ellipsis
        rewrite("\\.\\.+", "\u{2026}"),
    ]
});

/// Converts straight quotes, apostrophes, double hyphens, and period runs in
/// `text` into typographic punctuation.
///
/// Total function: never fails, and input without quote-like characters is
/// returned unchanged. Re-running it on its own output does not disturb
/// already-curly punctuation.
pub fn normalize_quotes(text: &str) -> String {
    QUOTE_RULES
        .iter()
        .fold(text.to_string(), |current, rule| match rule {
            QuoteRule::Rewrite {
                pattern,
                replacement,
            } => pattern.replace_all(&current, *replacement).into_owned(),
            QuoteRule::FlipBackwardsApostrophes => flip_backwards_apostrophes(&current),
        })
}

/// Flips left single quotes that cannot be openers into closing apostrophes.
///
/// By this point the local rules have resolved everything they can; what
/// remains ambiguous is a left single quote produced for a leading
/// contraction like `'twas` or `'em`. A left quote is only consistent as an
/// opener when the remainder of the string contains a right single quote
/// that can close it; otherwise it is rewritten to the closing glyph. This
/// is the one step that is not a local left-to-right rewrite.
fn flip_backwards_apostrophes(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut result = String::with_capacity(text.len());

    for (i, &ch) in chars.iter().enumerate() {
        let preceded_by_word = i > 0 && is_word_char(chars[i - 1]);
        if ch == LEFT_SINGLE_QUOTE && !preceded_by_word && !has_matching_closer(&chars, i + 1) {
            result.push(RIGHT_SINGLE_QUOTE);
        } else {
            result.push(ch);
        }
    }

    result
}

/// Whether a closing right single quote for an opener exists at or after
/// `from`.
///
/// Right single quotes embedded in a word, as in contractions, are
/// apostrophes rather than closers and are skipped. Another left single quote before any closer
/// means the candidate opener has nothing to pair with.
fn has_matching_closer(chars: &[char], from: usize) -> bool {
    for (i, &ch) in chars.iter().enumerate().skip(from) {
        match ch {
            LEFT_SINGLE_QUOTE => return false,
            RIGHT_SINGLE_QUOTE => {
                let word_internal = chars.get(i + 1).is_some_and(|&next| is_word_char(next));
                if !word_internal {
                    return true;
                }
            }
            _ => {}
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_quotes(""), "");
    }

    #[test]
    fn test_no_quote_characters_unchanged() {
        let input = "plain text with no punctuation to fix";
        assert_eq!(normalize_quotes(input), input);
    }

    #[test]
    fn test_double_quotes_basic() {
        let result = normalize_quotes("He said \"hello\" to her.");
        assert_eq!(
            result,
            format!(
                "He said {}hello{} to her.",
                LEFT_DOUBLE_QUOTE, RIGHT_DOUBLE_QUOTE
            )
        );
    }

    #[test]
    fn test_double_quotes_multiple_pairs() {
        let result = normalize_quotes("\"Hello\" and \"world\"");
        assert_eq!(
            result,
            format!(
                "{}Hello{} and {}world{}",
                LEFT_DOUBLE_QUOTE, RIGHT_DOUBLE_QUOTE, LEFT_DOUBLE_QUOTE, RIGHT_DOUBLE_QUOTE
            )
        );
    }

    #[test]
    fn test_double_quotes_inside_parentheses() {
        let result = normalize_quotes("(\"quoted\")");
        assert_eq!(
            result,
            format!("({}quoted{})", LEFT_DOUBLE_QUOTE, RIGHT_DOUBLE_QUOTE)
        );
    }

    #[test]
    fn test_double_quote_before_punctuation() {
        let result = normalize_quotes("\"wait,\" she said");
        assert_eq!(
            result,
            format!("{}wait,{} she said", LEFT_DOUBLE_QUOTE, RIGHT_DOUBLE_QUOTE)
        );
    }

    #[test]
    fn test_single_quotes_basic() {
        let result = normalize_quotes("she said 'hello' loudly");
        assert_eq!(
            result,
            format!(
                "she said {}hello{} loudly",
                LEFT_SINGLE_QUOTE, RIGHT_SINGLE_QUOTE
            )
        );
    }

    #[test]
    fn test_contraction() {
        let result = normalize_quotes("it's fine");
        assert_eq!(result, format!("it{}s fine", RIGHT_SINGLE_QUOTE));
    }

    #[test]
    fn test_possessive() {
        let result = normalize_quotes("John's book");
        assert_eq!(result, format!("John{}s book", RIGHT_SINGLE_QUOTE));
    }

    #[test]
    fn test_decade_abbreviation() {
        let result = normalize_quotes("the '90s were loud");
        assert_eq!(result, format!("the {}90s were loud", RIGHT_SINGLE_QUOTE));
    }

    #[test]
    fn test_contraction_and_decade_together() {
        // The first apostrophe is a contraction mark, the second a decade
        // abbreviation; neither may become an opening quote.
        let result = normalize_quotes("it's the '90s");
        assert_eq!(
            result,
            format!(
                "it{}s the {}90s",
                RIGHT_SINGLE_QUOTE, RIGHT_SINGLE_QUOTE
            )
        );
    }

    #[test]
    fn test_leading_contraction_flipped() {
        // No closer exists anywhere, so the opener from the local rules gets
        // flipped by the backwards-apostrophe pass.
        let result = normalize_quotes("'twas the night");
        assert_eq!(result, format!("{}twas the night", RIGHT_SINGLE_QUOTE));
    }

    #[test]
    fn test_opener_kept_when_closer_exists() {
        let result = normalize_quotes("'tis' done");
        assert_eq!(
            result,
            format!("{}tis{} done", LEFT_SINGLE_QUOTE, RIGHT_SINGLE_QUOTE)
        );
    }

    #[test]
    fn test_opener_flipped_when_only_word_internal_apostrophes_follow() {
        let result = normalize_quotes("'tis Bob's");
        assert_eq!(
            result,
            format!("{}tis Bob{}s", RIGHT_SINGLE_QUOTE, RIGHT_SINGLE_QUOTE)
        );
    }

    #[test]
    fn test_feet_and_inches_become_primes() {
        let result = normalize_quotes("he is 5'10\" tall");
        assert_eq!(result, format!("he is 5{}10{} tall", PRIME, DOUBLE_PRIME));
    }

    #[test]
    fn test_double_apostrophe_becomes_double_prime() {
        let result = normalize_quotes("12''");
        assert_eq!(result, format!("12{}", DOUBLE_PRIME));
    }

    #[test]
    fn test_triple_apostrophe_becomes_triple_prime() {
        let result = normalize_quotes("12'''");
        assert_eq!(result, format!("12{}", TRIPLE_PRIME));
    }

    #[test]
    fn test_double_hyphen_becomes_em_dash() {
        let result = normalize_quotes("wait--really");
        assert_eq!(result, format!("wait{}really", EM_DASH));
    }

    #[test]
    fn test_period_runs_become_ellipsis() {
        assert_eq!(normalize_quotes("so.."), format!("so{}", ELLIPSIS));
        assert_eq!(normalize_quotes("so..."), format!("so{}", ELLIPSIS));
        assert_eq!(
            normalize_quotes("one. two."),
            "one. two.",
            "single periods are untouched"
        );
    }

    #[test]
    fn test_idempotent_on_converted_output() {
        let samples = [
            "He said \"hello\" to her.",
            "she said 'hello' loudly",
            "it's the '90s",
            "'twas the night",
            "he is 5'10\" tall",
            "wait--really...",
            "\"Hello\" and \"world\"",
        ];
        for sample in samples {
            let once = normalize_quotes(sample);
            let twice = normalize_quotes(&once);
            assert_eq!(once, twice, "second pass changed output of {sample:?}");
        }
    }

    #[test]
    fn test_curly_input_preserved() {
        let input = format!(
            "{}already{} {}curly{}",
            LEFT_DOUBLE_QUOTE, RIGHT_DOUBLE_QUOTE, LEFT_SINGLE_QUOTE, RIGHT_SINGLE_QUOTE
        );
        assert_eq!(normalize_quotes(&input), input);
    }
}
