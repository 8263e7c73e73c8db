//! Text helpers shared by the splitter, graph builder, and impact resolver.
//!
//! Tokens are maximal runs of Unicode word characters (letters, digits,
//! underscore), lower-cased. Document-name keywords are the tokens of the
//! file stem, so `Refund_Policy-v2.md` yields `refund_policy` and `v2`.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use sha2::{Digest, Sha256};

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("word pattern is valid"));

static DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("digit pattern is valid"));

/// Marker appended to truncated text.
pub const ELLIPSIS: &str = "...";

/// Deterministic content digest: lowercase hex SHA-256 of the UTF-8 bytes.
#[must_use]
pub fn content_hash(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}

/// Distinct lower-cased word tokens of `text`.
#[must_use]
pub fn token_set(text: &str) -> BTreeSet<String> {
    WORD.find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Keywords derived from a document name: the token set of its file stem.
///
/// The extension is not a keyword; `Support_Script.md` yields
/// `{"support_script"}`.
#[must_use]
pub fn name_keywords(doc_name: &str) -> BTreeSet<String> {
    let stem = Path::new(doc_name)
        .file_stem()
        .map_or_else(|| doc_name.to_string(), |s| s.to_string_lossy().into_owned());
    token_set(&stem)
}

/// Decimal digit runs in `text`, in order of appearance.
#[must_use]
pub fn digit_runs(text: &str) -> Vec<&str> {
    DIGITS.find_iter(text).map(|m| m.as_str()).collect()
}

/// Cut `text` to at most `max_chars` characters.
///
/// Text that fits is returned unchanged. Longer text keeps its first
/// `max_chars - 3` characters followed by `...`, so the result never exceeds
/// `max_chars`.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Whether `needle` occurs in `haystack` delimited by non-word characters
/// (or the start/end of the text) on both sides.
#[must_use]
pub fn contains_whole_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    // Every start position is tried, so overlapping occurrences count.
    let mut offset = 0;
    while let Some(found) = haystack[offset..].find(needle) {
        let start = offset + found;
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + needle.len()..].chars().next();
        if !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char) {
            return true;
        }
        offset = start + haystack[start..].chars().next().map_or(1, char::len_utf8);
    }
    false
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn hash_is_stable_sha256_hex() {
        let a = content_hash("Refunds are issued within 14 days.");
        let b = content_hash("Refunds are issued within 14 days.");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_uppercase()));
        assert_ne!(a, content_hash("Refunds are issued within 7 days."));
    }

    #[test]
    fn tokens_are_lowercased_word_runs() {
        assert_eq!(
            token_set("See RefundPolicy.md, section 2! See."),
            ["2", "md", "refundpolicy", "section", "see"]
                .into_iter()
                .map(String::from)
                .collect::<BTreeSet<_>>()
        );
    }

    #[rstest]
    #[case("RefundPolicy.md", &["refundpolicy"])]
    #[case("Support_Script.md", &["support_script"])]
    #[case("refund-policy v2.txt", &["policy", "refund", "v2"])]
    #[case("README", &["readme"])]
    fn keywords_come_from_stem(#[case] name: &str, #[case] expected: &[&str]) {
        let got: Vec<String> = name_keywords(name).into_iter().collect();
        assert_eq!(got, expected.iter().map(ToString::to_string).collect::<Vec<_>>());
    }

    #[test]
    fn digit_runs_in_order() {
        assert_eq!(digit_runs("within 14 days, or 30 at most"), vec!["14", "30"]);
        assert!(digit_runs("no numbers").is_empty());
    }

    #[rstest]
    #[case("short", 10, "short")]
    #[case("exactly10!", 10, "exactly10!")]
    #[case("this is too long", 10, "this is...")]
    #[case("ééééééé", 5, "éé...")]
    fn truncation_respects_char_budget(
        #[case] input: &str,
        #[case] max: usize,
        #[case] expected: &str,
    ) {
        let out = truncate_chars(input, max);
        assert_eq!(out, expected);
        assert!(out.chars().count() <= max);
    }

    #[rstest]
    #[case("See RefundPolicy.md for details", "RefundPolicy.md", true)]
    #[case("RefundPolicy.md", "RefundPolicy.md", true)]
    #[case("(RefundPolicy.md)", "RefundPolicy.md", true)]
    #[case("OldRefundPolicy.md", "RefundPolicy.md", false)]
    #[case("RefundPolicy.mdx", "RefundPolicy.md", false)]
    #[case("RefundPolicy_md and RefundPolicy.md", "RefundPolicy.md", true)]
    #[case("nothing here", "RefundPolicy.md", false)]
    #[case("xmd.md.md", "md.md", true)]
    #[case("xaa.aa.aa", "aa.aa", true)]
    #[case("éRefundPolicy.md RefundPolicy.md", "RefundPolicy.md", true)]
    fn whole_word_matching(#[case] text: &str, #[case] needle: &str, #[case] expected: bool) {
        assert_eq!(contains_whole_word(text, needle), expected);
    }
}
