//! Text cleanup shared by the query builder and the fulfillment extractor.

use std::sync::LazyLock;

use regex::Regex;

static SCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script>").expect("valid script regex"));
static STYLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style\b[^>]*>.*?</style>").expect("valid style regex"));
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<[^>]+>").expect("valid tags regex"));

/// Entities decoded after tag stripping. `&amp;` goes last so `&amp;lt;`
/// decodes to the literal text `&lt;` rather than `<`.
const ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&#160;", " "),
    ("&quot;", "\""),
    ("&#34;", "\""),
    ("&#39;", "'"),
    ("&#x27;", "'"),
    ("&apos;", "'"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&amp;", "&"),
];

/// Trailing characters removed by [`trim_trailing_punctuation`].
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', '-', '|'];

/// Abbreviations whose final period belongs to the name (`"Acme Inc."`).
const CORPORATE_ABBREVIATIONS: &[&str] = &["inc.", "co.", "corp.", "ltd.", "bros.", "l.l.c.", "s.a."];

/// Removes `<script>`/`<style>` blocks and all tags, then decodes common
/// HTML entities. Tags become spaces so adjacent words do not fuse.
#[must_use]
pub fn strip_markup(input: &str) -> String {
    let without_scripts = SCRIPT_RE.replace_all(input, " ");
    let without_styles = STYLE_RE.replace_all(&without_scripts, " ");
    let mut text = TAG_RE.replace_all(&without_styles, " ").into_owned();
    for (entity, replacement) in ENTITIES {
        if text.contains(entity) {
            text = text.replace(entity, replacement);
        }
    }
    text
}

/// Drops invisible formatting marks and control characters, then collapses
/// every whitespace run to a single space and trims the ends.
#[must_use]
pub fn collapse_whitespace(input: &str) -> String {
    input
        .chars()
        .filter(|c| !is_invisible(*c))
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Full cleanup: markup removal followed by whitespace collapsing.
#[must_use]
pub fn sanitize_text(input: &str) -> String {
    collapse_whitespace(&strip_markup(input))
}

/// Trims trailing punctuation and whitespace, keeping the period of a
/// trailing corporate abbreviation such as `Inc.`.
#[must_use]
pub fn trim_trailing_punctuation(input: &str) -> &str {
    let mut s = input.trim_end();
    while let Some(last) = s.chars().next_back() {
        if !TRAILING_PUNCTUATION.contains(&last) {
            break;
        }
        if last == '.' && ends_with_abbreviation(s) {
            break;
        }
        s = s[..s.len() - last.len_utf8()].trim_end();
    }
    s
}

fn ends_with_abbreviation(s: &str) -> bool {
    let last_word = s.rsplit(char::is_whitespace).next().unwrap_or_default();
    CORPORATE_ABBREVIATIONS
        .iter()
        .any(|abbr| last_word.eq_ignore_ascii_case(abbr))
}

/// Zero-width and directional marks that marketplaces sprinkle into
/// attribute tables (e.g. the U+200E before UPC values).
fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{200b}'..='\u{200f}' | '\u{202a}'..='\u{202e}' | '\u{2060}' | '\u{feff}'
    )
}
