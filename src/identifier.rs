//! Glyph to asset identifier conversion.
//!
//! The asset server names Unicode emoji after their codepoints in lowercase
//! hex. A handful of sequences are named differently from what a plain
//! concatenation produces; those are listed in [`EXCEPTIONS`] and nothing
//! else is rewritten. Unknown composites will simply miss at fetch time.

use regex::Regex;
use std::sync::LazyLock;

const VARIATION_SELECTORS: [&str; 2] = ["fe0e", "fe0f"];

static SHRUG_JOINER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(1f937)200d(.*)$").expect("static regex"));

static FLAG_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(1f1..)(1f1..)$").expect("static regex"));

/// A rewrite applied to identifiers whose raw form differs from the
/// server's naming.
struct IdentifierRule {
    name: &'static str,
    apply: fn(&str) -> Option<String>,
}

const EXCEPTIONS: &[IdentifierRule] = &[
    IdentifierRule {
        name: "shrug-joiner",
        apply: shrug_joiner,
    },
    IdentifierRule {
        name: "flag-pair",
        apply: flag_pair,
    },
];

// `1f937` + ZWJ: the server uses a hyphen in place of the joiner.
fn shrug_joiner(identifier: &str) -> Option<String> {
    SHRUG_JOINER
        .captures(identifier)
        .map(|caps| format!("{}-{}", &caps[1], &caps[2]))
}

// Two regional indicators: the server separates them with a hyphen.
fn flag_pair(identifier: &str) -> Option<String> {
    FLAG_PAIR
        .captures(identifier)
        .map(|caps| format!("{}-{}", &caps[1], &caps[2]))
}

/// Concatenated lowercase hex of every scalar value in `glyph`.
pub fn raw_identifier(glyph: &str) -> String {
    glyph
        .chars()
        .map(|c| format!("{:x}", u32::from(c)))
        .collect()
}

/// Applies the variation-selector strip and the exception list to a raw
/// identifier.
pub fn normalize_raw(raw: &str) -> String {
    let mut identifier = strip_variation_selector(raw).to_string();
    for rule in EXCEPTIONS {
        if let Some(rewritten) = (rule.apply)(&identifier) {
            log::debug!("identifier rule {} rewrote {identifier} to {rewritten}", rule.name);
            identifier = rewritten;
        }
    }
    identifier
}

/// Asset identifier for a glyph, as used in `unicode/<identifier>.png`.
pub fn normalize(glyph: &str) -> String {
    normalize_raw(&raw_identifier(glyph))
}

fn strip_variation_selector(raw: &str) -> &str {
    VARIATION_SELECTORS
        .iter()
        .find_map(|selector| raw.strip_suffix(selector))
        .unwrap_or(raw)
}
