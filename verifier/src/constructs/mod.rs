//! # Construct Detector
//!
//! Pure, synchronous detection of named language constructs in a code
//! fragment, used to decide whether coaching feedback should accompany a
//! correct answer.
//!
//! Detection is a two-pass pipeline: [`strip::strip_strings_and_comments`]
//! first replaces string-literal contents and line comments with neutral
//! placeholders, then one structural regex per [`ConstructType`] runs over
//! the stripped code. A construct mentioned inside a string or comment is
//! therefore never reported as detected.

pub mod strip;

use crate::types::ConstructCheckResult;
use once_cell::sync::Lazy;
use regex::Regex;
use util::exercise::ConstructType;

// One-level balanced nesting fragments. Full nesting needs a parser; one
// level covers the compound forms short exercises actually produce.
const BRACKET_BODY: &str = r"(?:[^\[\]]|\[[^\[\]]*\])*";
const BRACE_BODY: &str = r"(?:[^{}]|\{[^{}]*\})*";
const PAREN_BODY: &str = r"(?:[^()\[\]]|\([^()\[\]]*\))*";

/// Subscript with a `:` between the brackets, anchored on a preceding
/// primary so a bare list/lambda literal cannot match.
static SLICE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[A-Za-z0-9_)\]"']\s*\[[^\[\]]*:[^\[\]]*\]"#).unwrap()
});

/// List, set, or dict comprehension. Parenthesized generator expressions do
/// not match: their `for` sits between parens, not brackets/braces.
static COMPREHENSION: Lazy<Regex> = Lazy::new(|| {
    let list = format!(r"\[{BRACKET_BODY}\bfor\b{BRACKET_BODY}\]");
    let brace = format!(r"\{{{BRACE_BODY}\bfor\b{BRACE_BODY}\}}");
    Regex::new(&format!("{list}|{brace}")).unwrap()
});

/// `for` between parens with no stray brackets, so `f([x for x in y])`
/// cannot masquerade as a generator expression.
static GENERATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\({PAREN_BODY}\bfor\b{PAREN_BODY}\)")).unwrap()
});

/// An f/rf prefix directly in front of a quote. The prefix letters sit
/// outside the quotes, so they survive string stripping.
static FSTRING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\b(?:[fF][rR]?|[rR][fF])["']"#).unwrap());

/// Conditional expression: something before `if`, and `else` on the same
/// line with no statement colon in between. A plain `if` statement has
/// nothing before the keyword on its line and its `else` on another line.
static TERNARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+[ \t]+if[ \t]+[^\n:]+[ \t]+else[ \t]+\S+").unwrap());

static ENUMERATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\benumerate\s*\(").unwrap());
static ZIP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bzip\s*\(").unwrap());
static LAMBDA: Lazy<Regex> = Lazy::new(|| Regex::new(r"\blambda\b").unwrap());

fn pattern(construct: ConstructType) -> &'static Regex {
    match construct {
        ConstructType::Slice => &SLICE,
        ConstructType::Comprehension => &COMPREHENSION,
        ConstructType::Fstring => &FSTRING,
        ConstructType::Ternary => &TERNARY,
        ConstructType::Enumerate => &ENUMERATE,
        ConstructType::Zip => &ZIP,
        ConstructType::Lambda => &LAMBDA,
        ConstructType::Generator => &GENERATOR,
    }
}

/// Decide whether `code` exercises the named construct. Unknown construct
/// names report "not detected" rather than erroring.
pub fn check_construct(code: &str, construct_type: &str) -> ConstructCheckResult {
    let Some(construct) = ConstructType::parse(construct_type) else {
        return ConstructCheckResult::miss();
    };
    let stripped = strip::strip_strings_and_comments(code);
    if pattern(construct).is_match(&stripped) {
        ConstructCheckResult::hit(construct)
    } else {
        ConstructCheckResult::miss()
    }
}

/// Check several construct names in order; the first detected one wins.
pub fn check_any_construct<S: AsRef<str>>(code: &str, construct_types: &[S]) -> ConstructCheckResult {
    let stripped = strip::strip_strings_and_comments(code);
    for name in construct_types {
        if let Some(construct) = ConstructType::parse(name.as_ref()) {
            if pattern(construct).is_match(&stripped) {
                return ConstructCheckResult::hit(construct);
            }
        }
    }
    ConstructCheckResult::miss()
}
