//! Plain string comparison with whitespace and quoting normalization.
//!
//! This is the only strategy that never touches a runtime, and the single
//! fallback target for every strategy that does. Normalization is deliberately
//! shallow: trim, collapse whitespace runs, and unify quote characters so
//! `'a'` and `"a"` (and smart-quote variants pasted from rich text) compare
//! equal. Anything deeper belongs to the token or AST strategies.

use crate::types::MatchOutcome;

/// Canonical textual form used for exact comparison.
pub fn normalize_answer(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for ch in text.trim().chars() {
        let ch = match ch {
            '"' | '\u{2018}' | '\u{2019}' | '\u{201C}' | '\u{201D}' => '\'',
            other => other,
        };
        if ch.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(ch);
    }
    out
}

/// Compare the submission against the expected answer, then each accepted
/// alternative in order. First match wins.
pub fn compare(expected: &str, submission: &str, alternatives: &[String]) -> MatchOutcome {
    let submission = normalize_answer(submission);
    if submission == normalize_answer(expected) {
        return MatchOutcome::primary();
    }
    for alternative in alternatives {
        if submission == normalize_answer(alternative) {
            return MatchOutcome::alternative(alternative.clone());
        }
    }
    MatchOutcome::miss()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(normalize_answer("  s[1 : 4]\n"), "s[1 : 4]");
        let outcome = compare("s[1:4]", "  s[1:4]  ", &[]);
        assert!(outcome.matched);
        assert_eq!(outcome.matched_alternative, None);
    }

    #[test]
    fn test_quote_styles_unify() {
        let outcome = compare("print('hi')", "print(\"hi\")", &[]);
        assert!(outcome.matched);
        // Smart quotes pasted from rich text.
        let outcome = compare("print('hi')", "print(\u{2018}hi\u{2019})", &[]);
        assert!(outcome.matched);
    }

    #[test]
    fn test_alternatives_checked_in_order() {
        let alternatives = vec!["b".to_string(), "c".to_string()];
        let outcome = compare("a", "c", &alternatives);
        assert!(outcome.matched);
        assert_eq!(outcome.matched_alternative.as_deref(), Some("c"));
    }

    #[test]
    fn test_primary_match_has_no_alternative() {
        let alternatives = vec!["a".to_string()];
        let outcome = compare("a", "a", &alternatives);
        assert!(outcome.matched);
        assert_eq!(outcome.matched_alternative, None);
    }

    #[test]
    fn test_mismatch() {
        let outcome = compare("x[:3]", "x[:4]", &[]);
        assert!(!outcome.matched);
        assert_eq!(outcome.matched_alternative, None);
    }
}
