//! String/comment stripping for the construct detector.
//!
//! A small quote- and escape-aware scanner, not a regex: a single regex
//! cannot safely strip nested quotes (`"it's"`, `'say "hi"'`) or tell a `#`
//! inside a string from a comment marker. Contents of string literals are
//! replaced with a neutral placeholder while the surrounding quotes (and any
//! prefix letters such as `f`/`r`/`b`, which sit outside the quotes) are
//! kept, so patterns can still anchor on them. Line comments are dropped up
//! to, but not including, the newline.

/// Neutral stand-in for stripped string contents.
const PLACEHOLDER: char = '\u{0}';

/// Replace string-literal contents and line comments so that construct
/// patterns never fire on text inside them.
pub fn strip_strings_and_comments(code: &str) -> String {
    let chars: Vec<char> = code.chars().collect();
    let mut out = String::with_capacity(code.len());
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];

        if ch == '#' {
            while i < chars.len() && chars[i] != '\n' {
                i += 1;
            }
            continue;
        }

        if ch == '"' || ch == '\'' {
            let quote = ch;
            let triple =
                i + 2 < chars.len() && chars[i + 1] == quote && chars[i + 2] == quote;
            if triple {
                out.push(quote);
                out.push(quote);
                out.push(quote);
                i += 3;
            } else {
                out.push(quote);
                i += 1;
            }

            let mut emitted_placeholder = false;
            while i < chars.len() {
                if chars[i] == '\\' {
                    // Escaped character, including escaped quotes.
                    i = (i + 2).min(chars.len());
                    emit_once(&mut out, &mut emitted_placeholder);
                    continue;
                }
                if chars[i] == quote {
                    if triple {
                        if i + 2 < chars.len()
                            && chars[i + 1] == quote
                            && chars[i + 2] == quote
                        {
                            out.push(quote);
                            out.push(quote);
                            out.push(quote);
                            i += 3;
                            break;
                        }
                    } else {
                        out.push(quote);
                        i += 1;
                        break;
                    }
                }
                if !triple && chars[i] == '\n' {
                    // Unterminated single-quoted string: stop at line end.
                    break;
                }
                emit_once(&mut out, &mut emitted_placeholder);
                i += 1;
            }
            continue;
        }

        out.push(ch);
        i += 1;
    }

    out
}

fn emit_once(out: &mut String, emitted: &mut bool) {
    if !*emitted {
        out.push(PLACEHOLDER);
        *emitted = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_code_untouched() {
        assert_eq!(strip_strings_and_comments("x = s[1:4]"), "x = s[1:4]");
    }

    #[test]
    fn test_string_contents_removed() {
        let stripped = strip_strings_and_comments("x = \"[a for a in b]\"");
        assert!(!stripped.contains("for"));
        assert!(stripped.contains('"'));
    }

    #[test]
    fn test_comment_removed_keeps_newline() {
        let stripped = strip_strings_and_comments("x = 1  # [a for a in b]\ny = 2");
        assert!(!stripped.contains("for"));
        assert!(stripped.contains("y = 2"));
        assert_eq!(stripped.lines().count(), 2);
    }

    #[test]
    fn test_escaped_quote_does_not_end_string() {
        let stripped = strip_strings_and_comments(r#"s = "it\"s [a for a in b]" + t"#);
        assert!(!stripped.contains("for"));
        assert!(stripped.ends_with("+ t"));
    }

    #[test]
    fn test_nested_other_quote_kind() {
        let stripped = strip_strings_and_comments(r#"s = 'say "hi" for real'"#);
        assert!(!stripped.contains("for"));
    }

    #[test]
    fn test_hash_inside_string_is_not_a_comment() {
        let stripped = strip_strings_and_comments("s = \"#tag\"\ny = s[1:]");
        assert!(stripped.contains("y = s[1:]"));
    }

    #[test]
    fn test_triple_quoted_block() {
        let code = "s = \"\"\"\nline with 'quotes' and [a for a in b]\n\"\"\"\nz = 1";
        let stripped = strip_strings_and_comments(code);
        assert!(!stripped.contains("for"));
        assert!(stripped.contains("z = 1"));
    }

    #[test]
    fn test_fstring_prefix_survives() {
        let stripped = strip_strings_and_comments("name = f\"hello {user}\"");
        assert!(stripped.contains("f\""));
        assert!(!stripped.contains("user"));
    }
}
