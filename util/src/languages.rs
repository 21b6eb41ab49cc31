use serde::{Deserialize, Serialize};

/// Scripting languages a submission can be written in.
/// Serialized/deserialized in `lowercase` for config JSON.
/// Common aliases are accepted (e.g., "py", "js").
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// The default scripting language when an exercise does not declare one.
    #[default]
    #[serde(alias = "py", alias = "python3")]
    Python,
    #[serde(alias = "js", alias = "node")]
    JavaScript,
}

impl Language {
    /// Canonical lowercase identifier, as stored by the curriculum store.
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
        }
    }

    /// Lenient lookup from a raw identifier. Accepts the same aliases as the
    /// serde form; returns `None` for anything unrecognized.
    pub fn parse(name: &str) -> Option<Language> {
        match name.trim().to_ascii_lowercase().as_str() {
            "python" | "python3" | "py" => Some(Language::Python),
            "javascript" | "js" | "node" => Some(Language::JavaScript),
            _ => None,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_python() {
        assert_eq!(Language::default(), Language::Python);
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(Language::parse("py"), Some(Language::Python));
        assert_eq!(Language::parse(" Python3 "), Some(Language::Python));
        assert_eq!(Language::parse("js"), Some(Language::JavaScript));
        assert_eq!(Language::parse("cobol"), None);
    }

    #[test]
    fn test_serde_lowercase_and_aliases() {
        let lang: Language = serde_json::from_str("\"python\"").unwrap();
        assert_eq!(lang, Language::Python);
        let lang: Language = serde_json::from_str("\"js\"").unwrap();
        assert_eq!(lang, Language::JavaScript);
        assert_eq!(serde_json::to_string(&Language::Python).unwrap(), "\"python\"");
    }
}
