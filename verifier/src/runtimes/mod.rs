//! Language runtime implementations and the registry the strategy router
//! resolves them from.

pub mod python;

use crate::traits::runtime::LanguageRuntime;
use crate::traits::sandbox::Sandbox;
use std::collections::HashMap;
use std::sync::Arc;
use util::languages::Language;

/// Maps a [`Language`] to its registered runtime. The router looks runtimes
/// up here; a language with no entry grades through the fallback path.
pub struct RuntimeRegistry {
    runtimes: HashMap<Language, Arc<dyn LanguageRuntime>>,
}

impl RuntimeRegistry {
    pub fn new() -> Self {
        RuntimeRegistry {
            runtimes: HashMap::new(),
        }
    }

    /// Register a runtime under the language it reports. Replaces any
    /// previous registration for that language.
    pub fn register(mut self, runtime: Arc<dyn LanguageRuntime>) -> Self {
        self.runtimes.insert(runtime.language(), runtime);
        self
    }

    /// Registry with a single Python runtime wired to the given sandbox
    /// handle (or detached, when `None`).
    pub fn with_python_sandbox(sandbox: Option<Arc<dyn Sandbox>>) -> Self {
        RuntimeRegistry::new().register(Arc::new(python::PythonRuntime::new(sandbox)))
    }

    pub fn get(&self, language: Language) -> Option<Arc<dyn LanguageRuntime>> {
        self.runtimes.get(&language).cloned()
    }
}

impl Default for RuntimeRegistry {
    fn default() -> Self {
        RuntimeRegistry::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_registered_runtime() {
        let registry = RuntimeRegistry::with_python_sandbox(None);
        assert!(registry.get(Language::Python).is_some());
        assert!(registry.get(Language::JavaScript).is_none());
    }

    #[test]
    fn test_empty_registry_has_no_runtimes() {
        let registry = RuntimeRegistry::new();
        assert!(registry.get(Language::Python).is_none());
    }
}
