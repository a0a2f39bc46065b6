use once_cell::sync::Lazy;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use log::info;

/// Built-in system prompt for the bot. The hosted file-search index it
/// points the model at is referenced only by the id written in the text.
pub const SYSTEM_PROMPT: &str = include_str!("../../prompts/system_prompt.md");

/// Vector store id embedded in [`SYSTEM_PROMPT`]. Never queried from here.
pub const KNOWLEDGE_BASE_ID: &str = "vs_68dc94afddec8191a2ecd1af0a1d0b09";

static BUILTIN: Lazy<Arc<PromptConfig>> = Lazy::new(|| {
    Arc::new(PromptConfig {
        system_prompt: SYSTEM_PROMPT.to_string(),
        source: PromptSource::Builtin,
    })
});

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Failed to read prompt file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Prompt file '{0}' is empty")]
    Empty(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptSource {
    Builtin,
    File(String),
}

impl fmt::Display for PromptSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptSource::Builtin => write!(f, "built-in"),
            PromptSource::File(path) => write!(f, "file '{}'", path),
        }
    }
}

/// The system-role instruction text prepended to every completion request.
/// Resolved once at startup and shared read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptConfig {
    system_prompt: String,
    source: PromptSource,
}

impl PromptConfig {
    pub fn builtin() -> Arc<PromptConfig> {
        Arc::clone(&BUILTIN)
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn source(&self) -> &PromptSource {
        &self.source
    }

    /// Whether the text still points the model at the hosted file-search index.
    pub fn references_knowledge_base(&self) -> bool {
        self.system_prompt.contains(KNOWLEDGE_BASE_ID)
    }
}

pub fn load_prompt<P: AsRef<Path>>(path: P) -> Result<Arc<PromptConfig>, PromptError> {
    let display = path.as_ref().display().to_string();
    let text = fs::read_to_string(&path).map_err(|source| PromptError::Io {
        path: display.clone(),
        source,
    })?;
    if text.trim().is_empty() {
        return Err(PromptError::Empty(display));
    }
    info!("Loaded system prompt from '{}' ({} bytes)", display, text.len());
    Ok(
        Arc::new(PromptConfig {
            system_prompt: text,
            source: PromptSource::File(display),
        })
    )
}

/// Picks the override file when one is configured, the built-in text otherwise.
pub fn resolve_prompt(path: Option<&str>) -> Result<Arc<PromptConfig>, PromptError> {
    match path {
        Some(p) if !p.trim().is_empty() => load_prompt(p),
        _ => Ok(PromptConfig::builtin()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_prompt_references_the_knowledge_base() {
        let prompt = PromptConfig::builtin();
        assert!(prompt.references_knowledge_base());
        assert!(prompt.system_prompt().contains("知恵の輪"));
        assert_eq!(prompt.source(), &PromptSource::Builtin);
    }

    #[test]
    fn builtin_prompt_is_shared() {
        let a = PromptConfig::builtin();
        let b = PromptConfig::builtin();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn resolve_without_path_uses_builtin() {
        assert_eq!(resolve_prompt(None).unwrap().source(), &PromptSource::Builtin);
        assert_eq!(resolve_prompt(Some("  ")).unwrap().source(), &PromptSource::Builtin);
    }

    #[test]
    fn resolve_reads_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prompt.md");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "You are a test bot.").unwrap();

        let prompt = resolve_prompt(path.to_str()).unwrap();
        assert_eq!(prompt.system_prompt(), "You are a test bot.\n");
        assert_eq!(prompt.source(), &PromptSource::File(path.display().to_string()));
        assert!(!prompt.references_knowledge_base());
    }

    #[test]
    fn blank_override_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prompt.md");
        fs::write(&path, "  \n").unwrap();

        let err = load_prompt(&path).unwrap_err();
        assert!(matches!(err, PromptError::Empty(_)));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_prompt("/definitely/not/here.md").unwrap_err();
        assert!(matches!(err, PromptError::Io { .. }));
    }
}
