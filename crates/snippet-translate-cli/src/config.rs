//! Optional TOML configuration.
//!
//! ```toml
//! [collaborators.js]
//! command = "node"
//! args = ["tools/parse_js.js"]
//! ```

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use snippet_translate::Language;
use snippet_translate::Translator;
use snippet_translate::native::ProcessCollaborator;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// External parsers keyed by language tag.
    #[serde(default)]
    pub collaborators: BTreeMap<String, CollaboratorConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollaboratorConfig {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// A translator using the configured collaborators.
    pub fn translator(&self) -> Result<Translator> {
        let mut translator = Translator::new();
        for (tag, collaborator) in &self.collaborators {
            let Some(language) = Language::from_tag(tag) else {
                bail!("unknown language `{tag}` in [collaborators]");
            };
            tracing::debug!(%language, command = %collaborator.command, "configured collaborator");
            translator = translator.with_collaborator(
                language,
                ProcessCollaborator::new(&collaborator.command).args(&collaborator.args),
            );
        }
        Ok(translator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_collaborators() {
        let config = Config::parse(
            r#"
[collaborators.js]
command = "node"
args = ["tools/parse_js.js"]

[collaborators.python]
command = "python3"
"#,
        )
        .unwrap();
        assert_eq!(config.collaborators.len(), 2);
        assert_eq!(config.collaborators["js"].args, ["tools/parse_js.js"]);
        assert!(config.collaborators["python"].args.is_empty());
        assert!(config.translator().is_ok());
    }

    #[test]
    fn test_empty_config() {
        let config = Config::parse("").unwrap();
        assert!(config.collaborators.is_empty());
    }

    #[test]
    fn test_unknown_language() {
        let config = Config::parse("[collaborators.ruby]\ncommand = \"ruby\"\n").unwrap();
        let Err(err) = config.translator() else {
            panic!("ruby must be rejected");
        };
        assert_eq!(err.to_string(), "unknown language `ruby` in [collaborators]");
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(Config::parse("[collaborators.js]\nprogram = \"node\"\n").is_err());
        assert!(Config::parse("verbose = true\n").is_err());
    }
}
