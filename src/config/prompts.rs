//! Prompt templates for Marquee.
//!
//! Prompts can be customized by placing a `rag.toml` file in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub rag: RagPrompts,
}

/// The two-turn template used to answer movie questions.
///
/// `system` receives `{{context}}`, `human` receives `{{input}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RagPrompts {
    pub system: String,
    pub human: String,
}

impl Default for RagPrompts {
    fn default() -> Self {
        Self {
            system: concat!(
                "You are an assistant for question-answering tasks. ",
                "Use the following pieces of context to answer the question. ",
                "If you don't know the answer, say that you don't know. ",
                "Use three sentences maximum and keep the answer concise. ",
                "The context is strictly in json format with fields such as title, year of release, ",
                "imdb rating, runtime and brief introduction\n\n",
                "{{context}}"
            )
            .to_string(),
            human: "{{input}}".to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts, overriding the defaults from `custom_dir/rag.toml` if present.
    pub fn load(custom_dir: Option<&str>) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let rag_path = custom_path.join("rag.toml");
            if rag_path.exists() {
                let content = std::fs::read_to_string(&rag_path)?;
                prompts.rag = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    ///
    /// Substitution is a single left-to-right pass: inserted values are never
    /// scanned again, and unknown `{{name}}` markers are left as written.
    pub fn render(template: &str, vars: &HashMap<&str, &str>) -> String {
        let mut result = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            let after = &rest[start + 2..];
            let Some(end) = after.find("}}") else {
                break;
            };

            match vars.get(&after[..end]) {
                Some(value) => {
                    result.push_str(&rest[..start]);
                    result.push_str(value);
                    rest = &after[end + 2..];
                }
                None => {
                    result.push_str(&rest[..start + 2]);
                    rest = after;
                }
            }
        }

        result.push_str(rest);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(prompts.rag.system.contains("{{context}}"));
        assert_eq!(prompts.rag.human, "{{input}}");
    }

    #[test]
    fn test_render_template() {
        let template = "Hello {{name}}, you have {{count}} messages.";
        let vars = HashMap::from([("name", "Alice"), ("count", "5")]);

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Hello Alice, you have 5 messages.");
    }

    #[test]
    fn test_render_does_not_expand_inserted_values() {
        let vars = HashMap::from([("context", "ctx {{input}}"), ("input", "what is {{context}}?")]);

        for _ in 0..50 {
            assert_eq!(Prompts::render("S: {{context}}", &vars), "S: ctx {{input}}");
            assert_eq!(Prompts::render("{{input}}", &vars), "what is {{context}}?");
        }
    }

    #[test]
    fn test_render_keeps_unknown_markers() {
        let vars = HashMap::from([("name", "Alice")]);
        assert_eq!(Prompts::render("{{other}} {{name}}", &vars), "{{other}} Alice");
        assert_eq!(Prompts::render("{{ {{name}}", &vars), "{{ Alice");
        assert_eq!(Prompts::render("open {{name", &vars), "open {{name");
    }

    #[test]
    fn test_custom_rag_prompts_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("rag.toml"),
            "system = \"Only talk about films.\\n{{context}}\"\n",
        )
        .unwrap();

        let prompts = Prompts::load(dir.path().to_str()).unwrap();
        assert_eq!(prompts.rag.system, "Only talk about films.\n{{context}}");
        assert_eq!(prompts.rag.human, "{{input}}");
    }
}
