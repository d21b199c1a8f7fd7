//! Configuration module for Marquee.
//!
//! Handles loading application settings, prompt templates and provider credentials.

mod credentials;
mod prompts;
mod settings;

pub use credentials::{CredentialSource, Credentials};
pub use prompts::{Prompts, RagPrompts};
pub use settings::{
    DatasetSettings, EmbeddingSettings, GeneralSettings, OpenAISettings, PromptSettings,
    RagSettings, ScraperSettings, Settings, VectorStoreSettings,
};
