//! Prompt templates for panel members and the chair.

pub mod template;

pub use template::PanelPrompt;
