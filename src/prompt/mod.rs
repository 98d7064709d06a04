//! Instruction templates handed to the language model.

mod composer;

pub use composer::{PromptComposer, DEFAULT_RULES, DEFAULT_SYSTEM_MESSAGE};
