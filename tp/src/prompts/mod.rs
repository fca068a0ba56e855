//! Prompt Template System
//!
//! Composes the system instruction and user query for a trip from `.pmt`
//! (prompt template) files.
//!
//! Template loading chain:
//! 1. `.tripplanner/prompts/{name}.pmt` (user override)
//! 2. `prompts/{name}.pmt` (project default)
//! 3. Embedded fallback in code
//!
//! Templates use Handlebars syntax for variable substitution.

mod composer;
pub mod embedded;
mod loader;

pub use composer::{DerivedPrompt, PromptComposer, PromptContext, SPECIFIC_DATES_PLACEHOLDER_DAYS};
pub use loader::PromptLoader;
