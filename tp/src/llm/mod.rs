//! LLM client module for tripplanner
//!
//! Sends composed prompts to the generative-text service and interprets the
//! response.

pub mod client;
mod error;
mod gemini;
pub mod response;
pub mod retry;
pub mod transport;

pub use client::LlmClient;
pub use error::RequestError;
pub use gemini::GeminiClient;
pub use response::{InterpretError, interpret};
pub use retry::{RetryPolicy, Sleeper, TokioSleeper, send_with_retry};
pub use transport::{HttpResponse, HttpTransport, Transport};
