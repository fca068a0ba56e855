//! tripplanner - vacation plans from a generative-text model
//!
//! A trip request (destination, dates, party, preferences) is turned into a
//! system instruction plus a user query, sent to the Gemini
//! `generateContent` endpoint with search grounding, and the answer is
//! interpreted into plan text plus cited sources.
//!
//! # Modules
//!
//! - [`domain`] - trip request, form reducer, date heuristic, plan result
//! - [`prompts`] - template loading and prompt composition
//! - [`llm`] - transport, retry with exponential backoff, Gemini client, response interpreter
//! - [`planner`] - validation and the submit flow
//! - [`render`] - terminal, markdown and JSON output
//! - [`form`] - interactive trip form
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod cli;
pub mod config;
pub mod domain;
pub mod form;
pub mod llm;
pub mod planner;
pub mod prompts;
pub mod render;

// Re-export commonly used types
pub use config::{Config, LlmConfig, OutputConfig, RetryConfig};
pub use domain::{
    AccommodationKind, FoodPreference, HotelRating, PlanResult, RentalStyle, Source, Transport, TripAction,
    TripRequest, is_specific_date_range,
};
pub use llm::{
    GeminiClient, HttpResponse, HttpTransport, InterpretError, LlmClient, RequestError, RetryPolicy, Sleeper,
    TokioSleeper, interpret, send_with_retry,
};
pub use planner::{PlanError, Planner, Session, ValidationError};
pub use prompts::{DerivedPrompt, PromptComposer, PromptLoader};
pub use render::{OutputFormat, render};
