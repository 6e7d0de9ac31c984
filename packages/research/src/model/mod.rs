//! Language model client implementations.

pub mod openai;

pub use openai::OpenAiModel;
