//! Core trait abstractions: the external collaborator seams.

pub mod model;
pub mod social;
pub mod web;

pub use model::LanguageModelClient;
pub use social::SocialProfileSource;
pub use web::WebContentSource;
