//! HTTP clients for the text and image generation backends.

mod http;
mod types;

pub use http::HttpGenerationProvider;
