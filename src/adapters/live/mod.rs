//! Live adapters that talk to real services and the real environment.

pub mod env_credentials;
pub mod gemini;
