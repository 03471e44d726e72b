//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the application core and an
//! external system. Implementations live in `src/adapters/`.

pub mod content_generator;
pub mod credentials;

pub use content_generator::{ContentCall, ContentGenerator, GenerateContentResponse};
pub use credentials::CredentialProvider;
