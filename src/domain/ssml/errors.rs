//! SSML - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SsmlError {
    #[error("invalid SSML template: {0}")]
    InvalidTemplate(String),

    #[error("SSML template has no substitution point (expected <slot/> or {{text}})")]
    NoSubstitutionPoint,

    #[error("SSML template has {0} <slot/> elements, expected exactly one")]
    MultipleSlots(usize),

    #[error("failed to render SSML: {0}")]
    Render(String),
}
