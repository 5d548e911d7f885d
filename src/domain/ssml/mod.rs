//! SSML Context - 请求文档构建

mod errors;
mod template;

pub use errors::SsmlError;
pub use template::{SsmlBuilder, SsmlTemplate};
