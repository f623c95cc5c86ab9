//! Content module - loads property listings from markdown files

mod frontmatter;
pub mod loader;
mod markdown;
mod property;

pub use frontmatter::FrontMatter;
pub use loader::{ContentLoader, LoadError};
pub use markdown::MarkdownRenderer;
pub use property::Property;
