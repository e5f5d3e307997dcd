//! Input handling module

pub mod document;
pub mod file_reader;
pub mod glob_resolver;

pub use document::{load_document, DocumentKind};
pub use file_reader::FileReader;
pub use glob_resolver::resolve_inputs;
