//! Reusable UI components

pub mod header;
pub mod loading;
pub mod report;
pub mod snippet_list;

pub use header::Header;
pub use loading::LoadingSpinner;
pub use report::{Markdown, Report};
pub use snippet_list::SnippetList;
