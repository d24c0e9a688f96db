// Public modules
pub mod catalog;
pub mod defaults;
pub mod error;
pub mod history;
pub mod params;
pub mod placeholder;
pub mod render;
pub mod search;
pub mod session;

// Internal modules - not part of public API
pub(crate) mod paths;

// Re-export common types for convenience
pub use catalog::{Catalog, Category, CommandEntry, TemplateRecord};
pub use error::{Error, ErrorCode, Result};
pub use history::HistoryRing;
pub use params::{ParameterMap, ParameterStore, Selection};
pub use placeholder::Field;
pub use render::{RenderOutput, UnresolvedPolicy};
pub use session::{CommandView, Session};
