// Internal modules
#[macro_use]
pub mod logging;
pub mod category;
pub mod config;
pub mod emitter;
pub mod pipeline;
pub mod table;

// Re-export key types for library consumers
pub use category::{classify, CategoryTag, TagList};
pub use emitter::{Backend, RenderOptions};
pub use pipeline::{generate, generate_all, GenerationRequest, GenerationResult, GeneratorError};
pub use table::{load_table, ErrorEntry, ErrorTable};
