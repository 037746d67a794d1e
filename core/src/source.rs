mod file;

pub use file::{LineCursor, SourceFile};
