/// Linear undo/redo history for arithmetic operations.
///
/// Provides a `HistoryManager` that records every performed calculation
/// as an immutable `CommandRecord` and moves records between an undo
/// stack and a redo stack. Every transition prints a text line to the
/// manager's output sink.
pub mod config;
pub mod format;
pub mod manager;
pub mod operation;

pub use config::HistoryConfig;
pub use format::format_number;
pub use manager::HistoryManager;
pub use operation::{calculate, CommandRecord, OperationKind};
