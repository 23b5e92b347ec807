/// Linear undo/redo manager for arithmetic commands.
///
/// Performed records live on the undo stack; undone records move to the
/// redo stack. Performing a new operation discards the redo stack, so the
/// history never branches.
use std::io::{self, Stdout, Write};

use crate::config::HistoryConfig;
use crate::operation::{CommandRecord, OperationKind};

/// Printed when `undo` is called with an empty undo stack.
pub const NOTHING_TO_UNDO: &str = "Nothing to undo.";

/// Printed when `redo` is called with an empty redo stack.
pub const NOTHING_TO_REDO: &str = "Nothing to redo.";

/// Manages the undo and redo stacks of one calculator session.
///
/// Each operation writes human-readable lines to `out` (standard output
/// unless built with [`HistoryManager::with_writer`]). Callers sharing a
/// manager across threads must serialize calls themselves.
pub struct HistoryManager<W: Write = Stdout> {
    /// Active records, oldest first.
    undo_stack: Vec<CommandRecord>,
    /// Undone records, most-recently-undone on top.
    redo_stack: Vec<CommandRecord>,
    /// Configuration parameters.
    config: HistoryConfig,
    /// Sink receiving every emitted line.
    out: W,
}

impl<W: Write> std::fmt::Debug for HistoryManager<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryManager")
            .field("undo_len", &self.undo_stack.len())
            .field("redo_len", &self.redo_stack.len())
            .field("config", &self.config)
            .finish()
    }
}

impl HistoryManager<Stdout> {
    /// Creates an empty manager that prints to standard output.
    pub fn new(config: HistoryConfig) -> Self {
        Self::with_writer(config, io::stdout())
    }
}

impl Default for HistoryManager<Stdout> {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

impl<W: Write> HistoryManager<W> {
    /// Creates an empty manager that prints to `out`.
    pub fn with_writer(config: HistoryConfig, out: W) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            config,
            out,
        }
    }

    /// Computes `a <kind> b`, records it, and prints `"a <op> b = result"`.
    ///
    /// Clears the redo stack. Never fails: division by zero is recorded
    /// as infinity or NaN like any other result.
    pub fn perform(&mut self, kind: OperationKind, a: f64, b: f64) -> CommandRecord {
        let record = CommandRecord::new(kind, a, b);
        self.emit(&record.execute_line(self.config.precision));

        self.undo_stack.push(record);
        let discarded = self.redo_stack.len();
        self.redo_stack.clear();
        if discarded > 0 {
            tracing::debug!("Discarded {discarded} redo record(s)");
        }

        tracing::debug!(
            kind = kind.name(),
            undo_len = self.undo_stack.len(),
            "Performed operation"
        );
        record
    }

    /// Undoes the most recent record.
    ///
    /// Prints `"Undo a <op> b = result"`, then re-prints the record that is
    /// now on top of the undo stack, if any. The re-printed line reuses the
    /// stored result. Returns `None` (after printing "Nothing to undo.")
    /// when there is nothing to undo.
    pub fn undo(&mut self) -> Option<CommandRecord> {
        let Some(record) = self.undo_stack.pop() else {
            self.emit(NOTHING_TO_UNDO);
            return None;
        };

        self.emit(&record.undo_line(self.config.precision));
        if let Some(current) = self.undo_stack.last() {
            let line = current.execute_line(self.config.precision);
            self.emit(&line);
        }
        self.redo_stack.push(record);

        tracing::debug!(
            undo_len = self.undo_stack.len(),
            redo_len = self.redo_stack.len(),
            "Undid operation"
        );
        Some(record)
    }

    /// Redoes the most recently undone record.
    ///
    /// Prints `"Redo a <op> b = result"` only. Unlike [`undo`](Self::undo),
    /// the record beneath it is not re-printed. Returns `None` (after
    /// printing "Nothing to redo.") when there is nothing to redo.
    pub fn redo(&mut self) -> Option<CommandRecord> {
        let Some(record) = self.redo_stack.pop() else {
            self.emit(NOTHING_TO_REDO);
            return None;
        };

        self.emit(&record.redo_line(self.config.precision));
        self.undo_stack.push(record);

        tracing::debug!(
            undo_len = self.undo_stack.len(),
            redo_len = self.redo_stack.len(),
            "Redid operation"
        );
        Some(record)
    }

    /// Whether undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Whether redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// The record on top of the undo stack.
    pub fn current(&self) -> Option<&CommandRecord> {
        self.undo_stack.last()
    }

    /// Active records, oldest first.
    pub fn undo_history(&self) -> &[CommandRecord] {
        &self.undo_stack
    }

    /// Undone records, most-recently-undone last.
    pub fn redo_history(&self) -> &[CommandRecord] {
        &self.redo_stack
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Drops both stacks without printing anything.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Consumes the manager and returns its output sink.
    pub fn into_writer(self) -> W {
        self.out
    }

    /// Writes one line to the sink. Write failures are logged, not returned.
    fn emit(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{line}") {
            tracing::warn!("Failed to write calculator output: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture() -> HistoryManager<Vec<u8>> {
        HistoryManager::with_writer(HistoryConfig::default(), Vec::new())
    }

    fn output(mgr: HistoryManager<Vec<u8>>) -> Vec<String> {
        String::from_utf8(mgr.into_writer())
            .expect("utf8")
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Sink that rejects every write.
    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    // --- Basic undo/redo ---

    #[test]
    fn test_perform_prints_result() {
        let mut mgr = capture();
        let record = mgr.perform(OperationKind::Add, 3.0, 4.0);
        assert_eq!(record.result(), 7.0);
        assert!(mgr.can_undo());
        assert!(!mgr.can_redo());
        assert_eq!(output(mgr), vec!["3.00 + 4.00 = 7.00"]);
    }

    #[test]
    fn test_undo_redo_basic() {
        let mut mgr = capture();
        mgr.perform(OperationKind::Add, 1.0, 2.0);
        mgr.perform(OperationKind::Mul, 3.0, 4.0);

        let undone = mgr.undo().expect("undo");
        assert_eq!(undone.kind(), OperationKind::Mul);
        assert_eq!(mgr.undo_count(), 1);
        assert_eq!(mgr.redo_count(), 1);

        let redone = mgr.redo().expect("redo");
        assert_eq!(redone, undone);
        assert_eq!(mgr.undo_count(), 2);
        assert_eq!(mgr.redo_count(), 0);
    }

    #[test]
    fn test_empty_history() {
        let mut mgr = capture();
        assert!(!mgr.can_undo());
        assert!(!mgr.can_redo());
        assert!(mgr.undo().is_none());
        assert!(mgr.redo().is_none());
        assert_eq!(output(mgr), vec![NOTHING_TO_UNDO, NOTHING_TO_REDO]);
    }

    #[test]
    fn test_undo_reprints_new_top() {
        let mut mgr = capture();
        mgr.perform(OperationKind::Add, 3.0, 4.0);
        mgr.perform(OperationKind::Mul, 7.0, 2.0);
        mgr.undo();
        assert_eq!(
            output(mgr),
            vec![
                "3.00 + 4.00 = 7.00",
                "7.00 * 2.00 = 14.00",
                "Undo 7.00 * 2.00 = 14.00",
                "3.00 + 4.00 = 7.00",
            ]
        );
    }

    #[test]
    fn test_undo_last_record_prints_single_line() {
        let mut mgr = capture();
        mgr.perform(OperationKind::Sub, 5.0, 1.0);
        mgr.undo();
        assert_eq!(
            output(mgr),
            vec!["5.00 - 1.00 = 4.00", "Undo 5.00 - 1.00 = 4.00"]
        );
    }

    #[test]
    fn test_redo_does_not_reprint_beneath() {
        let mut mgr = capture();
        mgr.perform(OperationKind::Add, 1.0, 1.0);
        mgr.perform(OperationKind::Add, 2.0, 2.0);
        mgr.undo();
        mgr.redo();
        let lines = output(mgr);
        assert_eq!(lines.last().map(String::as_str), Some("Redo 2.00 + 2.00 = 4.00"));
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_redo_cleared_on_new_perform() {
        let mut mgr = capture();
        mgr.perform(OperationKind::Add, 1.0, 1.0);
        mgr.perform(OperationKind::Add, 2.0, 2.0);
        mgr.undo();
        mgr.undo();
        assert_eq!(mgr.redo_count(), 2);

        mgr.perform(OperationKind::Div, 9.0, 3.0);
        assert!(!mgr.can_redo());
        assert!(mgr.redo().is_none());
        assert_eq!(mgr.undo_history().len(), 1);
    }

    #[test]
    fn test_undo_all_then_redo_all_preserves_order() {
        let mut mgr = capture();
        let a = mgr.perform(OperationKind::Add, 1.0, 2.0);
        let b = mgr.perform(OperationKind::Sub, 3.0, 4.0);
        let c = mgr.perform(OperationKind::Mul, 5.0, 6.0);

        assert_eq!(mgr.undo(), Some(c));
        assert_eq!(mgr.undo(), Some(b));
        assert_eq!(mgr.undo(), Some(a));
        assert!(mgr.undo().is_none());

        assert_eq!(mgr.redo(), Some(a));
        assert_eq!(mgr.redo(), Some(b));
        assert_eq!(mgr.redo(), Some(c));
        assert!(mgr.redo().is_none());
        assert_eq!(mgr.undo_history(), &[a, b, c]);
    }

    #[test]
    fn test_stacks_stay_disjoint() {
        let mut mgr = capture();
        for i in 0..4 {
            mgr.perform(OperationKind::Add, f64::from(i), 1.0);
        }
        mgr.undo();
        mgr.undo();
        mgr.redo();
        assert_eq!(mgr.undo_count() + mgr.redo_count(), 4);
        for record in mgr.redo_history() {
            assert!(!mgr.undo_history().contains(record));
        }
    }

    #[test]
    fn test_current_tracks_top() {
        let mut mgr = capture();
        assert!(mgr.current().is_none());
        let first = mgr.perform(OperationKind::Add, 1.0, 1.0);
        mgr.perform(OperationKind::Add, 2.0, 2.0);
        mgr.undo();
        assert_eq!(mgr.current(), Some(&first));
    }

    #[test]
    fn test_clear_drops_both_stacks_silently() {
        let mut mgr = capture();
        mgr.perform(OperationKind::Add, 1.0, 1.0);
        mgr.perform(OperationKind::Add, 2.0, 2.0);
        mgr.undo();
        mgr.clear();
        assert!(!mgr.can_undo());
        assert!(!mgr.can_redo());
        assert_eq!(output(mgr).len(), 4);
    }

    #[test]
    fn test_deep_history_keeps_oldest_record() {
        let mut mgr = capture();
        mgr.perform(OperationKind::Add, 3.0, 4.0);
        mgr.perform(OperationKind::Mul, 7.0, 2.0);
        for i in 0..20_000 {
            mgr.perform(OperationKind::Add, f64::from(i), 0.0);
        }
        for _ in 0..20_000 {
            assert!(mgr.undo().is_some());
        }
        assert_eq!(mgr.undo_count(), 2);
        assert_eq!(mgr.redo_count(), 20_000);

        mgr.undo();
        mgr.undo();
        assert!(mgr.undo().is_none());

        let lines = output(mgr);
        assert_eq!(
            lines[lines.len() - 4..],
            [
                "Undo 7.00 * 2.00 = 14.00",
                "3.00 + 4.00 = 7.00",
                "Undo 3.00 + 4.00 = 7.00",
                NOTHING_TO_UNDO,
            ]
        );
    }

    // --- Output ---

    #[test]
    fn test_custom_precision() {
        let config = HistoryConfig { precision: 3 };
        let mut mgr = HistoryManager::with_writer(config, Vec::new());
        mgr.perform(OperationKind::Div, 1.0, 3.0);
        assert_eq!(output(mgr), vec!["1.000 / 3.000 = 0.333"]);
    }

    #[test]
    fn test_write_failure_does_not_block_transitions() {
        let mut mgr = HistoryManager::with_writer(HistoryConfig::default(), BrokenPipe);
        mgr.perform(OperationKind::Add, 1.0, 1.0);
        assert!(mgr.undo().is_some());
        assert!(mgr.redo().is_some());
        assert_eq!(mgr.undo_count(), 1);
    }

    #[test]
    fn test_debug_omits_writer() {
        let mgr = capture();
        let debug = format!("{mgr:?}");
        assert!(debug.contains("undo_len: 0"));
        assert!(debug.contains("redo_len: 0"));
    }
}
