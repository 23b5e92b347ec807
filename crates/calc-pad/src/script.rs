/// Calculator scripts: one step per line.
///
/// ```text
/// # comment
/// add 3 4
/// * 7 2
/// undo
/// redo
/// ```
use std::io::Write;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use calc_pad_mod_history::{HistoryManager, OperationKind};

/// Session replayed when no script is given.
pub const DEMO_SCRIPT: &str = "\
add 3 4
mul 7 2
div 14 3
undo
undo
undo
redo
add 5 2
redo
redo
";

/// A single parsed script line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Perform { kind: OperationKind, a: f64, b: f64 },
    Undo,
    Redo,
}

impl FromStr for Step {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        match tokens.as_slice() {
            [cmd] if cmd.eq_ignore_ascii_case("undo") => Ok(Self::Undo),
            [cmd] if cmd.eq_ignore_ascii_case("redo") => Ok(Self::Redo),
            [op, a, b] => {
                let kind: OperationKind = op.parse()?;
                let a = parse_operand(a)?;
                let b = parse_operand(b)?;
                Ok(Self::Perform { kind, a, b })
            }
            _ => bail!("expected '<op> <a> <b>', 'undo' or 'redo', got '{}'", s.trim()),
        }
    }
}

fn parse_operand(token: &str) -> Result<f64> {
    token
        .parse::<f64>()
        .with_context(|| format!("invalid number '{token}'"))
}

/// Parses a whole script. Blank lines and `#` comments are skipped.
///
/// # Errors
///
/// Returns the first malformed line, tagged with its 1-based line number.
pub fn parse_script(text: &str) -> Result<Vec<Step>> {
    let mut steps = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        let step = line
            .parse::<Step>()
            .with_context(|| format!("line {}: cannot parse '{line}'", idx + 1))?;
        steps.push(step);
    }
    Ok(steps)
}

/// Runs `steps` against `mgr` in order.
pub fn run<W: Write>(mgr: &mut HistoryManager<W>, steps: &[Step]) {
    for step in steps {
        match *step {
            Step::Perform { kind, a, b } => {
                mgr.perform(kind, a, b);
            }
            Step::Undo => {
                mgr.undo();
            }
            Step::Redo => {
                mgr.redo();
            }
        }
    }
}
