/// Arithmetic operations and the records that capture them.
use std::fmt;
use std::str::FromStr;

use anyhow::bail;

use crate::format::format_number;

/// The four supported binary operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Add,
    Sub,
    Mul,
    Div,
}

impl OperationKind {
    pub const ALL: [OperationKind; 4] = [Self::Add, Self::Sub, Self::Mul, Self::Div];

    /// Applies the operation to `a` and `b`.
    ///
    /// Division is plain IEEE-754: dividing by zero yields infinity or NaN.
    pub fn calculate(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mul => a * b,
            Self::Div => a / b,
        }
    }

    /// Infix symbol used when printing.
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
        }
    }

    /// Lowercase command name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Div => "div",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for OperationKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        for kind in Self::ALL {
            let is_symbol = token.chars().eq(std::iter::once(kind.symbol()));
            if is_symbol || token.eq_ignore_ascii_case(kind.name()) {
                return Ok(kind);
            }
        }
        bail!("unknown operation '{token}' (expected add, sub, mul, div or + - * /)")
    }
}

/// Computes `a <kind> b`.
pub fn calculate(kind: OperationKind, a: f64, b: f64) -> f64 {
    kind.calculate(a, b)
}

/// One executed calculation.
///
/// The result is computed once in [`CommandRecord::new`] and never again;
/// undo and redo replay the stored value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommandRecord {
    kind: OperationKind,
    operand1: f64,
    operand2: f64,
    result: f64,
}

impl CommandRecord {
    pub fn new(kind: OperationKind, operand1: f64, operand2: f64) -> Self {
        Self {
            kind,
            operand1,
            operand2,
            result: kind.calculate(operand1, operand2),
        }
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn operand1(&self) -> f64 {
        self.operand1
    }

    pub fn operand2(&self) -> f64 {
        self.operand2
    }

    pub fn result(&self) -> f64 {
        self.result
    }

    /// `"a <op> b = result"` with `precision` decimal places.
    pub fn execute_line(&self, precision: usize) -> String {
        format!(
            "{} {} {} = {}",
            format_number(self.operand1, precision),
            self.kind,
            format_number(self.operand2, precision),
            format_number(self.result, precision),
        )
    }

    pub fn undo_line(&self, precision: usize) -> String {
        format!("Undo {}", self.execute_line(precision))
    }

    pub fn redo_line(&self, precision: usize) -> String {
        format!("Redo {}", self.execute_line(precision))
    }
}
