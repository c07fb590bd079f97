use crate::instruction::Operator;
use std::fmt;

/// Broad classification of a [`ProgramError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed program structure (entry, direction, operator, class byte)
    Parse,
    /// The instruction pointer misbehaved while running
    Runtime,
    /// An operator was applied to operands it does not accept
    Type,
    /// The program or its configuration could not be loaded
    Load,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProgramError {
    // Parse errors
    NoEntryPoint,
    InvalidDirection(u8),
    InvalidOperator(u8),
    UnknownInstruction(u8),

    // Runtime errors
    OutOfBounds(i32, i32), // x, y
    TickLimitExceeded(u64),

    // Type errors
    TypeMismatch(Operator, &'static str), // operator, expected operands

    // Load errors
    GridShape(String),
    Image(String),
    Config(String),
}

impl ProgramError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProgramError::NoEntryPoint
            | ProgramError::InvalidDirection(_)
            | ProgramError::InvalidOperator(_)
            | ProgramError::UnknownInstruction(_) => ErrorKind::Parse,
            ProgramError::OutOfBounds(..) | ProgramError::TickLimitExceeded(_) => {
                ErrorKind::Runtime
            }
            ProgramError::TypeMismatch(..) => ErrorKind::Type,
            ProgramError::GridShape(_) | ProgramError::Image(_) | ProgramError::Config(_) => {
                ErrorKind::Load
            }
        }
    }
}

impl fmt::Display for ProgramError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProgramError::NoEntryPoint => {
                write!(f, "PARSE ERROR | Program has no entry point")
            }
            ProgramError::InvalidDirection(code) => {
                write!(f, "PARSE ERROR | No valid direction for code {}", code)
            }
            ProgramError::InvalidOperator(code) => {
                write!(f, "PARSE ERROR | No valid operator for code {}", code)
            }
            ProgramError::UnknownInstruction(code) => {
                write!(f, "PARSE ERROR | Unknown instruction class {}", code)
            }
            ProgramError::OutOfBounds(x, y) => {
                write!(f, "RUNTIME ERROR | Out of bounds at {}, {}", x, y)
            }
            ProgramError::TickLimitExceeded(limit) => {
                write!(f, "RUNTIME ERROR | Tick limit of {} exceeded", limit)
            }
            ProgramError::TypeMismatch(op, expected) => {
                write!(
                    f,
                    "TYPE ERROR | operator {} takes {}",
                    op.name(),
                    expected
                )
            }
            ProgramError::GridShape(msg) => {
                write!(f, "LOAD ERROR | Bad grid shape: {}", msg)
            }
            ProgramError::Image(msg) => {
                write!(f, "LOAD ERROR | Cannot read image: {}", msg)
            }
            ProgramError::Config(msg) => {
                write!(f, "LOAD ERROR | Bad configuration: {}", msg)
            }
        }
    }
}

impl std::error::Error for ProgramError {}

impl From<image::ImageError> for ProgramError {
    fn from(error: image::ImageError) -> Self {
        ProgramError::Image(error.to_string())
    }
}

impl From<toml::de::Error> for ProgramError {
    fn from(error: toml::de::Error) -> Self {
        ProgramError::Config(error.to_string())
    }
}

impl From<ProgramError> for String {
    fn from(error: ProgramError) -> String {
        error.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(ProgramError::NoEntryPoint.kind(), ErrorKind::Parse);
        assert_eq!(ProgramError::InvalidDirection(7).kind(), ErrorKind::Parse);
        assert_eq!(ProgramError::OutOfBounds(-1, 0).kind(), ErrorKind::Runtime);
        assert_eq!(
            ProgramError::TypeMismatch(Operator::Assignment, "INT and INT").kind(),
            ErrorKind::Type
        );
        assert_eq!(ProgramError::Config("x".into()).kind(), ErrorKind::Load);
    }

    #[test]
    fn test_messages_name_the_problem() {
        assert_eq!(
            ProgramError::OutOfBounds(3, -1).to_string(),
            "RUNTIME ERROR | Out of bounds at 3, -1"
        );
        assert_eq!(
            ProgramError::TypeMismatch(Operator::Assignment, "addressable INT and INT")
                .to_string(),
            "TYPE ERROR | operator assignment takes addressable INT and INT"
        );
        assert!(ProgramError::InvalidOperator(11)
            .to_string()
            .starts_with("PARSE ERROR"));
    }
}
