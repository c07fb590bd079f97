use crate::error::ProgramError;
use crate::grid::Cell;
use std::fmt::{Display, Error, Formatter};

/// Class byte codes (channel 1 of a pixel)
pub const CLASS_ENTRY: u8 = 0;
pub const CLASS_TERMINATE: u8 = 10;
pub const CLASS_DIRECT: u8 = 20;
pub const CLASS_SPLIT: u8 = 30;
pub const CLASS_LITERAL: u8 = 40;
pub const CLASS_VARIABLE: u8 = 50;
pub const CLASS_OPERATOR: u8 = 70;
pub const CLASS_PRINT: u8 = 80;
pub const CLASS_ARRAY_LITERAL: u8 = 90;
pub const CLASS_ARRAY_VARIABLE: u8 = 100;

/// Direction codes
pub const DIRECTION_RIGHT: u8 = 0;
pub const DIRECTION_DOWN: u8 = 50;
pub const DIRECTION_LEFT: u8 = 100;
pub const DIRECTION_UP: u8 = 150;

/// Operator codes
pub const OPCODE_NONE: u8 = 0;
pub const OPCODE_ASSIGNMENT: u8 = 10;
pub const OPCODE_AND: u8 = 20;
pub const OPCODE_OR: u8 = 30;
pub const OPCODE_ADD: u8 = 40;
pub const OPCODE_SUBTRACT: u8 = 50;
pub const OPCODE_MULTIPLY: u8 = 60;
pub const OPCODE_DIVIDE: u8 = 70;

/// Kind of instruction a cell holds, taken from its class byte.
///
/// Code 50 is shared by `Variable` and a bracket marker, and code 100 by
/// `ArrayVariable` and a preprocessor marker. Neither alias has behavior, so
/// each code maps to the first name only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructionClass {
    Entry,
    Terminate,
    Direct,
    /// Reserved
    Split,
    Literal,
    Variable,
    Operator,
    /// Reserved
    Print,
    /// Reserved
    ArrayLiteral,
    /// Reserved
    ArrayVariable,
    /// A class byte outside the known set
    Unknown(u8),
}

impl InstructionClass {
    /// Parse a class byte. Unknown codes are kept rather than rejected;
    /// strict decoding turns them into errors at a higher level.
    pub fn from_byte(code: u8) -> Self {
        match code {
            CLASS_ENTRY => InstructionClass::Entry,
            CLASS_TERMINATE => InstructionClass::Terminate,
            CLASS_DIRECT => InstructionClass::Direct,
            CLASS_SPLIT => InstructionClass::Split,
            CLASS_LITERAL => InstructionClass::Literal,
            CLASS_VARIABLE => InstructionClass::Variable,
            CLASS_OPERATOR => InstructionClass::Operator,
            CLASS_PRINT => InstructionClass::Print,
            CLASS_ARRAY_LITERAL => InstructionClass::ArrayLiteral,
            CLASS_ARRAY_VARIABLE => InstructionClass::ArrayVariable,
            other => InstructionClass::Unknown(other),
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            InstructionClass::Entry => CLASS_ENTRY,
            InstructionClass::Terminate => CLASS_TERMINATE,
            InstructionClass::Direct => CLASS_DIRECT,
            InstructionClass::Split => CLASS_SPLIT,
            InstructionClass::Literal => CLASS_LITERAL,
            InstructionClass::Variable => CLASS_VARIABLE,
            InstructionClass::Operator => CLASS_OPERATOR,
            InstructionClass::Print => CLASS_PRINT,
            InstructionClass::ArrayLiteral => CLASS_ARRAY_LITERAL,
            InstructionClass::ArrayVariable => CLASS_ARRAY_VARIABLE,
            InstructionClass::Unknown(code) => *code,
        }
    }

    /// Mnemonic used in traces and listings
    pub fn mnemonic(&self) -> &'static str {
        match self {
            InstructionClass::Entry => "entry",
            InstructionClass::Terminate => "terminate",
            InstructionClass::Direct => "direct",
            InstructionClass::Split => "split",
            InstructionClass::Literal => "literal",
            InstructionClass::Variable => "variable",
            InstructionClass::Operator => "operator",
            InstructionClass::Print => "print",
            InstructionClass::ArrayLiteral => "array_literal",
            InstructionClass::ArrayVariable => "array_variable",
            InstructionClass::Unknown(_) => "unknown",
        }
    }

    /// True for classes that are declared but have no behavior yet
    pub fn is_reserved(&self) -> bool {
        matches!(
            self,
            InstructionClass::Split
                | InstructionClass::Print
                | InstructionClass::ArrayLiteral
                | InstructionClass::ArrayVariable
        )
    }
}

/// Direction the instruction pointer travels in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    pub fn from_code(code: u8) -> Result<Self, ProgramError> {
        match code {
            DIRECTION_RIGHT => Ok(Direction::Right),
            DIRECTION_DOWN => Ok(Direction::Down),
            DIRECTION_LEFT => Ok(Direction::Left),
            DIRECTION_UP => Ok(Direction::Up),
            _ => Err(ProgramError::InvalidDirection(code)),
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Direction::Right => DIRECTION_RIGHT,
            Direction::Down => DIRECTION_DOWN,
            Direction::Left => DIRECTION_LEFT,
            Direction::Up => DIRECTION_UP,
        }
    }

    /// Unit step (dx, dy) applied to the pointer each tick
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Up => (0, -1),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Up => "up",
        }
    }
}

/// Binary operator queued by an operator cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// No pending operator
    None,
    Assignment,
    And,
    Or,
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn from_code(code: u8) -> Result<Self, ProgramError> {
        match code {
            OPCODE_NONE => Ok(Operator::None),
            OPCODE_ASSIGNMENT => Ok(Operator::Assignment),
            OPCODE_AND => Ok(Operator::And),
            OPCODE_OR => Ok(Operator::Or),
            OPCODE_ADD => Ok(Operator::Add),
            OPCODE_SUBTRACT => Ok(Operator::Subtract),
            OPCODE_MULTIPLY => Ok(Operator::Multiply),
            OPCODE_DIVIDE => Ok(Operator::Divide),
            _ => Err(ProgramError::InvalidOperator(code)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operator::None => "none",
            Operator::Assignment => "assignment",
            Operator::And => "and",
            Operator::Or => "or",
            Operator::Add => "add",
            Operator::Subtract => "subtract",
            Operator::Multiply => "multiply",
            Operator::Divide => "divide",
        }
    }
}

/// Join two parameter bytes into a 16-bit value (hi << 8 | lo)
pub fn combine_bytes(hi: u8, lo: u8) -> u16 {
    ((hi as u16) << 8) | lo as u16
}

/// A decoded cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub class: InstructionClass,
    pub param_a: u8,
    pub param_b: u8,
}

impl Instruction {
    /// Decode a cell. With `strict` set, class bytes outside the known set
    /// are rejected instead of decoding to [`InstructionClass::Unknown`].
    pub fn decode(cell: Cell, strict: bool) -> Result<Self, ProgramError> {
        let (class_byte, param_a, param_b) = cell.decode();
        let class = InstructionClass::from_byte(class_byte);

        if strict {
            if let InstructionClass::Unknown(code) = class {
                return Err(ProgramError::UnknownInstruction(code));
            }
        }

        Ok(Instruction {
            class,
            param_a,
            param_b,
        })
    }

    /// The 16-bit payload formed by both parameter bytes
    pub fn word(&self) -> u16 {
        combine_bytes(self.param_a, self.param_b)
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.class.mnemonic())?;

        match self.class {
            InstructionClass::Entry => {
                write!(f, " inputs={}", self.param_a)?;
                match Direction::from_code(self.param_b) {
                    Ok(dir) => write!(f, " {}", dir.name()),
                    Err(_) => write!(f, " dir?{}", self.param_b),
                }
            }
            InstructionClass::Direct => match Direction::from_code(self.param_b) {
                Ok(dir) => write!(f, " {}", dir.name()),
                Err(_) => write!(f, " dir?{}", self.param_b),
            },
            InstructionClass::Terminate => write!(f, " count={}", self.param_a),
            InstructionClass::Literal => write!(f, " #{:04x}", self.word()),
            InstructionClass::Variable => write!(f, " V{:04x}", self.word()),
            InstructionClass::Operator => match Operator::from_code(self.param_a) {
                Ok(op) => write!(f, " {}", op.name()),
                Err(_) => write!(f, " op?{}", self.param_a),
            },
            InstructionClass::Unknown(code) => {
                write!(f, "({}) {:02x} {:02x}", code, self.param_a, self.param_b)
            }
            _ => write!(f, " {:02x} {:02x}", self.param_a, self.param_b),
        }
    }
}
