//! Interpreter for programs drawn as images.
//!
//! Each pixel is one instruction cell: red is the instruction class, green
//! and blue are its two parameter bytes. Execution starts at the entry cell
//! and walks the grid one cell per tick until a terminate cell has collected
//! its outputs.

pub mod config;
pub mod disassembler;
pub mod entry;
pub mod error;
pub mod grid;
pub mod instruction;
pub mod interpreter;
pub mod loader;
pub mod vm;

mod opcodes_operator;
mod opcodes_search;
mod opcodes_terminate;

pub use config::RunConfig;
pub use error::{ErrorKind, ProgramError};
pub use grid::{Cell, Grid};
pub use interpreter::{ExecutionResult, Interpreter};

/// Run a grid to completion with the given configuration
pub fn run_grid(grid: Grid, config: RunConfig) -> Result<Vec<i32>, ProgramError> {
    Interpreter::new(grid, config)?.run()
}
