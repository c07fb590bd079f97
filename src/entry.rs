use crate::error::ProgramError;
use crate::grid::Grid;
use crate::instruction::{Direction, InstructionClass};
use log::debug;

/// Where and how execution begins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryPoint {
    pub x: i32,
    pub y: i32,
    pub direction: Direction,
    /// Declared number of inputs. Recorded but not consumed by the engine.
    pub input_count: u8,
}

/// Find the first entry cell scanning rows top to bottom, left to right
pub fn locate_entry(grid: &Grid) -> Result<EntryPoint, ProgramError> {
    for (x, y, cell) in grid.iter() {
        let (class_byte, param_a, param_b) = cell.decode();

        if InstructionClass::from_byte(class_byte) == InstructionClass::Entry {
            let entry = EntryPoint {
                x: x as i32,
                y: y as i32,
                direction: Direction::from_code(param_b)?,
                input_count: param_a,
            };
            debug!(
                "Entry at ({}, {}) heading {}, {} inputs",
                entry.x,
                entry.y,
                entry.direction.name(),
                entry.input_count
            );
            return Ok(entry);
        }
    }

    Err(ProgramError::NoEntryPoint)
}
