use crate::entry::locate_entry;
use crate::grid::Grid;
use crate::instruction::{Instruction, InstructionClass};

pub struct Disassembler<'a> {
    grid: &'a Grid,
    /// List cells whose class byte is outside the instruction set
    pub show_unknown: bool,
}

impl<'a> Disassembler<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Disassembler {
            grid,
            show_unknown: false,
        }
    }

    /// Header line describing the grid and where it starts
    pub fn summary(&self) -> String {
        match locate_entry(self.grid) {
            Ok(entry) => format!(
                "{}x{} grid, entry at ({}, {}) heading {}, {} inputs",
                self.grid.width(),
                self.grid.height(),
                entry.x,
                entry.y,
                entry.direction.name(),
                entry.input_count
            ),
            Err(e) => format!("{}x{} grid, {}", self.grid.width(), self.grid.height(), e),
        }
    }

    /// One line per cell in row-major order. The cell execution starts from
    /// is marked.
    pub fn listing(&self) -> String {
        let entry = locate_entry(self.grid).ok();
        let mut output = String::new();

        output.push_str(&self.summary());
        output.push_str("\n\n");

        for (x, y, cell) in self.grid.iter() {
            // Decoding is never strict here so every cell is listed
            let Ok(inst) = Instruction::decode(cell, false) else {
                continue;
            };
            if !self.show_unknown && matches!(inst.class, InstructionClass::Unknown(_)) {
                continue;
            }

            let is_entry = entry.map_or(false, |e| e.x == x as i32 && e.y == y as i32);
            output.push_str(&format!(
                "({:>3}, {:>3})  {:06x}  {}{}\n",
                x,
                y,
                cell.packed() >> 8,
                inst,
                if is_entry { "  <- entry" } else { "" }
            ));
        }

        output
    }
}
