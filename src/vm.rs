use crate::entry::{locate_entry, EntryPoint};
use crate::error::ProgramError;
use crate::grid::{Cell, Grid};
use crate::instruction::{Direction, Operator};
use log::debug;

/// Size of the variable store (one slot per 16-bit address)
pub const VARIABLE_COUNT: usize = 1 << 16;

/// Execution phase, deciding how a cell's class byte is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Normal execution
    Search,
    /// Collecting literal outputs before halting
    Terminating,
    /// Declared, no behavior
    Unary,
    /// Declared, no behavior
    Ternary,
}

/// Operand types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Void,
    Int,
    /// Reserved for array instructions
    Array,
}

/// An operand produced by a literal or variable cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Value {
    pub kind: ValueType,
    /// Variable address, None for literals
    pub address: Option<u16>,
    pub value: i32,
}

impl Value {
    pub fn void() -> Self {
        Value {
            kind: ValueType::Void,
            address: None,
            value: 0,
        }
    }

    pub fn literal(value: u16) -> Self {
        Value {
            kind: ValueType::Int,
            address: None,
            value: value as i32,
        }
    }

    pub fn variable(address: u16, value: i32) -> Self {
        Value {
            kind: ValueType::Int,
            address: Some(address),
            value,
        }
    }

    pub fn is_int(&self) -> bool {
        self.kind == ValueType::Int
    }
}

/// State of one run. Created per run, owned by the interpreter driving it.
pub struct VM {
    /// The program being executed
    pub grid: Grid,
    /// Where the run started
    pub entry: EntryPoint,
    /// Pointer column
    pub x: i32,
    /// Pointer row
    pub y: i32,
    pub direction: Direction,
    pub mode: Mode,
    /// Operator waiting for its right-hand operand
    pub operator: Operator,
    /// Most recently produced operand
    pub current: Value,
    /// Output buffer, allocated when a terminate cell is reached
    pub outputs: Option<Vec<i32>>,
    /// Next output index to fill
    pub param_counter: usize,
    pub running: bool,
    variables: Vec<i32>,
}

impl VM {
    /// Create a VM positioned on the grid's entry cell
    pub fn new(grid: Grid) -> Result<Self, ProgramError> {
        let entry = locate_entry(&grid)?;

        Ok(VM {
            grid,
            entry,
            x: entry.x,
            y: entry.y,
            direction: entry.direction,
            mode: Mode::Search,
            operator: Operator::None,
            current: Value::void(),
            outputs: None,
            param_counter: 0,
            running: true,
            variables: vec![0; VARIABLE_COUNT],
        })
    }

    /// Reset the VM to the entry state, clearing all variables
    pub fn reset(&mut self) {
        self.x = self.entry.x;
        self.y = self.entry.y;
        self.direction = self.entry.direction;
        self.mode = Mode::Search;
        self.operator = Operator::None;
        self.current = Value::void();
        self.outputs = None;
        self.param_counter = 0;
        self.running = true;
        self.variables.iter_mut().for_each(|v| *v = 0);
    }

    /// Move one unit step in the current direction
    pub fn advance(&mut self) -> (i32, i32) {
        let (dx, dy) = self.direction.delta();
        self.x += dx;
        self.y += dy;
        (self.x, self.y)
    }

    /// Cell under the pointer, failing if the pointer has left the grid
    pub fn current_cell(&self) -> Result<Cell, ProgramError> {
        self.grid
            .get(self.x, self.y)
            .ok_or(ProgramError::OutOfBounds(self.x, self.y))
    }

    pub fn read_variable(&self, address: u16) -> i32 {
        self.variables[address as usize]
    }

    pub fn write_variable(&mut self, address: u16, value: i32) {
        debug!("V{:04x} <- {}", address, value);
        self.variables[address as usize] = value;
    }

    /// Allocate the output buffer and switch to terminating mode
    pub fn begin_outputs(&mut self, count: usize) {
        self.mode = Mode::Terminating;
        self.param_counter = 0;
        self.outputs = Some(vec![0; count]);
    }

    /// True once every output slot has been written
    pub fn outputs_full(&self) -> bool {
        match &self.outputs {
            Some(outputs) => self.param_counter >= outputs.len(),
            None => false,
        }
    }

    /// Store the next output value. Returns true when the buffer is full.
    pub fn push_output(&mut self, value: i32) -> bool {
        if let Some(outputs) = self.outputs.as_mut() {
            if let Some(slot) = outputs.get_mut(self.param_counter) {
                *slot = value;
                self.param_counter += 1;
            }
        }
        self.outputs_full()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::{CLASS_ENTRY, CLASS_LITERAL, DIRECTION_RIGHT};

    fn create_test_vm() -> VM {
        let rows = vec![
            vec![
                Cell::new(CLASS_ENTRY, 2, DIRECTION_RIGHT),
                Cell::new(CLASS_LITERAL, 0, 1),
                Cell::new(CLASS_LITERAL, 0, 2),
            ],
            vec![Cell::new(CLASS_LITERAL, 0, 3); 3],
        ];
        VM::new(Grid::from_rows(rows).unwrap()).unwrap()
    }

    #[test]
    fn test_vm_creation() {
        let vm = create_test_vm();
        assert_eq!((vm.x, vm.y), (0, 0));
        assert_eq!(vm.direction, Direction::Right);
        assert_eq!(vm.mode, Mode::Search);
        assert_eq!(vm.operator, Operator::None);
        assert_eq!(vm.current, Value::void());
        assert!(vm.outputs.is_none());
        assert!(vm.running);
        assert_eq!(vm.entry.input_count, 2);
    }

    #[test]
    fn test_advance_each_direction() {
        let mut vm = create_test_vm();
        vm.x = 1;
        vm.y = 1;

        for (dir, expected) in [
            (Direction::Right, (2, 1)),
            (Direction::Down, (1, 2)),
            (Direction::Left, (0, 1)),
            (Direction::Up, (1, 0)),
        ] {
            vm.x = 1;
            vm.y = 1;
            vm.direction = dir;
            assert_eq!(vm.advance(), expected);
        }
    }

    #[test]
    fn test_current_cell_out_of_bounds() {
        let mut vm = create_test_vm();
        vm.direction = Direction::Up;
        vm.advance();
        assert_eq!(vm.current_cell(), Err(ProgramError::OutOfBounds(0, -1)));
    }

    #[test]
    fn test_variables_default_to_zero() {
        let mut vm = create_test_vm();
        assert_eq!(vm.read_variable(0xffff), 0);
        vm.write_variable(0xffff, 99);
        assert_eq!(vm.read_variable(0xffff), 99);
        assert_eq!(vm.read_variable(0), 0);
    }

    #[test]
    fn test_output_buffer() {
        let mut vm = create_test_vm();
        vm.begin_outputs(2);
        assert_eq!(vm.mode, Mode::Terminating);
        assert!(!vm.outputs_full());
        assert!(!vm.push_output(5));
        assert!(vm.push_output(6));
        assert_eq!(vm.outputs, Some(vec![5, 6]));

        // A full buffer ignores further writes
        assert!(vm.push_output(7));
        assert_eq!(vm.outputs, Some(vec![5, 6]));
        assert_eq!(vm.param_counter, 2);

        vm.begin_outputs(0);
        assert!(vm.outputs_full());
    }

    #[test]
    fn test_reset() {
        let mut vm = create_test_vm();
        vm.advance();
        vm.write_variable(3, 4);
        vm.begin_outputs(1);
        vm.running = false;

        vm.reset();
        assert_eq!((vm.x, vm.y), (0, 0));
        assert_eq!(vm.mode, Mode::Search);
        assert_eq!(vm.read_variable(3), 0);
        assert!(vm.outputs.is_none());
        assert!(vm.running);
    }
}
