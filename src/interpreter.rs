use crate::config::RunConfig;
use crate::error::ProgramError;
use crate::grid::Grid;
use crate::instruction::{Direction, Instruction, InstructionClass};
use crate::vm::{Mode, VM};
use log::{debug, info};

/// Result of executing one tick
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionResult {
    /// Continue execution normally
    Continue,
    /// Direction changed by a direct cell
    Redirected(Direction),
    /// Execution mode switched
    ModeChanged(Mode),
    /// Output buffer filled, run is over
    Halted,
}

/// Drives a [`VM`] through the grid
pub struct Interpreter {
    /// The VM state
    pub vm: VM,
    pub config: RunConfig,
    /// Ticks executed so far
    ticks: u64,
}

impl Interpreter {
    /// Create an interpreter for a grid, locating its entry cell
    pub fn new(grid: Grid, config: RunConfig) -> Result<Self, ProgramError> {
        Ok(Interpreter::from_vm(VM::new(grid)?, config))
    }

    pub fn from_vm(vm: VM, config: RunConfig) -> Self {
        Interpreter {
            vm,
            config,
            ticks: 0,
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run to completion, honoring the configured tick budget
    pub fn run(&mut self) -> Result<Vec<i32>, ProgramError> {
        self.run_with_limit(self.config.max_ticks)
    }

    /// Run until the output buffer fills. With `max_ticks` set, give up with
    /// an error after that many ticks; without it the run may never end.
    pub fn run_with_limit(&mut self, max_ticks: Option<u64>) -> Result<Vec<i32>, ProgramError> {
        info!(
            "Starting run at ({}, {}) heading {}",
            self.vm.x,
            self.vm.y,
            self.vm.direction.name()
        );

        while self.vm.running {
            if let Some(limit) = max_ticks {
                if self.ticks >= limit {
                    return Err(ProgramError::TickLimitExceeded(limit));
                }
            }
            self.step()?;
        }

        let outputs = self.vm.outputs.clone().unwrap_or_default();
        info!("Halted after {} ticks with {} outputs", self.ticks, outputs.len());
        Ok(outputs)
    }

    /// Execute a single tick: move, check bounds, decode, dispatch
    pub fn step(&mut self) -> Result<ExecutionResult, ProgramError> {
        if !self.vm.running {
            return Ok(ExecutionResult::Halted);
        }

        self.ticks += 1;
        self.vm.advance();
        let cell = self.vm.current_cell()?;
        let inst = Instruction::decode(cell, self.config.strict)?;

        if self.config.trace {
            info!("[{:>6}] ({}, {}) {:?} {}", self.ticks, self.vm.x, self.vm.y, self.vm.mode, inst);
        } else {
            debug!("[{:>6}] ({}, {}) {:?} {}", self.ticks, self.vm.x, self.vm.y, self.vm.mode, inst);
        }

        // Direct cells redirect in every mode
        if inst.class == InstructionClass::Direct {
            return self.redirect(&inst);
        }

        self.execute_instruction(&inst)
    }

    /// Dispatch an instruction to the handler for the active mode
    pub fn execute_instruction(&mut self, inst: &Instruction) -> Result<ExecutionResult, ProgramError> {
        match self.vm.mode {
            Mode::Search => self.execute_search(inst),
            Mode::Terminating => self.execute_terminating(inst),
            Mode::Unary | Mode::Ternary => {
                debug!("{:?} mode has no handler, skipping {}", self.vm.mode, inst);
                Ok(ExecutionResult::Continue)
            }
        }
    }

    /// Set the direction from parameter B, touching nothing else
    pub(crate) fn redirect(&mut self, inst: &Instruction) -> Result<ExecutionResult, ProgramError> {
        let direction = Direction::from_code(inst.param_b)?;
        self.vm.direction = direction;
        Ok(ExecutionResult::Redirected(direction))
    }

    /// One-line description of where the run is, for error reports
    pub fn trace_line(&self) -> String {
        format!(
            "at ({}, {}) heading {} in {:?} mode after {} ticks",
            self.vm.x,
            self.vm.y,
            self.vm.direction.name(),
            self.vm.mode,
            self.ticks
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;
    use crate::instruction::{
        CLASS_DIRECT, CLASS_ENTRY, CLASS_LITERAL, CLASS_TERMINATE, DIRECTION_DOWN,
        DIRECTION_RIGHT, DIRECTION_UP,
    };
    use test_log::test;

    fn create_test_interpreter(rows: Vec<Vec<Cell>>) -> Interpreter {
        Interpreter::new(Grid::from_rows(rows).unwrap(), RunConfig::default()).unwrap()
    }

    #[test]
    fn test_step_moves_one_cell() {
        let mut interp = create_test_interpreter(vec![vec![
            Cell::new(CLASS_ENTRY, 0, DIRECTION_RIGHT),
            Cell::new(CLASS_LITERAL, 0, 1),
            Cell::new(CLASS_LITERAL, 0, 2),
        ]]);

        let result = interp.step().unwrap();
        assert_eq!(result, ExecutionResult::Continue);
        assert_eq!((interp.vm.x, interp.vm.y), (1, 0));
        assert_eq!(interp.ticks(), 1);
    }

    #[test]
    fn test_direct_overrides_terminating_mode() {
        let mut interp = create_test_interpreter(vec![
            vec![
                Cell::new(CLASS_ENTRY, 0, DIRECTION_RIGHT),
                Cell::new(CLASS_TERMINATE, 1, 0),
                Cell::new(CLASS_DIRECT, 0, DIRECTION_DOWN),
            ],
            vec![
                Cell::new(CLASS_LITERAL, 0, 0),
                Cell::new(CLASS_LITERAL, 0, 0),
                Cell::new(CLASS_LITERAL, 0, 9),
            ],
        ]);

        assert_eq!(
            interp.step().unwrap(),
            ExecutionResult::ModeChanged(Mode::Terminating)
        );
        assert_eq!(
            interp.step().unwrap(),
            ExecutionResult::Redirected(Direction::Down)
        );
        assert_eq!(interp.vm.mode, Mode::Terminating);
        assert_eq!(interp.vm.param_counter, 0);
        assert_eq!(interp.step().unwrap(), ExecutionResult::Halted);
        assert_eq!(interp.vm.outputs, Some(vec![9]));
    }

    #[test]
    fn test_unhandled_mode_is_noop() {
        let mut interp = create_test_interpreter(vec![vec![
            Cell::new(CLASS_ENTRY, 0, DIRECTION_RIGHT),
            Cell::new(CLASS_TERMINATE, 1, 0),
            Cell::new(CLASS_DIRECT, 0, DIRECTION_UP),
        ]]);
        interp.vm.mode = Mode::Unary;

        assert_eq!(interp.step().unwrap(), ExecutionResult::Continue);
        assert_eq!(interp.vm.mode, Mode::Unary);
        assert!(interp.vm.outputs.is_none());

        // Direct cells still apply
        assert_eq!(
            interp.step().unwrap(),
            ExecutionResult::Redirected(Direction::Up)
        );
    }

    #[test]
    fn test_step_after_halt_does_nothing() {
        let mut interp = create_test_interpreter(vec![vec![
            Cell::new(CLASS_ENTRY, 0, DIRECTION_RIGHT),
            Cell::new(CLASS_TERMINATE, 0, 0),
        ]]);

        assert_eq!(interp.run().unwrap(), Vec::<i32>::new());
        let ticks = interp.ticks();
        assert_eq!(interp.step().unwrap(), ExecutionResult::Halted);
        assert_eq!(interp.ticks(), ticks);
        assert_eq!((interp.vm.x, interp.vm.y), (1, 0));
    }

    #[test]
    fn test_tick_limit() {
        // Bounces between two direct cells forever
        let mut interp = create_test_interpreter(vec![vec![
            Cell::new(CLASS_DIRECT, 0, DIRECTION_RIGHT),
            Cell::new(CLASS_ENTRY, 0, DIRECTION_RIGHT),
            Cell::new(CLASS_DIRECT, 0, 100),
        ]]);

        let err = interp.run_with_limit(Some(25)).unwrap_err();
        assert_eq!(err, ProgramError::TickLimitExceeded(25));
        assert_eq!(interp.ticks(), 25);
    }

    #[test]
    fn test_configured_limit_used_by_run() {
        let grid = Grid::from_rows(vec![vec![
            Cell::new(CLASS_DIRECT, 0, DIRECTION_RIGHT),
            Cell::new(CLASS_ENTRY, 0, DIRECTION_RIGHT),
            Cell::new(CLASS_DIRECT, 0, 100),
        ]])
        .unwrap();
        let config = RunConfig {
            max_ticks: Some(3),
            ..RunConfig::default()
        };
        let mut interp = Interpreter::new(grid, config).unwrap();
        assert_eq!(interp.run(), Err(ProgramError::TickLimitExceeded(3)));
    }

    #[test]
    fn test_strict_mode_rejects_unknown_cells() {
        let rows = vec![vec![
            Cell::new(CLASS_ENTRY, 0, DIRECTION_RIGHT),
            Cell::new(255, 255, 255),
            Cell::new(CLASS_TERMINATE, 0, 0),
        ]];

        let mut loose = create_test_interpreter(rows.clone());
        assert_eq!(loose.run().unwrap(), Vec::<i32>::new());

        let config = RunConfig {
            strict: true,
            ..RunConfig::default()
        };
        let mut strict = Interpreter::new(Grid::from_rows(rows).unwrap(), config).unwrap();
        assert_eq!(strict.run(), Err(ProgramError::UnknownInstruction(255)));
    }

    #[test]
    fn test_trace_line() {
        let interp = create_test_interpreter(vec![vec![Cell::new(CLASS_ENTRY, 0, DIRECTION_RIGHT)]]);
        assert_eq!(
            interp.trace_line(),
            "at (0, 0) heading right in Search mode after 0 ticks"
        );
    }
}
