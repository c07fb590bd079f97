/// Search mode: normal execution
///
/// Literal and variable cells produce operands, which are combined with the
/// previous operand when an operator is pending. Operator cells queue an
/// operator, direct cells redirect and a terminate cell switches the run into
/// terminating mode.
use crate::error::ProgramError;
use crate::instruction::{Instruction, InstructionClass, Operator};
use crate::interpreter::{ExecutionResult, Interpreter};
use crate::vm::{Mode, Value};
use log::{debug, warn};

impl Interpreter {
    pub fn execute_search(&mut self, inst: &Instruction) -> Result<ExecutionResult, ProgramError> {
        match inst.class {
            InstructionClass::Literal => {
                let next = Value::literal(inst.word());
                self.produce_operand(next)?;
                Ok(ExecutionResult::Continue)
            }

            InstructionClass::Variable => {
                let address = inst.word();
                let next = Value::variable(address, self.vm.read_variable(address));
                self.produce_operand(next)?;
                Ok(ExecutionResult::Continue)
            }

            InstructionClass::Operator => {
                let op = Operator::from_code(inst.param_a)?;
                debug!("pending operator: {}", op.name());
                self.vm.operator = op;
                Ok(ExecutionResult::Continue)
            }

            // Normally intercepted by the step loop before mode dispatch
            InstructionClass::Direct => self.redirect(inst),

            InstructionClass::Terminate => {
                let count = inst.param_a as usize;
                debug!("terminate: collecting {} outputs", count);
                self.vm.begin_outputs(count);

                if self.vm.outputs_full() {
                    self.vm.running = false;
                    return Ok(ExecutionResult::Halted);
                }
                Ok(ExecutionResult::ModeChanged(Mode::Terminating))
            }

            InstructionClass::Split
            | InstructionClass::Print
            | InstructionClass::ArrayLiteral
            | InstructionClass::ArrayVariable => {
                warn!(
                    "{} at ({}, {}) is not implemented, skipping",
                    inst.class.mnemonic(),
                    self.vm.x,
                    self.vm.y
                );
                Ok(ExecutionResult::Continue)
            }

            InstructionClass::Entry | InstructionClass::Unknown(_) => Ok(ExecutionResult::Continue),
        }
    }

    /// Combine a freshly produced operand with the previous one, then make
    /// it the current operand
    fn produce_operand(&mut self, next: Value) -> Result<(), ProgramError> {
        let prev = self.vm.current;
        self.combine_operands(&prev, &next)?;
        self.vm.current = next;
        Ok(())
    }
}
