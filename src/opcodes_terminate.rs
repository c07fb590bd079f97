/// Terminating mode: each literal cell fills the next output slot, and the
/// run halts on the tick that fills the last one. Everything else is skipped.
use crate::error::ProgramError;
use crate::instruction::{Instruction, InstructionClass};
use crate::interpreter::{ExecutionResult, Interpreter};
use log::debug;

impl Interpreter {
    pub fn execute_terminating(
        &mut self,
        inst: &Instruction,
    ) -> Result<ExecutionResult, ProgramError> {
        match inst.class {
            InstructionClass::Literal => {
                let value = inst.word() as i32;
                debug!("output[{}] = {}", self.vm.param_counter, value);

                if self.vm.push_output(value) {
                    self.vm.running = false;
                    return Ok(ExecutionResult::Halted);
                }
                Ok(ExecutionResult::Continue)
            }
            _ => Ok(ExecutionResult::Continue),
        }
    }
}
