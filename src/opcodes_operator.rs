/// Operand combination
///
/// An operator cell leaves an operator pending. The next operand-producing
/// cell then calls into here with the operand before the operator (`prev`)
/// and the new one (`next`). Only assignment has an effect so far; `and`
/// checks its operand types and nothing more. The remaining operators are
/// reported as unimplemented and skipped.
///
/// The pending operator is cleared afterwards whatever happened.
use crate::error::ProgramError;
use crate::instruction::Operator;
use crate::interpreter::Interpreter;
use crate::vm::Value;
use log::{debug, warn};

impl Interpreter {
    pub fn combine_operands(&mut self, prev: &Value, next: &Value) -> Result<(), ProgramError> {
        let op = self.vm.operator;

        match op {
            Operator::None => return Ok(()),

            Operator::Assignment => match prev.address {
                Some(address) if prev.is_int() && next.is_int() => {
                    debug!("assign V{:04x} = {}", address, next.value);
                    self.vm.write_variable(address, next.value);
                }
                _ => {
                    return Err(ProgramError::TypeMismatch(
                        op,
                        "an addressable INT and an INT",
                    ))
                }
            },

            Operator::And => {
                if !(prev.is_int() && next.is_int()) {
                    return Err(ProgramError::TypeMismatch(op, "INT and INT"));
                }
                debug!("and {} {}: no result is produced", prev.value, next.value);
            }

            Operator::Or
            | Operator::Add
            | Operator::Subtract
            | Operator::Multiply
            | Operator::Divide => {
                warn!(
                    "operator {} is not implemented; {} and {} left uncombined",
                    op.name(),
                    prev.value,
                    next.value
                );
            }
        }

        self.vm.operator = Operator::None;
        Ok(())
    }
}
