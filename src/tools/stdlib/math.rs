//! Arithmetic built-ins

use crate::error::{Error, Result};
use crate::runtime::Value;
use crate::tools::{Tool, ToolRegistry};

/// Register arithmetic built-ins
pub fn register(registry: &mut ToolRegistry) {
    registry.register(AddTool);
}

/// Sum of zero or more integers
///
/// Usage: `(+ n...) -> integer`
/// Example: `(+ 1 2 3)` returns `6`, `(+)` returns `0`
pub struct AddTool;

impl Tool for AddTool {
    fn name(&self) -> &str {
        "+"
    }

    fn description(&self) -> &str {
        "Sum of integer arguments"
    }

    fn execute(&self, args: &[Value]) -> Result<Value> {
        let mut total: i64 = 0;
        for arg in args {
            total = total
                .checked_add(arg.as_int()?)
                .ok_or_else(|| Error::IntegerOverflow {
                    tool: self.name().to_string(),
                })?;
        }
        Ok(Value::Int(total))
    }
}
