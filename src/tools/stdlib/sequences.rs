//! List built-ins

use crate::error::{Error, Result};
use crate::runtime::Value;
use crate::tools::{Tool, ToolRegistry};

/// Register list built-ins
pub fn register(registry: &mut ToolRegistry) {
    registry.register(ListTool);
    registry.register(FirstTool);
}

/// Collects its arguments, in order, into a list
///
/// Usage: `(list x...) -> list`
/// Example: `(list 1 "a" (list))` returns `[1, "a", []]`
pub struct ListTool;

impl Tool for ListTool {
    fn name(&self) -> &str {
        "list"
    }

    fn description(&self) -> &str {
        "Collect arguments into a list"
    }

    fn execute(&self, args: &[Value]) -> Result<Value> {
        Ok(Value::list(args.to_vec()))
    }
}

/// First element of a list
///
/// Usage: `(first list) -> value`
/// Example: `(first (list 10 20 30))` returns `10`
pub struct FirstTool;

impl Tool for FirstTool {
    fn name(&self) -> &str {
        "first"
    }

    fn description(&self) -> &str {
        "First element of a list"
    }

    fn execute(&self, args: &[Value]) -> Result<Value> {
        if args.len() != 1 {
            return Err(Error::InvalidArguments {
                tool: self.name().to_string(),
                reason: format!("Expected 1 argument (list), got {}", args.len()),
            });
        }

        let items = args[0].as_list()?;
        items.first().cloned().ok_or(Error::IndexOutOfBounds {
            index: 0,
            length: items.len(),
        })
    }

    fn arity(&self) -> Option<usize> {
        Some(1)
    }
}
