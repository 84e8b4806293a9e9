//! Built-in function table
//!
//! Call heads are looked up here by name. The table is filled once and then
//! only read, so evaluators share it behind an `Arc`.

pub mod stdlib;

use crate::error::{Error, Result};
use crate::runtime::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// A built-in function invocable from call-head position
///
/// Implementations check their own argument count and types; the evaluator
/// hands over whatever it evaluated.
pub trait Tool: Send + Sync {
    /// Name used in call-head position
    fn name(&self) -> &str;

    /// One-line description
    fn description(&self) -> &str;

    /// Apply the built-in to already-evaluated arguments
    fn execute(&self, args: &[Value]) -> Result<Value>;

    /// Expected argument count, for listings only
    fn arity(&self) -> Option<usize> {
        None // None means variadic
    }
}

/// Tool registry
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create new registry with the standard built-ins
    pub fn new() -> Self {
        let mut registry = ToolRegistry::empty();
        stdlib::register_all(&mut registry);
        registry
    }

    /// Create empty registry
    pub fn empty() -> Self {
        ToolRegistry {
            tools: HashMap::new(),
        }
    }

    /// Register a tool, replacing any tool of the same name
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        self.tools.insert(name, Arc::new(tool));
    }

    /// Get tool by exact name
    pub fn get(&self, name: &str) -> Result<&dyn Tool> {
        self.tools
            .get(name)
            .map(|tool| tool.as_ref())
            .ok_or_else(|| Error::UndefinedTool {
                name: name.to_string(),
            })
    }

    /// Check if tool exists
    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// List all tool names
    pub fn list_tools(&self) -> Vec<String> {
        let mut names: Vec<_> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Get tool count
    pub fn count(&self) -> usize {
        self.tools.len()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
