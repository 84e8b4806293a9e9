//! Standard built-in functions

pub mod math;
pub mod sequences;

use crate::tools::ToolRegistry;

/// Register every standard built-in
pub fn register_all(registry: &mut ToolRegistry) {
    math::register(registry);
    sequences::register(registry);
}
