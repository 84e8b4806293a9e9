//! Runtime evaluation of syntax trees

mod lisp_evaluator;
mod value;

pub use lisp_evaluator::LispEvaluator;
pub use value::Value;
