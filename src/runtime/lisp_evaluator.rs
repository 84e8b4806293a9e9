use crate::error::{Error, Result};
use crate::parser::Expression;
use crate::runtime::Value;
use crate::tools::ToolRegistry;
use std::sync::Arc;

/// Recursive evaluator over a fixed built-in table
///
/// There are no bindings and no special forms:
/// - a list is a call whose head names a built-in,
/// - integers and strings evaluate to themselves,
/// - a bare identifier outside head position is an error.
///
/// The evaluator holds no mutable state, so one instance can evaluate any
/// number of trees, from any number of threads.
#[derive(Clone)]
pub struct LispEvaluator {
    /// Built-in table, read-only after construction
    registry: Arc<ToolRegistry>,
}

impl LispEvaluator {
    /// Creates an evaluator over the standard built-ins
    pub fn new() -> Self {
        LispEvaluator {
            registry: Arc::new(ToolRegistry::new()),
        }
    }

    /// Creates an evaluator with custom tool registry
    pub fn with_registry(registry: ToolRegistry) -> Self {
        LispEvaluator {
            registry: Arc::new(registry),
        }
    }

    /// Creates an evaluator sharing an existing registry
    pub fn with_shared_registry(registry: Arc<ToolRegistry>) -> Self {
        LispEvaluator { registry }
    }

    /// The built-in table this evaluator resolves call heads against
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Evaluate a parsed program
    pub fn execute(&self, program: &Expression) -> Result<Value> {
        self.evaluate_expression(program)
    }

    /// Evaluate any node
    pub fn evaluate_expression(&self, expr: &Expression) -> Result<Value> {
        match expr {
            Expression::List(items) => self.evaluate_list(items),
            Expression::Integer(n) => Ok(Value::Int(*n)),
            Expression::String(s) => Ok(Value::String(s.clone())),
            Expression::Identifier(name) => Err(Error::IdentifierEval { name: name.clone() }),
        }
    }

    /// Evaluate the elements of a list as a call
    ///
    /// Arguments are evaluated left to right before the built-in runs.
    pub fn evaluate_list(&self, items: &[Expression]) -> Result<Value> {
        let (head, args) = items.split_first().ok_or(Error::EmptyList)?;

        let name = match head {
            Expression::Identifier(name) => name,
            other => {
                return Err(Error::NotCallable {
                    type_name: other.type_name().to_string(),
                })
            }
        };

        let tool = self.registry.get(name)?;

        let mut evaluated_args = Vec::with_capacity(args.len());
        for arg in args {
            evaluated_args.push(self.evaluate_expression(arg)?);
        }

        tracing::debug!(tool = %name, args = evaluated_args.len(), "calling built-in");
        tool.execute(&evaluated_args)
    }
}

impl Default for LispEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::SExprScanner;
    use crate::parser::SExprParser;
    use crate::tools::Tool;
    use std::sync::Mutex;

    fn eval_str(source: &str) -> Result<Value> {
        let program = SExprParser::new(SExprScanner::new(source).tokens()).parse()?;
        LispEvaluator::new().execute(&program)
    }

    #[test]
    fn test_addition() {
        assert_eq!(eval_str("(+ 1 2 3)").unwrap(), Value::Int(6));
        assert_eq!(eval_str("(+)").unwrap(), Value::Int(0));
        assert_eq!(eval_str("(+ -5 (+ 2 2))").unwrap(), Value::Int(-1));
    }

    #[test]
    fn test_first_of_list() {
        assert_eq!(eval_str("(first (list 10 20 30))").unwrap(), Value::Int(10));
    }

    #[test]
    fn test_literals_evaluate_to_themselves() {
        assert_eq!(eval_str("17").unwrap(), Value::Int(17));
        assert_eq!(eval_str(r#""hey""#).unwrap(), Value::from("hey"));
    }

    #[test]
    fn test_nested_lists() {
        let result = eval_str("(list (list (list 1)))").unwrap();
        let expected = Value::list(vec![Value::list(vec![Value::list(vec![Value::Int(1)])])]);
        assert_eq!(result, expected);
        assert_eq!(result.to_string(), "[[[1]]]");
    }

    #[test]
    fn test_empty_list_is_runtime_error() {
        let err = eval_str("()").unwrap_err();
        assert_eq!(err, Error::EmptyList);
        assert!(err.is_runtime_error());
        assert!(err.to_string().contains("empty list"));
    }

    #[test]
    fn test_integer_head_not_callable() {
        let err = eval_str("(1 2 3)").unwrap_err();
        assert_eq!(
            err,
            Error::NotCallable {
                type_name: "integer".to_string()
            }
        );
    }

    #[test]
    fn test_list_and_string_heads_not_callable() {
        assert!(matches!(
            eval_str("((list) 1)").unwrap_err(),
            Error::NotCallable { ref type_name } if type_name == "list"
        ));
        assert!(matches!(
            eval_str(r#"("f" 1)"#).unwrap_err(),
            Error::NotCallable { ref type_name } if type_name == "string"
        ));
    }

    #[test]
    fn test_bare_identifier() {
        let err = eval_str("foo").unwrap_err();
        assert_eq!(err.to_string(), "Runtime error: cannot eval an identifier: foo");
        assert!(matches!(
            eval_str("(list bar)").unwrap_err(),
            Error::IdentifierEval { ref name } if name == "bar"
        ));
    }

    #[test]
    fn test_unknown_function() {
        assert!(matches!(
            eval_str("(frobnicate 1)").unwrap_err(),
            Error::UndefinedTool { ref name } if name == "frobnicate"
        ));
    }

    #[test]
    fn test_builtin_errors_surface_unchanged() {
        assert_eq!(
            eval_str("(first (list))").unwrap_err(),
            Error::IndexOutOfBounds { index: 0, length: 0 }
        );
        assert!(matches!(
            eval_str(r#"(+ 1 "2")"#).unwrap_err(),
            Error::TypeError { .. }
        ));
        assert!(matches!(
            eval_str("(first 1 2)").unwrap_err(),
            Error::InvalidArguments { .. }
        ));
    }

    #[test]
    fn test_unknown_function_checked_before_arguments() {
        // The head is resolved first, so a bad argument is never reached.
        assert!(matches!(
            eval_str("(nope foo)").unwrap_err(),
            Error::UndefinedTool { .. }
        ));
    }

    struct RecordTool {
        seen: Arc<Mutex<Vec<i64>>>,
    }

    impl Tool for RecordTool {
        fn name(&self) -> &str {
            "record"
        }

        fn description(&self) -> &str {
            "Records its first argument and returns it"
        }

        fn execute(&self, args: &[Value]) -> Result<Value> {
            let n = args.first().map(Value::as_int).transpose()?.unwrap_or(0);
            if let Ok(mut seen) = self.seen.lock() {
                seen.push(n);
            }
            Ok(Value::Int(n))
        }
    }

    #[test]
    fn test_arguments_evaluated_left_to_right() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ToolRegistry::new();
        registry.register(RecordTool { seen: seen.clone() });
        let evaluator = LispEvaluator::with_registry(registry);

        let program = SExprParser::new(
            SExprScanner::new("(list (record 1) (record 2) (list (record 3)) (record 4))").tokens(),
        )
        .parse()
        .unwrap();
        evaluator.execute(&program).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_evaluator_is_reusable() {
        let evaluator = LispEvaluator::new();
        let program = Expression::List(vec![
            Expression::Identifier("+".to_string()),
            Expression::Integer(2),
            Expression::Integer(3),
        ]);
        assert_eq!(evaluator.execute(&program).unwrap(), Value::Int(5));
        assert_eq!(evaluator.execute(&program).unwrap(), Value::Int(5));
        assert_eq!(evaluator.registry().count(), 3);
    }
}
