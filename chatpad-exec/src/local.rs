//! In-process JavaScript evaluation.
//!
//! Each run gets a fresh interpreter context with a `console` object whose
//! output is captured line by line and tagged with its severity. Capture
//! state is thread-local and is always reset when a run ends, whatever the
//! outcome. Thrown values are turned into an error report and never escape.

use crate::report::RunReport;
use boa_engine::object::ObjectInitializer;
use boa_engine::property::Attribute;
use boa_engine::{Context, JsError, JsResult, JsValue, NativeFunction, Source, js_string};
use std::cell::RefCell;
use std::fmt;

/// Severity of a captured console line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleSeverity {
    Log,
    Warn,
    Error,
}

/// One captured `console.*` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLine {
    pub severity: ConsoleSeverity,
    pub text: String,
}

impl fmt::Display for ConsoleLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            ConsoleSeverity::Log => write!(f, ">> {}", self.text),
            ConsoleSeverity::Warn => write!(f, "WARNING: {}", self.text),
            ConsoleSeverity::Error => write!(f, "ERROR: {}", self.text),
        }
    }
}

thread_local! {
    static CAPTURED: RefCell<Vec<ConsoleLine>> = const { RefCell::new(Vec::new()) };
}

/// Scope of one capture; clears the buffer on entry and on drop.
struct CaptureGuard;

impl CaptureGuard {
    fn begin() -> Self {
        CAPTURED.with_borrow_mut(Vec::clear);
        CaptureGuard
    }

    fn take(&self) -> Vec<ConsoleLine> {
        CAPTURED.with_borrow_mut(std::mem::take)
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        CAPTURED.with_borrow_mut(Vec::clear);
    }
}

fn capture(severity: ConsoleSeverity, text: String) {
    match severity {
        ConsoleSeverity::Log => log::info!(target: "chatpad::console", "{text}"),
        ConsoleSeverity::Warn => log::warn!(target: "chatpad::console", "{text}"),
        ConsoleSeverity::Error => log::error!(target: "chatpad::console", "{text}"),
    }
    CAPTURED.with_borrow_mut(|lines| lines.push(ConsoleLine { severity, text }));
}

/// Render a value for the output panel.
///
/// With `structured` set, plain objects and arrays are shown as indented
/// JSON; everything else uses the language's own string conversion.
fn display_value(value: &JsValue, context: &mut Context, structured: bool) -> String {
    if structured && value.is_object() && !value.is_callable() {
        if let Ok(json) = value.to_json(context)
            && let Ok(pretty) = serde_json::to_string_pretty(&json)
        {
            return pretty;
        }
    }
    match value.to_string(context) {
        Ok(s) => s.to_std_string_escaped(),
        Err(_) => value.display().to_string(),
    }
}

fn join_args(args: &[JsValue], context: &mut Context, structured: bool) -> String {
    args.iter()
        .map(|arg| display_value(arg, context, structured))
        .collect::<Vec<_>>()
        .join(" ")
}

fn console_log(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let text = join_args(args, context, true);
    capture(ConsoleSeverity::Log, text);
    Ok(JsValue::undefined())
}

fn console_warn(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let text = join_args(args, context, false);
    capture(ConsoleSeverity::Warn, text);
    Ok(JsValue::undefined())
}

fn console_error(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let text = join_args(args, context, false);
    capture(ConsoleSeverity::Error, text);
    Ok(JsValue::undefined())
}

fn install_console(context: &mut Context) -> JsResult<()> {
    let console = ObjectInitializer::new(context)
        .function(NativeFunction::from_fn_ptr(console_log), js_string!("log"), 0)
        .function(NativeFunction::from_fn_ptr(console_log), js_string!("info"), 0)
        .function(NativeFunction::from_fn_ptr(console_warn), js_string!("warn"), 0)
        .function(NativeFunction::from_fn_ptr(console_error), js_string!("error"), 0)
        .build();
    context.register_global_property(js_string!("console"), console, Attribute::all())
}

fn describe_error(err: &JsError, context: &mut Context) -> String {
    match err.try_native(context) {
        // "Error: boom", "TypeError: x is not a function", ...
        Ok(native) => native.to_string(),
        Err(_) => format!("Uncaught {err}"),
    }
}

/// Evaluates JavaScript snippets in the current process.
#[derive(Debug, Clone)]
pub struct JsEvaluator {
    max_loop_iterations: u64,
}

impl Default for JsEvaluator {
    fn default() -> Self {
        Self::new(1_000_000)
    }
}

impl JsEvaluator {
    pub fn new(max_loop_iterations: u64) -> Self {
        Self {
            max_loop_iterations,
        }
    }

    /// Evaluate `code` and report captured console output plus the
    /// completion value.
    pub fn run(&self, code: &str) -> RunReport {
        let guard = CaptureGuard::begin();

        let mut context = Context::default();
        context
            .runtime_limits_mut()
            .set_loop_iteration_limit(self.max_loop_iterations);

        if let Err(err) = install_console(&mut context) {
            log::error!("Failed to install console capture: {err}");
            return RunReport::error(describe_error(&err, &mut context));
        }

        let outcome = context.eval(Source::from_bytes(code));
        let lines = guard.take();

        match outcome {
            Ok(value) => {
                let mut output: Vec<String> = lines.iter().map(ToString::to_string).collect();
                if !value.is_undefined() && !value.is_null() {
                    output.push(format!(
                        "Result: {}",
                        display_value(&value, &mut context, true)
                    ));
                }

                if output.is_empty() {
                    RunReport::neutral("Code executed successfully (no output).")
                } else {
                    RunReport::neutral(output.join("\n"))
                }
            }
            Err(err) => {
                let message = describe_error(&err, &mut context);
                log::debug!("JavaScript evaluation failed: {message}");
                RunReport::error(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CAPTURED, JsEvaluator};
    use crate::report::OutputStatus;

    #[test]
    fn test_expression_result() {
        let report = JsEvaluator::default().run("2 + 2");
        assert_eq!(report.status, OutputStatus::Neutral);
        assert_eq!(report.text, "Result: 4");
    }

    #[test]
    fn test_thrown_error_is_reported() {
        let report = JsEvaluator::default().run("throw new Error('boom')");
        assert_eq!(report.status, OutputStatus::Error);
        assert!(report.text.contains("boom"), "got: {}", report.text);
    }

    #[test]
    fn test_thrown_primitive_is_reported() {
        let report = JsEvaluator::default().run("throw 'kaboom'");
        assert_eq!(report.status, OutputStatus::Error);
        assert!(report.text.contains("kaboom"), "got: {}", report.text);
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let report = JsEvaluator::default().run("function (");
        assert_eq!(report.status, OutputStatus::Error);
    }

    #[test]
    fn test_console_lines_are_tagged() {
        let report = JsEvaluator::default()
            .run("console.log('a', 1); console.warn('careful'); console.error('bad');");
        assert_eq!(report.text, ">> a 1\nWARNING: careful\nERROR: bad");
    }

    #[test]
    fn test_objects_are_pretty_printed() {
        let report = JsEvaluator::default().run("console.log({a: 1}); [1, 2]");
        assert_eq!(report.text, ">> {\n  \"a\": 1\n}\nResult: [\n  1,\n  2\n]");
    }

    #[test]
    fn test_no_output_message() {
        let report = JsEvaluator::default().run("function f(){ console.log(1); }");
        assert_eq!(report.text, "Code executed successfully (no output).");
    }

    #[test]
    fn test_capture_is_reset_after_failure() {
        let report = JsEvaluator::default().run("console.log('before'); throw new Error('x')");
        assert_eq!(report.status, OutputStatus::Error);
        assert!(CAPTURED.with_borrow(|lines| lines.is_empty()));

        let next = JsEvaluator::default().run("1");
        assert_eq!(next.text, "Result: 1");
    }

    #[test]
    fn test_runaway_loop_is_stopped() {
        let report = JsEvaluator::new(1_000).run("while (true) {}");
        assert_eq!(report.status, OutputStatus::Error);
    }
}
