//! Tests for the buffer view
//!
//! The view is exercised headlessly: a `DirectorySink` over a temp dir stands
//! in for the downloads folder and an in-test `RemoteExecutor` stands in for
//! the execution service.

use chatpad::clear_confirmation_ui::ClearConfirmAction;
use chatpad::exec::{
    ExecError, ExecRequest, ExecResponse, JsEvaluator, Language, OutputStatus, RemoteExecutor,
    RemoteRunner,
};
use chatpad::save::DirectorySink;
use chatpad::session::SessionRegistry;
use chatpad::view::{BufferView, OUTPUT_PLACEHOLDER};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tempfile::TempDir;

/// Answers every request with `ran <language>: <code>` after a delay
struct EchoExecutor {
    delay: Duration,
}

impl RemoteExecutor for EchoExecutor {
    fn execute(&self, request: &ExecRequest) -> Result<ExecResponse, ExecError> {
        thread::sleep(self.delay);
        Ok(ExecResponse {
            stdout: Some(format!("ran {}: {}", request.language, request.code)),
            ..Default::default()
        })
    }
}

struct Harness {
    registry: SessionRegistry,
    view: BufferView,
    dir: TempDir,
}

fn harness_with_delay(delay: Duration) -> Harness {
    let dir = TempDir::new().unwrap();
    let remote = RemoteRunner::new(
        Arc::new(EchoExecutor { delay }),
        "http://localhost:3001/api/execute",
    );
    let mut view = BufferView::new(
        JsEvaluator::default(),
        remote,
        Box::new(DirectorySink::new(dir.path())),
    );
    let mut registry = SessionRegistry::new();
    view.bind_registry(&mut registry);
    Harness {
        registry,
        view,
        dir,
    }
}

fn harness() -> Harness {
    harness_with_delay(Duration::ZERO)
}

fn wait_for_remote(view: &mut BufferView) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while view.has_pending_runs() && Instant::now() < deadline {
        view.poll_remote();
        thread::sleep(Duration::from_millis(10));
    }
    assert!(!view.has_pending_runs(), "remote run did not finish");
}

fn output(view: &BufferView) -> (String, OutputStatus) {
    let surface = view.surface().expect("surface");
    (surface.output.text, surface.output.status)
}

// ============================================================================
// Handshake and rendering
// ============================================================================

#[test]
fn test_bind_renders_active_buffer() {
    let h = harness();
    assert!(h.view.is_bound());
    assert!(h.registry.has_view());

    let surface = h.view.surface().unwrap();
    assert_eq!(surface.buffer_id, 1);
    assert_eq!(surface.header(), "Code Editor - Untitled-1");
    assert_eq!(surface.language, Language::Auto);
    assert_eq!(surface.output.text, OUTPUT_PLACEHOLDER);
    assert_eq!(surface.output.status, OutputStatus::Neutral);
    assert_eq!(surface.placeholder_hint(), "Enter your code here...");
}

#[test]
fn test_second_bind_is_ignored() {
    let mut h = harness();
    let mut other = SessionRegistry::new();
    h.view.bind_registry(&mut other);
    assert!(!other.has_view());
}

#[test]
fn test_unbound_view_does_not_write_through() {
    let remote = RemoteRunner::new(
        Arc::new(EchoExecutor {
            delay: Duration::ZERO,
        }),
        "http://localhost:3001",
    );
    let dir = TempDir::new().unwrap();
    let mut view = BufferView::new(
        JsEvaluator::default(),
        remote,
        Box::new(DirectorySink::new(dir.path())),
    );
    let mut registry = SessionRegistry::new();
    view.render(&registry);
    view.edit_text(&mut registry, "let a = 1;");

    assert_eq!(registry.buffer(1).unwrap().content, "");
}

#[test]
fn test_edits_write_through_and_rename() {
    let mut h = harness();
    h.view.edit_text(&mut h.registry, "hello world\nconsole.log(1)");

    let record = h.registry.buffer(1).unwrap();
    assert_eq!(record.content, "hello world\nconsole.log(1)");
    assert_eq!(record.name, "hello world");
}

#[test]
fn test_language_change_writes_through_and_updates_hint() {
    let mut h = harness();
    h.view.set_language(&mut h.registry, Language::Php);

    assert_eq!(h.registry.buffer(1).unwrap().language, Language::Php);
    assert_eq!(
        h.view.surface().unwrap().placeholder_hint(),
        "Enter your php code here..."
    );
}

#[test]
fn test_switching_rebuilds_surface_from_record() {
    let mut h = harness();
    h.view.edit_text(&mut h.registry, "first");

    h.registry.create_buffer(None);
    assert!(h.view.sync(&h.registry));
    let surface = h.view.surface().unwrap();
    assert_eq!(surface.buffer_id, 2);
    assert_eq!(surface.text, "");

    h.view.edit_text(&mut h.registry, "second");
    h.registry.switch_to(1);
    h.view.sync(&h.registry);
    assert_eq!(h.view.surface().unwrap().text, "first");
    assert_eq!(h.registry.buffer(2).unwrap().content, "second");
    assert!(!h.view.sync(&h.registry));
}

#[test]
fn test_pending_surface_text_is_flushed_before_create() {
    let mut h = harness();
    h.view.edit_text(&mut h.registry, "draft");
    h.registry.create_buffer(None);
    assert_eq!(h.registry.buffer(1).unwrap().content, "draft");
}

#[test]
fn test_minimize_shows_placeholder_and_maximize_restores() {
    let mut h = harness();
    h.view.edit_text(&mut h.registry, "kept");

    h.registry.minimize();
    h.view.sync(&h.registry);
    assert!(h.view.is_placeholder());

    h.registry.maximize();
    h.view.sync(&h.registry);
    assert_eq!(h.view.surface().unwrap().text, "kept");
}

#[test]
fn test_close_window_shows_placeholder() {
    let mut h = harness();
    h.registry.close_window();
    h.view.sync(&h.registry);
    assert!(h.view.is_placeholder());
    h.view.run();
    h.view.save(&h.registry);
}

// ============================================================================
// Run
// ============================================================================

#[test]
fn test_run_javascript_locally() {
    let mut h = harness();
    h.view.edit_text(&mut h.registry, "2 + 2");
    h.view.run();

    let (text, status) = output(&h.view);
    assert!(text.contains('4'), "{text}");
    assert_eq!(status, OutputStatus::Neutral);
}

#[test]
fn test_run_thrown_error_is_reported() {
    let mut h = harness();
    h.view.edit_text(&mut h.registry, "throw new Error('boom')");
    h.view.run();

    let (text, status) = output(&h.view);
    assert!(text.contains("boom"), "{text}");
    assert_eq!(status, OutputStatus::Error);
}

#[test]
fn test_run_blank_warns() {
    let mut h = harness();
    h.view.edit_text(&mut h.registry, "  \n ");
    h.view.run();
    assert_eq!(
        output(&h.view),
        (
            "Please enter some code first.".to_string(),
            OutputStatus::Warning
        )
    );
}

#[test]
fn test_run_python_remotely() {
    let mut h = harness_with_delay(Duration::from_millis(50));
    h.view.edit_text(&mut h.registry, "  print('hi')  ");
    h.view.run();

    assert_eq!(
        output(&h.view),
        (
            "Executing python code on server...".to_string(),
            OutputStatus::Info
        )
    );

    wait_for_remote(&mut h.view);
    assert_eq!(
        output(&h.view),
        (
            "ran python: print('hi')".to_string(),
            OutputStatus::Neutral
        )
    );
}

#[test]
fn test_explicit_language_overrides_detection() {
    let mut h = harness();
    h.view.set_language(&mut h.registry, Language::Java);
    h.view.edit_text(&mut h.registry, "2 + 2");
    h.view.run();
    wait_for_remote(&mut h.view);
    assert_eq!(output(&h.view).0, "ran java: 2 + 2");
}

#[test]
fn test_stale_remote_result_is_discarded() {
    let mut h = harness_with_delay(Duration::from_millis(100));
    h.view.edit_text(&mut h.registry, "print(1)");
    h.view.run();

    h.registry.create_buffer(None);
    h.view.sync(&h.registry);
    wait_for_remote(&mut h.view);
    assert_eq!(output(&h.view).0, OUTPUT_PLACEHOLDER);

    h.registry.switch_to(1);
    h.view.sync(&h.registry);
    assert_eq!(output(&h.view).0, OUTPUT_PLACEHOLDER);
}

// ============================================================================
// Save
// ============================================================================

#[test]
fn test_save_sanitizes_name_and_uses_detected_extension() {
    let mut h = harness();
    let id = h.registry.create_buffer(Some("Hello World!!"));
    h.view.sync(&h.registry);
    h.view.edit_text(&mut h.registry, "\nconsole.log('hi');\n");
    h.view.save(&h.registry);

    assert_eq!(h.registry.buffer(id).unwrap().name, "Hello World!!");
    assert_eq!(
        output(&h.view),
        (
            "File saved as Hello World.js".to_string(),
            OutputStatus::Success
        )
    );
    let saved = std::fs::read_to_string(h.dir.path().join("Hello World.js")).unwrap();
    assert_eq!(saved, "console.log('hi');");
}

#[test]
fn test_save_uses_renamed_buffer_name() {
    let mut h = harness();
    h.view.edit_text(&mut h.registry, "def greet():\n    print('hi')");
    h.view.save(&h.registry);
    assert_eq!(output(&h.view).0, "File saved as def greet.py");
    assert!(h.dir.path().join("def greet.py").exists());
}

#[test]
fn test_save_falls_back_to_untitled_stem() {
    let mut h = harness();
    h.registry.create_buffer(Some("!!!"));
    h.view.sync(&h.registry);
    h.view.edit_text(&mut h.registry, "<?php echo 1;");
    h.view.save(&h.registry);
    assert_eq!(output(&h.view).0, "File saved as untitled.php");
}

#[test]
fn test_save_blank_warns_and_writes_nothing() {
    let mut h = harness();
    h.view.save(&h.registry);
    assert_eq!(
        output(&h.view),
        ("No code to save.".to_string(), OutputStatus::Warning)
    );
    assert_eq!(std::fs::read_dir(h.dir.path()).unwrap().count(), 0);
}

#[test]
fn test_save_failure_is_error() {
    let dir = TempDir::new().unwrap();
    let remote = RemoteRunner::new(
        Arc::new(EchoExecutor {
            delay: Duration::ZERO,
        }),
        "http://localhost:3001",
    );
    let mut view = BufferView::new(
        JsEvaluator::default(),
        remote,
        Box::new(DirectorySink::new(dir.path().join("missing"))),
    );
    let mut registry = SessionRegistry::new();
    view.bind_registry(&mut registry);
    view.edit_text(&mut registry, "let a = 1;");
    view.save(&registry);
    assert_eq!(output(&view).1, OutputStatus::Error);
}

// ============================================================================
// Clear
// ============================================================================

#[test]
fn test_declined_clear_changes_nothing() {
    let mut h = harness();
    h.view.edit_text(&mut h.registry, "1 + 1");
    h.view.run();
    let before_surface = h.view.surface().unwrap();
    let before_record = h.registry.buffer(1).unwrap().clone();

    h.view.request_clear();
    assert!(h.view.is_clear_pending());
    h.view.resolve_clear(ClearConfirmAction::Cancel, &mut h.registry);

    assert!(!h.view.is_clear_pending());
    assert_eq!(h.view.surface().unwrap(), before_surface);
    assert_eq!(h.registry.buffer(1).unwrap(), &before_record);
}

#[test]
fn test_confirmed_clear_empties_buffer() {
    let mut h = harness();
    h.view.edit_text(&mut h.registry, "notes");
    h.view.run();

    h.view.request_clear();
    h.view.resolve_clear(ClearConfirmAction::Confirm, &mut h.registry);

    let surface = h.view.surface().unwrap();
    assert_eq!(surface.text, "");
    assert_eq!(surface.output.text, OUTPUT_PLACEHOLDER);
    let record = h.registry.buffer(1).unwrap();
    assert_eq!(record.content, "");
    assert_eq!(record.name, "notes");
}

#[test]
fn test_clear_dialog_does_not_follow_tab_switch() {
    let mut h = harness();
    h.view.edit_text(&mut h.registry, "buffer one");
    let second = h.registry.create_buffer(None);
    h.view.sync(&h.registry);
    h.view.edit_text(&mut h.registry, "precious two");

    h.registry.switch_to(1);
    h.view.sync(&h.registry);
    h.view.request_clear();
    assert!(h.view.is_clear_pending());

    h.registry.switch_to(second);
    h.view.sync(&h.registry);
    assert!(!h.view.is_clear_pending());

    h.view.resolve_clear(ClearConfirmAction::Confirm, &mut h.registry);
    assert_eq!(h.view.surface().unwrap().text, "precious two");
    assert_eq!(h.registry.buffer(second).unwrap().content, "precious two");
    assert_eq!(h.registry.buffer(1).unwrap().content, "buffer one");
}

#[test]
fn test_clear_confirmed_before_rerender_hits_named_buffer() {
    let mut h = harness();
    h.view.edit_text(&mut h.registry, "buffer one");
    let second = h.registry.create_buffer(None);
    h.view.sync(&h.registry);
    h.view.edit_text(&mut h.registry, "precious two");
    h.registry.switch_to(1);
    h.view.sync(&h.registry);

    h.view.request_clear();
    h.view.resolve_clear(ClearConfirmAction::Confirm, &mut h.registry);

    assert_eq!(h.registry.buffer(1).unwrap().content, "");
    assert_eq!(h.registry.buffer(second).unwrap().content, "precious two");
}

// ============================================================================
// Format
// ============================================================================

#[test]
fn test_format_javascript() {
    let mut h = harness();
    h.view
        .edit_text(&mut h.registry, "function f(a,b){ return a+b; }");
    h.view.format(&mut h.registry);

    let expected = "function f(a, b) {\nreturn a+b;\n}";
    assert_eq!(h.view.surface().unwrap().text, expected);
    assert_eq!(h.registry.buffer(1).unwrap().content, expected);
    assert_eq!(
        output(&h.view),
        (
            "Code formatted successfully!".to_string(),
            OutputStatus::Success
        )
    );
}

#[test]
fn test_format_other_language_is_not_supported() {
    let mut h = harness();
    h.view.edit_text(&mut h.registry, "def f():\n  return 1");
    h.view.format(&mut h.registry);

    assert_eq!(h.view.surface().unwrap().text, "def f():\n  return 1");
    assert_eq!(
        output(&h.view),
        (
            "Formatting for python is not supported yet.".to_string(),
            OutputStatus::Info
        )
    );
}

#[test]
fn test_format_rewrites_stray_close_brace() {
    let mut h = harness();
    h.view.set_language(&mut h.registry, Language::JavaScript);
    h.view.edit_text(&mut h.registry, "let a = 1; }");
    h.view.format(&mut h.registry);

    assert_eq!(h.view.surface().unwrap().text, "let a = 1;\n}");
    assert_eq!(h.registry.buffer(1).unwrap().content, "let a = 1;\n}");
    assert_eq!(output(&h.view).1, OutputStatus::Success);
}

// ============================================================================
// Indentation
// ============================================================================

#[test]
fn test_insert_indent_writes_through() {
    let mut h = harness();
    h.view.edit_text(&mut h.registry, "if (x) {\n}");
    let cursor = h.view.insert_indent(&mut h.registry, 9, 9);

    assert_eq!(cursor, Some(13));
    assert_eq!(h.registry.buffer(1).unwrap().content, "if (x) {\n    }");
}
