#![forbid(unsafe_code)]

//! Structured logging from the event loop.
//!
//! The loop logs through `tracing` unconditionally: a run span, focus
//! transfers, overlay transitions, and commands. These tests install a
//! capturing layer and check that the expected records appear.
//!
//!   cargo test -p trellis-runtime --test tracing_tests

use std::sync::{Arc, Mutex};

use trellis_core::event::{Event, KeyCode, KeyEvent, Modifiers};
use trellis_layout::Placement;
use trellis_render::HeadlessScreen;
use trellis_runtime::{KeyCombo, Manager};
use trellis_widgets::{Label, TextEditor};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

// ============================================================================
// Test Infrastructure
// ============================================================================

/// One captured event: its message and the span it was emitted in.
#[derive(Debug, Clone)]
struct Record {
    message: String,
    span: Option<String>,
}

#[derive(Default, Clone)]
struct Capture {
    spans: Arc<Mutex<Vec<String>>>,
    records: Arc<Mutex<Vec<Record>>>,
}

impl Capture {
    fn spans(&self) -> Vec<String> {
        self.spans.lock().unwrap().clone()
    }

    fn records(&self) -> Vec<Record> {
        self.records.lock().unwrap().clone()
    }

    fn messages(&self) -> Vec<String> {
        self.records().into_iter().map(|r| r.message).collect()
    }
}

struct MessageVisitor(Option<String>);

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = Some(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.0 = Some(value.to_string());
        }
    }
}

impl<S> tracing_subscriber::Layer<S> for Capture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        self.spans
            .lock()
            .unwrap()
            .push(attrs.metadata().name().to_string());
    }

    fn on_event(&self, event: &tracing::Event<'_>, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = MessageVisitor(None);
        event.record(&mut visitor);
        let span = ctx
            .event_span(event)
            .map(|s| s.name().to_string());
        self.records.lock().unwrap().push(Record {
            message: visitor.0.unwrap_or_default(),
            span,
        });
    }
}

fn with_capture<F: FnOnce()>(f: F) -> Capture {
    let capture = Capture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    tracing::subscriber::with_default(subscriber, f);
    capture
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn run_emits_span_and_lifecycle_events() {
    let capture = with_capture(|| {
        let screen = HeadlessScreen::new(8, 2).with_events([Event::Wake]);
        let mut manager = Manager::new(screen, Label::new("x")).unwrap();
        manager.run().unwrap();
    });

    assert!(capture.spans().iter().any(|s| s == "trellis.manager.run"));
    let records = capture.records();
    let started = records
        .iter()
        .find(|r| r.message == "event loop started")
        .expect("start record");
    assert_eq!(started.span.as_deref(), Some("trellis.manager.run"));
    assert!(records.iter().any(|r| r.message == "event source exhausted"));
    assert!(records.iter().any(|r| r.message == "event loop stopped"));
}

#[test]
fn focus_and_overlay_transitions_are_logged() {
    let capture = with_capture(|| {
        let mut manager = Manager::new(HeadlessScreen::new(20, 5), Label::new("root")).unwrap();
        manager.set_focus(TextEditor::new());
        manager.show_overlay(Label::new("menu"), Placement::Center);
        manager.dismiss_overlay();
    });

    let messages = capture.messages();
    assert!(messages.iter().any(|m| m == "focus transferred"));
    assert!(messages.iter().any(|m| m == "overlay shown"));
    assert!(messages.iter().any(|m| m == "overlay dismissed"));
}

#[test]
fn binding_dispatch_and_commands_are_logged() {
    let capture = with_capture(|| {
        let mut manager = Manager::new(HeadlessScreen::new(8, 2), Label::new("x")).unwrap();
        manager.bind("quit", KeyCombo::ctrl('q'), |ctl| ctl.quit());
        let key = KeyEvent::new(KeyCode::Char('q')).with_modifiers(Modifiers::CTRL);
        manager.handle_event(Event::Key(key));
    });

    let messages = capture.messages();
    assert!(messages.iter().any(|m| m == "command"));
    assert!(messages.iter().any(|m| m.contains("binding")));
}

#[test]
fn silent_without_subscriber() {
    // No subscriber installed: logging must not affect behavior.
    let mut manager = Manager::new(HeadlessScreen::new(4, 1), Label::new("ok")).unwrap();
    manager.draw().unwrap();
    assert_eq!(manager.screen().row_text(0), "ok  ");
}
