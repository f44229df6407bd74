//! Control event sink trait and implementations.

use std::cell::RefCell;
use std::rc::Rc;

use super::AmountInputEvent;

/// Trait for receiving control events.
///
/// The control is single-threaded, so sinks are shared through `Rc` and
/// called synchronously from the operation that caused the event.
///
/// # Design Rules
///
/// - `emit()` must return quickly and must not call back into the control
/// - Failure to handle an event must not affect the control state
pub trait AmountInputEventSink {
    /// Emit a single event.
    fn emit(&self, event: AmountInputEvent);

    /// Emit multiple events.
    ///
    /// Default implementation calls `emit()` for each event.
    fn emit_batch(&self, events: Vec<AmountInputEvent>) {
        for event in events {
            self.emit(event);
        }
    }
}

/// No-op implementation for hosts that don't observe the control.
#[derive(Clone, Default)]
pub struct NoOpEventSink;

impl AmountInputEventSink for NoOpEventSink {
    fn emit(&self, _event: AmountInputEvent) {}
}

/// Mock sink for testing - collects emitted events.
#[derive(Clone, Default)]
pub struct MockEventSink {
    events: Rc<RefCell<Vec<AmountInputEvent>>>,
}

impl MockEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected events.
    pub fn events(&self) -> Vec<AmountInputEvent> {
        self.events.borrow().clone()
    }

    /// Returns the `positive` flag of every collected TypeChanged event.
    pub fn type_changes(&self) -> Vec<bool> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                AmountInputEvent::TypeChanged { positive, .. } => Some(*positive),
                _ => None,
            })
            .collect()
    }

    /// Clears collected events.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    /// Returns the number of collected events.
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Returns true if no events have been collected.
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl AmountInputEventSink for MockEventSink {
    fn emit(&self, event: AmountInputEvent) {
        self.events.borrow_mut().push(event);
    }
}
