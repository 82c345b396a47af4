//! Injected diagnostics sink.
//!
//! This crate has no logging dependency: instead of calling into a logging facade,
//! the algorithms that benefit from tracing (path assembly, tagging, offsetting)
//! accept a `&dyn Diagnostics` and report through it. Callers that don't care pass
//! [`NullDiagnostics`], which costs nothing; callers embedding this crate in a larger
//! application wire their own sink to whatever they already use for logging.

/// A sink for low-volume, human-readable trace events emitted during path assembly,
/// segment tagging, and offsetting.
///
/// Implementors decide what to do with each event: drop it, print it, forward it to
/// a logging facade, or collect it for a test assertion.
pub trait Diagnostics {
    /// Called with a short, already-formatted message describing a decision the
    /// algorithm just made (e.g. "assembly stalled after 3 of 5 segments, restarting
    /// from an unused segment").
    fn trace(&self, message: &str);
}

/// A [`Diagnostics`] sink that discards everything. The default for all entry points
/// that take an optional sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDiagnostics;

impl Diagnostics for NullDiagnostics {
    fn trace(&self, _message: &str) {}
}

/// Adapts a closure into a [`Diagnostics`] sink, for callers who'd rather pass
/// `FnDiagnostics(|msg| eprintln!("{msg}"))` than write an impl.
pub struct FnDiagnostics<F: Fn(&str)>(pub F);

impl<F: Fn(&str)> Diagnostics for FnDiagnostics<F> {
    fn trace(&self, message: &str) {
        (self.0)(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn null_diagnostics_is_a_no_op() {
        NullDiagnostics.trace("anything");
    }

    #[test]
    fn fn_diagnostics_forwards_to_closure() {
        let messages = RefCell::new(Vec::new());
        let sink = FnDiagnostics(|msg: &str| messages.borrow_mut().push(msg.to_string()));
        sink.trace("hello");
        sink.trace("world");
        assert_eq!(*messages.borrow(), vec!["hello", "world"]);
    }
}
