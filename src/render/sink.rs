use crate::render::dispatch::Rendered;

/// Receiver of an invocation's terminal outcome.
///
/// Contract: exactly one of `success` or `failure` is called per invocation.
pub trait ResultSink {
    fn success(&mut self, output: Rendered);
    /// `message` is the human-readable description of the failure.
    fn failure(&mut self, message: String);
}

/// A delivered outcome, as captured by [`InMemorySink`].
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Success(Rendered),
    Failure(String),
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    outcomes: Vec<Outcome>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every outcome delivered so far, in delivery order.
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// The single delivered outcome, or `None` if zero or several were delivered.
    pub fn only(&self) -> Option<&Outcome> {
        match self.outcomes.as_slice() {
            [one] => Some(one),
            _ => None,
        }
    }
}

impl ResultSink for InMemorySink {
    fn success(&mut self, output: Rendered) {
        self.outcomes.push(Outcome::Success(output));
    }

    fn failure(&mut self, message: String) {
        self.outcomes.push(Outcome::Failure(message));
    }
}

impl<F, G> ResultSink for (F, G)
where
    F: FnMut(Rendered),
    G: FnMut(String),
{
    fn success(&mut self, output: Rendered) {
        (self.0)(output)
    }

    fn failure(&mut self, message: String) {
        (self.1)(message)
    }
}
