use std::sync::Mutex;

/// Counts clock evaluations and the ones that failed.
pub struct EvaluationRecorder {
    inner: Mutex<Counters>,
}

struct Counters {
    evaluations: usize,
    errors: usize,
}

impl EvaluationRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Counters {
                evaluations: 0,
                errors: 0,
            }),
        }
    }

    pub fn record_evaluation(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.evaluations += 1;
        }
    }

    pub fn record_error(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.errors += 1;
        }
    }

    /// Records the outcome of one evaluation and hands the result back.
    pub fn observe<T, E>(&self, outcome: Result<T, E>) -> Result<T, E> {
        self.record_evaluation();
        if outcome.is_err() {
            self.record_error();
        }
        outcome
    }

    /// `(evaluations, errors)` so far.
    pub fn snapshot(&self) -> (usize, usize) {
        if let Ok(counters) = self.inner.lock() {
            (counters.evaluations, counters.errors)
        } else {
            (0, 0)
        }
    }
}

impl Default for EvaluationRecorder {
    fn default() -> Self {
        Self::new()
    }
}
