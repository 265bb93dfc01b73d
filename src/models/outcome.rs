use serde::Serialize;

/// Per-batch tally. A failed record never aborts the rest of its batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IngestionOutcome {
    pub success: usize,
    pub failed: usize,
}

impl IngestionOutcome {
    pub fn tally<T, E>(mut self, result: &Result<T, E>) -> Self {
        match result {
            Ok(_) => self.success += 1,
            Err(_) => self.failed += 1,
        }
        self
    }

    pub fn merge(self, other: IngestionOutcome) -> Self {
        Self {
            success: self.success + other.success,
            failed: self.failed + other.failed,
        }
    }

    pub fn attempted(&self) -> usize {
        self.success + self.failed
    }

    /// Percentage of attempted records that were persisted; 0 for an empty batch.
    pub fn success_rate(&self) -> f64 {
        match self.attempted() {
            0 => 0.0,
            n => self.success as f64 / n as f64 * 100.0,
        }
    }
}

impl std::fmt::Display for IngestionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} inserted, {} failed ({:.1}% success)",
            self.success,
            self.failed,
            self.success_rate()
        )
    }
}
