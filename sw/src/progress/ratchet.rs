//! Monotonic progress gauge with de-duplicated change reporting.

/// Ratcheted progress fraction plus the display message that goes with it.
///
/// The fraction only moves forward for the lifetime of the gauge; a write
/// that would not strictly increase it is dropped. The message accepts any
/// value but rejects writes equal to what it already holds. Both setters
/// report whether the write took, so the owner can emit exactly one change
/// notification per accepted write.
#[derive(Clone, Debug, Default)]
pub struct ProgressGauge {
    fraction: f64,
    message: String,
}

impl ProgressGauge {
    pub fn new() -> Self {
        Self::default()
    }

    /// The highest fraction accepted so far.
    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Accept only strictly increasing values.
    pub fn set_fraction(&mut self, value: f64) -> bool {
        if value > self.fraction {
            self.fraction = value;
            true
        } else {
            false
        }
    }

    /// Accept only values that differ from the current message.
    pub fn set_message(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        if value != self.message {
            self.message = value;
            true
        } else {
            false
        }
    }
}
