use std::time::{Duration, Instant};

use rowcast_core::Component;
use serde::{Deserialize, Serialize};

use crate::style::Styling;

/// Sub-second resolution shared by [`Timestamp`] and the date-time layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    #[default]
    Second,
    Milli,
    Micro,
    Nano,
}

impl Precision {
    pub fn digits(self) -> usize {
        match self {
            Precision::Second => 0,
            Precision::Milli => 3,
            Precision::Micro => 6,
            Precision::Nano => 9,
        }
    }
}

/// Elapsed time since a reference instant, right-aligned to ten columns.
pub struct Timestamp {
    precision: Precision,
    start: Instant,
    style: Styling,
}

impl Timestamp {
    /// Counts from now.
    pub fn new(precision: Precision, style: Styling) -> Self {
        Self::since(Instant::now(), precision, style)
    }

    pub fn since(start: Instant, precision: Precision, style: Styling) -> Self {
        Self {
            precision,
            start,
            style,
        }
    }

    pub fn format_elapsed(&self, elapsed: Duration) -> String {
        let secs = elapsed.as_secs();
        let nanos = elapsed.subsec_nanos();
        let digits = self.precision.digits();
        if digits == 0 {
            return format!("{secs:>10}");
        }
        let fraction = nanos / 10u32.pow(9 - digits as u32);
        format!("{:>10}", format!("{secs}.{fraction:0digits$}"))
    }
}

impl Component for Timestamp {
    fn render(&self) -> Option<String> {
        Some(self.style.apply(&self.format_elapsed(self.start.elapsed())))
    }
}
