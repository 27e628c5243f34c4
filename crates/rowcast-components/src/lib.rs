//! Ready-made components for rowcast profiles.
//!
//! Every component reads its live value at render time through a
//! [`Source`] and finishes its text with a [`Styling`].

pub mod datetime;
pub mod progress;
pub mod source;
pub mod style;
pub mod text;
pub mod timestamp;

pub use datetime::{DateOrder, Datetime, DatetimeLayout, MonthStyle};
pub use progress::ProgressBar;
pub use source::{Shared, Source};
pub use style::{Rgb, Styling};
pub use text::Text;
pub use timestamp::{Precision, Timestamp};
