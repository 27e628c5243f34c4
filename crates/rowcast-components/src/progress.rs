use rowcast_core::Component;

use crate::source::Source;
use crate::style::Styling;

const FILLED: char = '\u{2588}';
const EMPTY: char = ' ';

/// A fixed-width percentage bar: `|████      |  40%`.
pub struct ProgressBar {
    source: Box<dyn Source<u8>>,
    width: u8,
    style: Styling,
}

impl ProgressBar {
    pub const MIN_WIDTH: u8 = 4;
    pub const MAX_WIDTH: u8 = 75;

    /// `width` is clamped to [`MIN_WIDTH`](Self::MIN_WIDTH)..=[`MAX_WIDTH`](Self::MAX_WIDTH).
    pub fn new(source: impl Source<u8> + 'static, width: u8, style: Styling) -> Self {
        Self {
            source: Box::new(source),
            width: width.clamp(Self::MIN_WIDTH, Self::MAX_WIDTH),
            style,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    /// Unstyled bar for `percent`, clamped to 100.
    pub fn bar(&self, percent: u8) -> String {
        let percent = percent.min(100);
        let width = usize::from(self.width);
        let filled = usize::from(percent) * width / 100;

        let mut out = String::with_capacity(width * FILLED.len_utf8() + 8);
        out.push('|');
        out.extend(std::iter::repeat_n(FILLED, filled));
        out.extend(std::iter::repeat_n(EMPTY, width - filled));
        out.push('|');
        out.push_str(&format!(" {percent:>3}%"));
        out
    }
}

impl Component for ProgressBar {
    fn render(&self) -> Option<String> {
        Some(self.style.apply(&self.bar(self.source.read())))
    }
}
