use rowcast_core::Component;

use crate::source::Source;
use crate::style::Styling;

/// A live string, styled.
pub struct Text {
    source: Box<dyn Source<String>>,
    style: Styling,
}

impl Text {
    pub fn new(source: impl Source<String> + 'static, style: Styling) -> Self {
        Self {
            source: Box::new(source),
            style,
        }
    }

    /// A label that never changes.
    pub fn fixed(text: impl Into<String>, style: Styling) -> Self {
        let text = text.into();
        Self::new(move || text.clone(), style)
    }
}

impl Component for Text {
    fn render(&self) -> Option<String> {
        Some(self.style.apply(&self.source.read()))
    }
}
