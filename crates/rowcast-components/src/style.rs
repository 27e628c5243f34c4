//! SGR styling of component output.

use std::fmt::Write as _;

/// A 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Reads `0xRRGGBB`; bits above the low 24 are ignored.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: (hex >> 16) as u8,
            g: (hex >> 8) as u8,
            b: hex as u8,
        }
    }
}

impl From<u32> for Rgb {
    fn from(hex: u32) -> Self {
        Self::from_hex(hex)
    }
}

/// How a component's text is decorated.
///
/// `format` is a template with one `%s` placeholder for the text (`%%` is a
/// literal `%`); an empty template passes the text through. When any
/// attribute or color is set the result is wrapped in a single SGR sequence
/// and a reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Styling {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
    pub format: String,
}

impl Styling {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    #[must_use]
    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    #[must_use]
    pub fn strikethrough(mut self) -> Self {
        self.strikethrough = true;
        self
    }

    #[must_use]
    pub fn fg(mut self, color: impl Into<Rgb>) -> Self {
        self.fg = Some(color.into());
        self
    }

    #[must_use]
    pub fn bg(mut self, color: impl Into<Rgb>) -> Self {
        self.bg = Some(color.into());
        self
    }

    #[must_use]
    pub fn format(mut self, template: impl Into<String>) -> Self {
        self.format = template.into();
        self
    }

    pub fn is_plain(&self) -> bool {
        self.sgr().is_none()
    }

    pub fn apply(&self, text: &str) -> String {
        let body = substitute(&self.format, text);
        match self.sgr() {
            Some(codes) => format!("\x1b[{codes}m{body}\x1b[0m"),
            None => body,
        }
    }

    fn sgr(&self) -> Option<String> {
        let mut codes: Vec<String> = [
            (self.bold, "1"),
            (self.italic, "3"),
            (self.underline, "4"),
            (self.strikethrough, "9"),
        ]
        .into_iter()
        .filter(|(on, _)| *on)
        .map(|(_, code)| code.to_string())
        .collect();
        if let Some(Rgb { r, g, b }) = self.fg {
            codes.push(format!("38;2;{r};{g};{b}"));
        }
        if let Some(Rgb { r, g, b }) = self.bg {
            codes.push(format!("48;2;{r};{g};{b}"));
        }
        (!codes.is_empty()).then(|| codes.join(";"))
    }
}

/// Replaces the first `%s` in `template` with `text`.
fn substitute(template: &str, text: &str) -> String {
    if template.is_empty() {
        return text.to_string();
    }
    let mut out = String::with_capacity(template.len() + text.len());
    let mut used = false;
    let mut chars = template.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('%') => out.push('%'),
            Some('s') if !used => {
                out.push_str(text);
                used = true;
            }
            Some(other) => {
                let _ = write!(out, "%{other}");
            }
            None => out.push('%'),
        }
    }
    out
}
