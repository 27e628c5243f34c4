use std::io::{self, Write};

/// One complete set of component outputs for a slot at a point in time.
///
/// Entries keep the order of the components that produced them. Absent
/// entries are skipped when printed; no placeholder or separator is added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    entries: Vec<Option<String>>,
}

impl Frame {
    pub fn new(entries: Vec<Option<String>>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Option<String>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The printed form of the frame: present entries concatenated in order.
    pub fn text(&self) -> String {
        self.entries.iter().flatten().map(String::as_str).collect()
    }

    pub(crate) fn write_to(&self, out: &mut impl Write) -> io::Result<()> {
        for entry in self.entries.iter().flatten() {
            out.write_all(entry.as_bytes())?;
        }
        Ok(())
    }
}

impl FromIterator<Option<String>> for Frame {
    fn from_iter<I: IntoIterator<Item = Option<String>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_skips_absent_entries_without_separators() {
        let frame: Frame = [Some("a".to_string()), None, Some("b".to_string())]
            .into_iter()
            .collect();

        assert_eq!(frame.len(), 3);
        assert_eq!(frame.text(), "ab");
    }

    #[test]
    fn write_to_matches_text() {
        let frame = Frame::new(vec![None, Some("x".into()), Some("yz".into())]);
        let mut out = Vec::new();
        frame.write_to(&mut out).unwrap();
        assert_eq!(out, b"xyz");
    }

    #[test]
    fn empty_frame_prints_nothing() {
        let frame = Frame::default();
        assert!(frame.is_empty());
        assert_eq!(frame.text(), "");
    }
}
