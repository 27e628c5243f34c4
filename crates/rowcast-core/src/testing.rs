//! Test doubles: an in-memory output sink and a terminal model that replays
//! the byte stream the renderer produced.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Cloneable `Write` sink; every clone appends to the same buffer.
#[derive(Debug, Clone, Default)]
pub(crate) struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    pub(crate) fn bytes(&self) -> Vec<u8> {
        self.0.lock().unwrap().clone()
    }

    pub(crate) fn terminal(&self) -> VirtualTerminal {
        VirtualTerminal::replay(&self.bytes())
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Minimal cooked-mode terminal: understands the cursor, erase and SGR
/// sequences the renderer emits, and treats `\n` as "next line, column 0".
/// Cursor-down stops at the last existing row, as on a real screen.
#[derive(Debug, Default)]
pub(crate) struct VirtualTerminal {
    rows: Vec<Vec<char>>,
    row: usize,
    col: usize,
}

impl VirtualTerminal {
    pub(crate) fn replay(bytes: &[u8]) -> Self {
        let mut term = Self {
            rows: vec![Vec::new()],
            ..Self::default()
        };
        let text = String::from_utf8_lossy(bytes);
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\x1b' => {
                    assert_eq!(chars.next(), Some('['), "only CSI sequences are expected");
                    let mut params = String::new();
                    let mut fin = None;
                    for c in chars.by_ref() {
                        if ('\x40'..='\x7e').contains(&c) {
                            fin = Some(c);
                            break;
                        }
                        params.push(c);
                    }
                    term.csi(&params, fin.expect("unterminated CSI sequence"));
                }
                '\r' => term.col = 0,
                '\n' => {
                    term.row += 1;
                    term.col = 0;
                    if term.row == term.rows.len() {
                        term.rows.push(Vec::new());
                    }
                }
                c => term.put(c),
            }
        }
        term
    }

    fn csi(&mut self, params: &str, fin: char) {
        let n = params.parse::<usize>().unwrap_or(1);
        match fin {
            'A' => self.row = self.row.saturating_sub(n),
            'B' => self.row = (self.row + n).min(self.rows.len() - 1),
            'K' => self.rows[self.row].clear(),
            'm' => {}
            other => panic!("unexpected CSI final byte {other:?}"),
        }
    }

    fn put(&mut self, c: char) {
        let line = &mut self.rows[self.row];
        if self.col < line.len() {
            line[self.col] = c;
        } else {
            line.resize(self.col, ' ');
            line.push(c);
        }
        self.col += 1;
    }

    pub(crate) fn row(&self) -> usize {
        self.row
    }

    /// Row contents with trailing blank rows removed.
    pub(crate) fn visible_rows(&self) -> Vec<String> {
        let mut rows: Vec<String> = self.rows.iter().map(|r| r.iter().collect()).collect();
        while rows.last().is_some_and(String::is_empty) {
            rows.pop();
        }
        rows
    }
}
