//! Screen buffer types
//!
//! A character screen buffer for the serial bench console. The buffer is
//! sized for the bench view's exact footprint and lives in a shared
//! static on the firmware side, so construction is `const`.

use heapless::String;

/// Number of character rows in the bench view
pub const SCREEN_ROWS: usize = 9;

/// Number of character columns in the bench view
pub const SCREEN_COLS: usize = 79;

/// Maximum characters per line
pub const LINE_LEN: usize = SCREEN_COLS;

/// Screen buffer for the serial console
#[derive(Clone)]
pub struct Screen {
    lines: [String<LINE_LEN>; SCREEN_ROWS],
}

impl Screen {
    /// Create a new empty screen
    pub const fn new() -> Self {
        Self {
            lines: [
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
            ],
        }
    }

    /// Clear the entire screen
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
    }

    /// Set the content of a specific row
    pub fn set_line(&mut self, row: usize, text: &str) {
        if row < SCREEN_ROWS {
            self.lines[row].clear();
            // Truncate if too long
            let text = if text.len() > LINE_LEN {
                &text[..LINE_LEN]
            } else {
                text
            };
            let _ = self.lines[row].push_str(text);
        }
    }

    /// Get the content of a specific row
    pub fn get_line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    /// Get all lines as an iterator
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }

    /// Get number of rows
    pub const fn rows(&self) -> usize {
        SCREEN_ROWS
    }

    /// Get number of columns
    pub const fn cols(&self) -> usize {
        SCREEN_COLS
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line.as_str());
        }
        defmt::write!(f, "]");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_screen_is_empty() {
        let screen = Screen::new();
        assert_eq!(screen.rows(), SCREEN_ROWS);
        for line in screen.lines() {
            assert_eq!(line, "");
        }
    }

    #[test]
    fn test_set_and_get_line() {
        let mut screen = Screen::new();
        screen.set_line(2, "hello");
        assert_eq!(screen.get_line(2), Some("hello"));
        assert_eq!(screen.get_line(1), Some(""));
        assert_eq!(screen.get_line(SCREEN_ROWS), None);
    }

    #[test]
    fn test_set_line_out_of_range_is_ignored() {
        let mut screen = Screen::new();
        screen.set_line(SCREEN_ROWS, "nope");
        for line in screen.lines() {
            assert_eq!(line, "");
        }
    }

    #[test]
    fn test_overlong_line_is_truncated() {
        let mut screen = Screen::new();
        let long = [b'x'; LINE_LEN + 10];
        let long = core::str::from_utf8(&long).unwrap();
        screen.set_line(0, long);
        assert_eq!(screen.get_line(0).unwrap().len(), LINE_LEN);
    }

    #[test]
    fn test_clear_empties_all_rows() {
        let mut screen = Screen::new();
        screen.set_line(0, "a");
        screen.set_line(8, "b");
        screen.clear();
        for line in screen.lines() {
            assert_eq!(line, "");
        }
    }
}
