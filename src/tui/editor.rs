use std::cmp::min;

/// Multi-line text buffer behind the studio's input panel.
///
/// Columns are counted in chars, never bytes.
pub struct Editor {
    lines: Vec<String>,
    row: usize,
    col: usize,
    scroll_top: usize,
}

impl Editor {
    pub fn new() -> Self {
        Self::from_text("")
    }

    pub fn from_text(text: &str) -> Self {
        let lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        let row = lines.len() - 1;
        let col = lines[row].chars().count();
        Self {
            lines,
            row,
            col,
            scroll_top: 0,
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    pub fn ensure_cursor_visible(&mut self, view_height: usize) {
        if view_height == 0 {
            self.scroll_top = 0;
        } else if self.row < self.scroll_top {
            self.scroll_top = self.row;
        } else if self.row >= self.scroll_top + view_height {
            self.scroll_top = self.row + 1 - view_height;
        }
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch == '\n' {
            self.insert_newline();
            return;
        }
        let at = self.byte_at(self.col);
        self.lines[self.row].insert(at, ch);
        self.col += 1;
    }

    /// Bracketed paste arrives as one string.
    pub fn insert_str(&mut self, text: &str) {
        let normalized = text.replace("\r\n", "\n");
        for ch in normalized.chars() {
            self.insert_char(ch);
        }
    }

    pub fn insert_newline(&mut self) {
        let at = self.byte_at(self.col);
        let tail = self.lines[self.row].split_off(at);
        self.row += 1;
        self.lines.insert(self.row, tail);
        self.col = 0;
    }

    pub fn backspace(&mut self) {
        if self.col > 0 {
            let end = self.byte_at(self.col);
            let start = self.byte_at(self.col - 1);
            self.lines[self.row].drain(start..end);
            self.col -= 1;
        } else if self.row > 0 {
            let line = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.line_len(self.row);
            self.lines[self.row].push_str(&line);
        }
    }

    pub fn delete(&mut self) {
        if self.col < self.line_len(self.row) {
            let start = self.byte_at(self.col);
            let end = self.byte_at(self.col + 1);
            self.lines[self.row].drain(start..end);
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&next);
        }
    }

    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.line_len(self.row);
        }
    }

    pub fn move_right(&mut self) {
        if self.col < self.line_len(self.row) {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.col = min(self.col, self.line_len(self.row));
        }
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = min(self.col, self.line_len(self.row));
        }
    }

    pub fn move_home(&mut self) {
        self.col = 0;
    }

    pub fn move_end(&mut self) {
        self.col = self.line_len(self.row);
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map_or(0, |line| line.chars().count())
    }

    fn byte_at(&self, col: usize) -> usize {
        let line = &self.lines[self.row];
        line.char_indices()
            .nth(col)
            .map_or(line.len(), |(idx, _)| idx)
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}
