/// Single-line editable field with a character cursor
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    content: String,
    cursor_index: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a character at the cursor
    pub fn add_char(&mut self, character: char) {
        let insert_index = char_to_byte_index(&self.content, self.cursor_index);
        self.content.insert(insert_index, character);
        self.cursor_index = self.cursor_index.saturating_add(1);
    }

    /// Inserts pasted text at the cursor, flattening line breaks to spaces
    pub fn insert_str(&mut self, text: &str) {
        for character in text.chars() {
            match character {
                '\r' => {}
                '\n' | '\t' => self.add_char(' '),
                other => self.add_char(other),
            }
        }
    }

    /// Removes the character before the cursor (backspace)
    pub fn remove_char(&mut self) {
        if self.cursor_index == 0 {
            return;
        }
        let end_index = char_to_byte_index(&self.content, self.cursor_index);
        let start_index = char_to_byte_index(&self.content, self.cursor_index - 1);
        if start_index < end_index {
            self.content.replace_range(start_index..end_index, "");
            self.cursor_index -= 1;
        }
    }

    /// Removes the character at the cursor (delete)
    pub fn delete_char(&mut self) {
        if self.cursor_index >= self.char_count() {
            return;
        }
        let start_index = char_to_byte_index(&self.content, self.cursor_index);
        let end_index = char_to_byte_index(&self.content, self.cursor_index + 1);
        self.content.replace_range(start_index..end_index, "");
    }

    pub fn move_left(&mut self) {
        self.cursor_index = self.cursor_index.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor_index < self.char_count() {
            self.cursor_index += 1;
        }
    }

    pub fn move_to_start(&mut self) {
        self.cursor_index = 0;
    }

    pub fn move_to_end(&mut self) {
        self.cursor_index = self.char_count();
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Cursor position in characters
    pub fn cursor_position(&self) -> usize {
        self.cursor_index
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor_index = 0;
    }

    fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}

fn char_to_byte_index(value: &str, char_index: usize) -> usize {
    value
        .char_indices()
        .nth(char_index)
        .map_or_else(|| value.len(), |(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> TextInput {
        let mut input = TextInput::new();
        text.chars().for_each(|c| input.add_char(c));
        input
    }

    #[test]
    fn test_insert_in_middle() {
        let mut input = typed("Jon");
        input.move_left();
        input.add_char('h');
        assert_eq!(input.content(), "John");
        assert_eq!(input.cursor_position(), 3);
    }

    #[test]
    fn test_backspace_and_delete_multibyte() {
        let mut input = typed("Zoë!");
        input.remove_char();
        assert_eq!(input.content(), "Zoë");
        input.move_to_start();
        input.delete_char();
        assert_eq!(input.content(), "oë");
        input.move_to_end();
        input.delete_char();
        assert_eq!(input.content(), "oë");
        assert_eq!(input.cursor_position(), 2);
    }

    #[test]
    fn test_paste_flattens_newlines() {
        let mut input = TextInput::new();
        input.insert_str("met for coffee\r\ntalked about X");
        assert_eq!(input.content(), "met for coffee talked about X");
    }

    #[test]
    fn test_multiline_paste_lands_at_cursor() {
        let mut input = typed("Pritha: ");
        input.insert_str("roadmap\nbudget");
        assert_eq!(input.content(), "Pritha: roadmap budget");
        assert_eq!(input.cursor_position(), 22);
    }

    #[test]
    fn test_clear_resets_cursor() {
        let mut input = typed("Pritha");
        input.clear();
        assert_eq!(input.content(), "");
        assert_eq!(input.cursor_position(), 0);
        input.remove_char();
        assert_eq!(input.cursor_position(), 0);
    }
}
