//! Text field editing for dialog inputs.
//!
//! Cursor positions count characters, not bytes, so file names in any
//! script edit correctly.

/// Editing operations on a `String` with a character cursor.
pub struct TextField;

impl TextField {
    /// Byte offset of character `cursor` (or the end)
    fn byte_index(input: &str, cursor: usize) -> usize {
        input
            .char_indices()
            .nth(cursor)
            .map(|(idx, _)| idx)
            .unwrap_or(input.len())
    }

    pub fn char_len(input: &str) -> usize {
        input.chars().count()
    }

    /// Delete the character before the cursor
    pub fn backspace(input: &mut String, cursor: &mut usize) {
        if *cursor > 0 {
            let idx = Self::byte_index(input, *cursor - 1);
            input.remove(idx);
            *cursor -= 1;
        }
    }

    /// Delete the character at the cursor
    pub fn delete(input: &mut String, cursor: usize) {
        if cursor < Self::char_len(input) {
            let idx = Self::byte_index(input, cursor);
            input.remove(idx);
        }
    }

    #[inline]
    pub fn left(cursor: &mut usize) {
        *cursor = cursor.saturating_sub(1);
    }

    #[inline]
    pub fn right(input: &str, cursor: &mut usize) {
        if *cursor < Self::char_len(input) {
            *cursor += 1;
        }
    }

    #[inline]
    pub fn home(cursor: &mut usize) {
        *cursor = 0;
    }

    #[inline]
    pub fn end(input: &str, cursor: &mut usize) {
        *cursor = Self::char_len(input);
    }

    /// Insert `c` at the cursor
    pub fn insert_char(input: &mut String, cursor: &mut usize, c: char) {
        let idx = Self::byte_index(input, *cursor);
        input.insert(idx, c);
        *cursor += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backspace() {
        let mut input = "hello".to_string();
        let mut cursor = 3;
        TextField::backspace(&mut input, &mut cursor);
        assert_eq!(input, "helo");
        assert_eq!(cursor, 2);
    }

    #[test]
    fn test_backspace_at_start() {
        let mut input = "hello".to_string();
        let mut cursor = 0;
        TextField::backspace(&mut input, &mut cursor);
        assert_eq!(input, "hello");
        assert_eq!(cursor, 0);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = "фаил".to_string();
        let mut cursor = 2;
        TextField::insert_char(&mut input, &mut cursor, 'й');
        assert_eq!(input, "файил");
        assert_eq!(cursor, 3);

        TextField::delete(&mut input, 3);
        assert_eq!(input, "файл");
        TextField::end(&input, &mut cursor);
        assert_eq!(cursor, 4);
        TextField::backspace(&mut input, &mut cursor);
        assert_eq!(input, "фай");
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let input = "ab".to_string();
        let mut cursor = 2;
        TextField::right(&input, &mut cursor);
        assert_eq!(cursor, 2);
        TextField::home(&mut cursor);
        TextField::left(&mut cursor);
        assert_eq!(cursor, 0);
    }
}
