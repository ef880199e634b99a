use booklog_core::parse_page_count;

use crate::NewBook;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Author,
    Pages,
    Read,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Title,
        FormField::Author,
        FormField::Pages,
        FormField::Read,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Author => "Author",
            FormField::Pages => "Pages",
            FormField::Read => "Read",
        }
    }

    fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Author,
            FormField::Author => FormField::Pages,
            FormField::Pages => FormField::Read,
            FormField::Read => FormField::Title,
        }
    }

    fn prev(self) -> Self {
        match self {
            FormField::Title => FormField::Read,
            FormField::Author => FormField::Title,
            FormField::Pages => FormField::Author,
            FormField::Read => FormField::Pages,
        }
    }
}

/// In-progress input for a new book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub pages: String,
    pub read: bool,
    pub focus: FormField,
}

impl Default for BookForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            pages: String::new(),
            read: false,
            focus: FormField::Title,
        }
    }
}

impl BookForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn toggle_read(&mut self) {
        self.read = !self.read;
    }

    /// Text of a field as shown in the dialog.
    pub fn value(&self, field: FormField) -> String {
        match field {
            FormField::Title => self.title.clone(),
            FormField::Author => self.author.clone(),
            FormField::Pages => self.pages.clone(),
            FormField::Read => {
                let mark = if self.read { "[x]" } else { "[ ]" };
                mark.to_string()
            }
        }
    }

    pub fn input_char(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        match self.focused_text_mut() {
            Some(buf) => buf.push(ch),
            None if ch == ' ' => self.toggle_read(),
            None => {}
        }
    }

    pub fn backspace(&mut self) {
        if let Some(buf) = self.focused_text_mut() {
            buf.pop();
        }
    }

    pub fn clear_field(&mut self) {
        match self.focused_text_mut() {
            Some(buf) => buf.clear(),
            None => self.read = false,
        }
    }

    /// Builds the book to add, or `None` when title or author is blank.
    pub fn submission(&self) -> Option<NewBook> {
        let title = self.title.trim();
        let author = self.author.trim();
        if title.is_empty() || author.is_empty() {
            return None;
        }
        Some(NewBook {
            title: title.to_string(),
            author: author.to_string(),
            pages: parse_page_count(&self.pages),
            read: self.read,
        })
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Title => Some(&mut self.title),
            FormField::Author => Some(&mut self.author),
            FormField::Pages => Some(&mut self.pages),
            FormField::Read => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(form: &mut BookForm, text: &str) {
        for ch in text.chars() {
            form.input_char(ch);
        }
    }

    #[test]
    fn typing_fills_focused_field() {
        let mut form = BookForm::default();
        type_str(&mut form, "Dune");
        form.focus_next();
        type_str(&mut form, "Frank Herbert");
        form.focus_next();
        type_str(&mut form, "412");
        form.focus_next();
        form.input_char(' ');

        assert_eq!(
            form.submission(),
            Some(NewBook {
                title: "Dune".to_string(),
                author: "Frank Herbert".to_string(),
                pages: 412,
                read: true,
            })
        );
    }

    #[test]
    fn blank_required_fields_reject_submission() {
        let mut form = BookForm::default();
        type_str(&mut form, "   ");
        form.focus_next();
        type_str(&mut form, "Someone");
        assert_eq!(form.submission(), None);

        form.focus_prev();
        type_str(&mut form, "Title");
        form.focus_next();
        form.clear_field();
        assert_eq!(form.submission(), None);
    }

    #[test]
    fn invalid_pages_become_zero() {
        let form = BookForm {
            title: "T".to_string(),
            author: "A".to_string(),
            pages: "lots".to_string(),
            ..BookForm::default()
        };
        assert_eq!(form.submission().map(|b| b.pages), Some(0));
    }

    #[test]
    fn focus_wraps_around() {
        let mut form = BookForm::default();
        form.focus_prev();
        assert_eq!(form.focus, FormField::Read);
        form.focus_next();
        assert_eq!(form.focus, FormField::Title);
    }

    #[test]
    fn backspace_and_reset() {
        let mut form = BookForm::default();
        type_str(&mut form, "Dun");
        form.backspace();
        assert_eq!(form.title, "Du");
        form.focus = FormField::Read;
        form.toggle_read();
        form.reset();
        assert_eq!(form, BookForm::default());
    }

    #[test]
    fn read_field_ignores_text() {
        let mut form = BookForm {
            focus: FormField::Read,
            ..BookForm::default()
        };
        form.input_char('x');
        form.backspace();
        assert!(!form.read);
        assert_eq!(form.value(FormField::Read), "[ ]");
        form.input_char(' ');
        assert_eq!(form.value(FormField::Read), "[x]");
    }
}
