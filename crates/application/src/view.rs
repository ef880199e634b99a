use booklog_core::{Book, BookId, Library};

use crate::Command;

pub const EMPTY_PLACEHOLDER: &str = "No books yet. Press \"n\" to add one.";

/// Snapshot of what the library screen shows. Always rebuilt whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryView {
    Empty { message: String },
    Cards(Vec<BookCard>),
}

impl LibraryView {
    pub fn render(library: &Library) -> Self {
        if library.is_empty() {
            return Self::Empty {
                message: EMPTY_PLACEHOLDER.to_string(),
            };
        }
        Self::Cards(library.books().iter().map(BookCard::from_book).collect())
    }

    pub fn cards(&self) -> &[BookCard] {
        match self {
            Self::Empty { .. } => &[],
            Self::Cards(cards) => cards,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookCard {
    pub id: BookId,
    pub title: String,
    pub author_line: String,
    pub pages_line: String,
    pub read_line: String,
    pub read: bool,
    pub actions: [CardAction; 2],
}

impl BookCard {
    fn from_book(book: &Book) -> Self {
        let id = book.id().clone();
        let toggle_label = if book.is_read() {
            "Mark unread"
        } else {
            "Mark read"
        };
        Self {
            title: book.title().to_string(),
            author_line: format!("Author: {}", book.author()),
            pages_line: format!("{} pages", book.pages()),
            read_line: format!("Read: {}", if book.is_read() { "Yes" } else { "No" }),
            read: book.is_read(),
            actions: [
                CardAction {
                    label: toggle_label.to_string(),
                    command: Command::ToggleRead(id.clone()),
                },
                CardAction {
                    label: "Remove".to_string(),
                    command: Command::Remove(id.clone()),
                },
            ],
            id,
        }
    }
}

/// A control on a card, bound to its record when the card was built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardAction {
    pub label: String,
    pub command: Command,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_library_renders_placeholder() {
        let view = LibraryView::render(&Library::default());
        assert_eq!(
            view,
            LibraryView::Empty {
                message: EMPTY_PLACEHOLDER.to_string()
            }
        );
        assert!(view.cards().is_empty());
    }

    #[test]
    fn cards_follow_collection_order() {
        let mut library = Library::default();
        library.add("1984", "George Orwell", 328, true);
        library.add("The Hobbit", "J.R.R. Tolkien", 310, false);

        let view = LibraryView::render(&library);
        let cards = view.cards();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].title, "1984");
        assert_eq!(cards[0].author_line, "Author: George Orwell");
        assert_eq!(cards[0].pages_line, "328 pages");
        assert_eq!(cards[0].read_line, "Read: Yes");
        assert_eq!(cards[1].title, "The Hobbit");
        assert_eq!(cards[1].read_line, "Read: No");
    }

    #[test]
    fn card_actions_are_bound_to_their_record() {
        let mut library = Library::default();
        let id = library.add("Dune", "Frank Herbert", 412, false).unwrap().id().clone();

        let view = LibraryView::render(&library);
        let card = &view.cards()[0];
        assert_eq!(card.id, id);
        assert_eq!(card.actions[0].label, "Mark read");
        assert_eq!(card.actions[0].command, Command::ToggleRead(id.clone()));
        assert_eq!(card.actions[1].label, "Remove");
        assert_eq!(card.actions[1].command, Command::Remove(id));
    }

    #[test]
    fn toggle_label_follows_read_flag() {
        let mut library = Library::default();
        library.add("Dune", "Frank Herbert", 412, true);
        let view = LibraryView::render(&library);
        assert_eq!(view.cards()[0].actions[0].label, "Mark unread");
    }

    #[test]
    fn render_is_idempotent() {
        let mut library = Library::default();
        library.add("Dune", "Frank Herbert", 412, true);
        assert_eq!(LibraryView::render(&library), LibraryView::render(&library));
    }
}
