//! Application orchestration layer for Booklog.

use booklog_core::{Book, BookId, Library, Settings};

mod form;
mod view;

pub use form::{BookForm, FormField};
pub use view::{BookCard, CardAction, EMPTY_PLACEHOLDER, LibraryView};

/// Input for a new record, already trimmed and coerced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub pages: u32,
    pub read: bool,
}

impl NewBook {
    pub fn new(title: &str, author: &str, pages: u32, read: bool) -> Self {
        Self {
            title: title.to_string(),
            author: author.to_string(),
            pages,
            read,
        }
    }
}

/// Every way the collection can change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(NewBook),
    Remove(BookId),
    ToggleRead(BookId),
}

pub fn sample_books() -> Vec<NewBook> {
    vec![
        NewBook::new("1984", "George Orwell", 328, true),
        NewBook::new("The Hobbit", "J.R.R. Tolkien", 310, false),
    ]
}

/// Owns the collection and the view built from it.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub settings: Settings,
    pub selected: usize,
    library: Library,
    view: LibraryView,
    render_generation: u64,
}

impl AppContext {
    pub fn new(mut settings: Settings) -> Self {
        settings.normalize();
        let library = Library::new(settings.id_source);
        let view = LibraryView::render(&library);
        Self {
            settings,
            selected: 0,
            library,
            view,
            render_generation: 1,
        }
    }

    pub fn with_samples(mut self) -> Self {
        self.seed_samples();
        self
    }

    pub fn seed_samples(&mut self) {
        for book in sample_books() {
            self.add(book);
        }
        tracing::info!(books = self.library.len(), "seeded sample books");
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn view(&self) -> &LibraryView {
        &self.view
    }

    /// Number of full re-renders so far, counting the initial one.
    pub fn render_generation(&self) -> u64 {
        self.render_generation
    }

    pub fn selected_card(&self) -> Option<&BookCard> {
        self.view.cards().get(self.selected)
    }

    pub fn select_next(&mut self) {
        let len = self.view.cards().len();
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Applies a command. Returns whether the collection changed; the view is
    /// rebuilt only when it did.
    pub fn dispatch(&mut self, command: Command) -> bool {
        match command {
            Command::Add(book) => self.add(book).is_some(),
            Command::Remove(id) => {
                let removed = self.library.remove_by_id(&id);
                if removed {
                    tracing::info!(%id, "removed book");
                    self.rerender();
                } else {
                    tracing::debug!(%id, "remove ignored, no such book");
                }
                removed
            }
            Command::ToggleRead(id) => {
                let toggled = self.library.toggle_read_by_id(&id);
                if toggled {
                    let read = self.library.get(&id).is_some_and(Book::is_read);
                    tracing::info!(%id, read, "toggled read flag");
                    self.rerender();
                } else {
                    tracing::debug!(%id, "toggle ignored, no such book");
                }
                toggled
            }
        }
    }

    pub fn add(&mut self, book: NewBook) -> Option<Book> {
        let Some(created) = self
            .library
            .add(&book.title, &book.author, book.pages, book.read)
            .cloned()
        else {
            tracing::debug!(title = %book.title, author = %book.author, "add ignored, blank field");
            return None;
        };
        tracing::info!(id = %created.id(), title = created.title(), "added book");
        self.rerender();
        Some(created)
    }

    fn rerender(&mut self) {
        self.view = LibraryView::render(&self.library);
        self.render_generation += 1;
        self.selected = self
            .selected
            .min(self.view.cards().len().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use booklog_core::IdSource;

    use super::*;

    fn context() -> AppContext {
        AppContext::new(Settings::default())
    }

    fn titles(ctx: &AppContext) -> Vec<String> {
        ctx.view().cards().iter().map(|c| c.title.clone()).collect()
    }

    #[test]
    fn new_context_starts_empty_and_rendered() {
        let ctx = context();
        assert!(ctx.library().is_empty());
        assert!(matches!(ctx.view(), LibraryView::Empty { .. }));
        assert_eq!(ctx.render_generation(), 1);
    }

    #[test]
    fn add_rerenders_once() {
        let mut ctx = context();
        let created = ctx.add(NewBook::new("Dune", "Frank Herbert", 412, false));
        assert!(created.is_some());
        assert_eq!(ctx.render_generation(), 2);
        assert_eq!(titles(&ctx), vec!["Dune".to_string()]);
    }

    #[test]
    fn failed_commands_do_not_rerender() {
        let mut ctx = context().with_samples();
        let generation = ctx.render_generation();
        let before = ctx.view().clone();

        assert!(!ctx.dispatch(Command::Add(NewBook::new(" ", "x", 1, false))));
        assert!(!ctx.dispatch(Command::Remove(BookId::from("missing"))));
        assert!(!ctx.dispatch(Command::ToggleRead(BookId::from("missing"))));

        assert_eq!(ctx.render_generation(), generation);
        assert_eq!(ctx.view(), &before);
        assert_eq!(ctx.library().len(), 2);
    }

    #[test]
    fn card_actions_dispatch_to_their_record() {
        let mut ctx = context().with_samples();
        let toggle = ctx.view().cards()[1].actions[0].command.clone();
        assert!(ctx.dispatch(toggle));
        assert_eq!(ctx.view().cards()[1].read_line, "Read: Yes");

        let remove = ctx.view().cards()[0].actions[1].command.clone();
        assert!(ctx.dispatch(remove));
        assert_eq!(titles(&ctx), vec!["The Hobbit".to_string()]);
    }

    #[test]
    fn sample_scenario() {
        let mut ctx = context();
        let orwell = ctx
            .add(NewBook::new("1984", "George Orwell", 328, true))
            .unwrap();
        let hobbit = ctx
            .add(NewBook::new("The Hobbit", "J.R.R. Tolkien", 310, false))
            .unwrap();
        assert_eq!(ctx.library().len(), 2);
        assert_eq!(
            titles(&ctx),
            vec!["1984".to_string(), "The Hobbit".to_string()]
        );

        assert!(ctx.dispatch(Command::ToggleRead(hobbit.id().clone())));
        assert!(ctx.library().get(hobbit.id()).unwrap().is_read());

        assert!(ctx.dispatch(Command::Remove(orwell.id().clone())));
        let remaining = ctx.library().books();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].title(), "The Hobbit");
        assert!(remaining[0].is_read());
    }

    #[test]
    fn view_tracks_collection_after_each_mutation() {
        let mut ctx = context();
        for n in 0..5 {
            ctx.add(NewBook::new(&format!("Book {n}"), "Author", n, false));
        }
        let third = ctx.library().books()[2].id().clone();
        ctx.dispatch(Command::Remove(third));

        let expected: Vec<String> = ctx
            .library()
            .books()
            .iter()
            .map(|b| b.title().to_string())
            .collect();
        assert_eq!(titles(&ctx), expected);
        assert_eq!(
            expected,
            vec!["Book 0", "Book 1", "Book 3", "Book 4"]
                .into_iter()
                .map(String::from)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn selection_clamps_after_removal() {
        let mut ctx = context().with_samples();
        ctx.select_next();
        assert_eq!(ctx.selected, 1);
        let id = ctx.selected_card().unwrap().id.clone();
        ctx.dispatch(Command::Remove(id));
        assert_eq!(ctx.selected, 0);
        ctx.select_next();
        assert_eq!(ctx.selected, 0);
    }

    #[test]
    fn context_uses_configured_id_source() {
        let settings = Settings {
            id_source: IdSource::Fallback,
            ..Settings::default()
        };
        let ctx = AppContext::new(settings).with_samples();
        assert_eq!(ctx.library().id_source(), IdSource::Fallback);
        assert!(ctx.library().books()[0].id().as_str().starts_with("id-"));
    }
}
