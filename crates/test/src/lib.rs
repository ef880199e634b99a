//! Test helpers and fixtures.

use booklog_application::{AppContext, NewBook};
use booklog_core::{IdSource, Settings, Theme};

pub fn make_settings(id_source: IdSource) -> Settings {
    Settings {
        theme: Theme::Dark,
        seed_samples: false,
        id_source,
        log_level: "info".to_string(),
    }
}

/// Context holding `count` unread books titled `Book 0..count`.
pub fn context_with_books(count: u32) -> AppContext {
    let mut ctx = AppContext::new(make_settings(IdSource::Uuid));
    for n in 0..count {
        ctx.add(NewBook::new(&format!("Book {n}"), "Author", n * 10, false));
    }
    ctx
}

#[cfg(test)]
mod tests {
    use booklog_application::Command;

    use super::*;

    #[test]
    fn builds_settings() {
        let settings = make_settings(IdSource::Fallback);
        assert_eq!(settings.id_source, IdSource::Fallback);
        assert!(!settings.seed_samples);
    }

    #[test]
    fn builds_context_with_books() {
        let ctx = context_with_books(3);
        assert_eq!(ctx.library().len(), 3);
        assert_eq!(ctx.view().cards().len(), 3);
        assert_eq!(ctx.library().books()[2].pages(), 20);
    }

    #[test]
    fn removing_every_book_shows_placeholder() {
        let mut ctx = context_with_books(4);
        let ids: Vec<_> = ctx.library().books().iter().map(|b| b.id().clone()).collect();
        for id in ids {
            assert!(ctx.dispatch(Command::Remove(id)));
        }
        assert!(ctx.library().is_empty());
        assert_eq!(
            ctx.view(),
            &booklog_application::LibraryView::Empty {
                message: booklog_application::EMPTY_PLACEHOLDER.to_string()
            }
        );
        assert_eq!(ctx.render_generation(), 1 + 4 + 4);
    }
}
