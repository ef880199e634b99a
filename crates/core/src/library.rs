use crate::id::{BookId, IdSource};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    id: BookId,
    title: String,
    author: String,
    pages: u32,
    read: bool,
}

impl Book {
    pub fn id(&self) -> &BookId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn pages(&self) -> u32 {
        self.pages
    }

    pub fn is_read(&self) -> bool {
        self.read
    }

    fn toggle_read(&mut self) {
        self.read = !self.read;
    }
}

/// Insertion-ordered collection of book records.
///
/// Records are created only by [`Library::add`], changed only by
/// [`Library::toggle_read_by_id`] and dropped only by [`Library::remove_by_id`].
#[derive(Debug, Clone, Default)]
pub struct Library {
    books: Vec<Book>,
    id_source: IdSource,
}

impl Library {
    pub fn new(id_source: IdSource) -> Self {
        Self {
            books: Vec::new(),
            id_source,
        }
    }

    pub fn id_source(&self) -> IdSource {
        self.id_source
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn read_count(&self) -> usize {
        self.books.iter().filter(|b| b.read).count()
    }

    pub fn get(&self, id: &BookId) -> Option<&Book> {
        self.books.iter().find(|b| &b.id == id)
    }

    /// Appends a new record. Returns `None` without touching the collection
    /// when the trimmed title or author is empty.
    pub fn add(&mut self, title: &str, author: &str, pages: u32, read: bool) -> Option<&Book> {
        let title = title.trim();
        let author = author.trim();
        if title.is_empty() || author.is_empty() {
            return None;
        }

        let id = self.fresh_id();
        self.books.push(Book {
            id,
            title: title.to_string(),
            author: author.to_string(),
            pages,
            read,
        });
        self.books.last()
    }

    pub fn remove_by_id(&mut self, id: &BookId) -> bool {
        let Some(index) = self.books.iter().position(|b| &b.id == id) else {
            return false;
        };
        self.books.remove(index);
        true
    }

    pub fn toggle_read_by_id(&mut self, id: &BookId) -> bool {
        match self.books.iter_mut().find(|b| &b.id == id) {
            Some(book) => {
                book.toggle_read();
                true
            }
            None => false,
        }
    }

    fn fresh_id(&self) -> BookId {
        loop {
            let id = self.id_source.generate();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}
