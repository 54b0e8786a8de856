//! In-memory collection of notes.

use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{Result, TallyError};
use crate::note::{Note, NoteId};

/// Notes keyed by id. Clones share the same underlying map (DashMap is
/// wrapped in an Arc), so a notebook can be handed to worker threads that
/// evaluate different notes concurrently.
#[derive(Clone, Default)]
pub struct Notebook {
    notes: Arc<DashMap<NoteId, Note>>,
    next_id: Arc<AtomicU64>,
}

impl Notebook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a notebook from existing notes. Ids are kept; new ids continue
    /// after the largest one.
    pub fn from_notes(notes: impl IntoIterator<Item = Note>) -> Self {
        let notebook = Self::new();
        let mut max_id = 0;
        for note in notes {
            max_id = max_id.max(note.id);
            notebook.notes.insert(note.id, note);
        }
        notebook.next_id.store(max_id, Ordering::SeqCst);
        notebook
    }

    pub fn create(&self, title: impl Into<String>, content: impl Into<String>) -> Note {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let note = Note::new(id, title, content);
        self.notes.insert(id, note.clone());
        note
    }

    pub fn get(&self, id: NoteId) -> Option<Note> {
        self.notes.get(&id).map(|n| n.clone())
    }

    pub fn update_content(&self, id: NoteId, content: impl Into<String>) -> Result<Note> {
        let mut note = self.notes.get_mut(&id).ok_or(TallyError::NoteNotFound(id))?;
        note.set_content(content);
        Ok(note.clone())
    }

    pub fn rename(&self, id: NoteId, title: impl Into<String>) -> Result<Note> {
        let mut note = self.notes.get_mut(&id).ok_or(TallyError::NoteNotFound(id))?;
        note.set_title(title);
        Ok(note.clone())
    }

    pub fn delete(&self, id: NoteId) -> Result<Note> {
        self.notes
            .remove(&id)
            .map(|(_, note)| note)
            .ok_or(TallyError::NoteNotFound(id))
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// All notes, most recently updated first.
    pub fn list(&self) -> Vec<Note> {
        let mut notes: Vec<Note> = self.notes.iter().map(|n| n.clone()).collect();
        notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(a.id.cmp(&b.id)));
        notes
    }

    /// Notes whose title or content contains `term`, ignoring case.
    pub fn search(&self, term: &str) -> Vec<Note> {
        self.list().into_iter().filter(|n| n.matches(term)).collect()
    }

    pub fn with_tag(&self, tag: &str) -> Vec<Note> {
        self.list().into_iter().filter(|n| n.has_tag(tag)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_assigns_increasing_ids() {
        let notebook = Notebook::new();
        let a = notebook.create("a", "");
        let b = notebook.create("b", "");
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(notebook.len(), 2);
    }

    #[test]
    fn test_update_and_delete() {
        let notebook = Notebook::new();
        let note = notebook.create("a", "= 1");
        let updated = notebook.update_content(note.id, "= 2").unwrap();
        assert_eq!(updated.content, "= 2");
        assert_eq!(notebook.get(note.id).unwrap().content, "= 2");

        notebook.delete(note.id).unwrap();
        assert!(notebook.get(note.id).is_none());
        assert!(matches!(
            notebook.delete(note.id),
            Err(TallyError::NoteNotFound(_))
        ));
    }

    #[test]
    fn test_search() {
        let notebook = Notebook::new();
        notebook.create("Daily Expenses", "Coffee: 3.50");
        notebook.create("Budget", "Rent: 1500");
        let found = notebook.search("coffee");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Daily Expenses");
        assert_eq!(notebook.search("").len(), 2);
    }

    #[test]
    fn test_from_notes_continues_ids() {
        let notebook = Notebook::from_notes(crate::samples::samples());
        let note = notebook.create("new", "");
        assert_eq!(note.id, 5);
        assert_eq!(notebook.with_tag("tax").len(), 1);
    }

    #[test]
    fn test_clones_share_notes() {
        let notebook = Notebook::new();
        let other = notebook.clone();
        other.create("shared", "");
        assert_eq!(notebook.len(), 1);
    }
}
