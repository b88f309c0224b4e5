//! In-memory todo collection and its mutation rules.
//!
//! # Design
//! `TodoStore` owns a `Vec<Todo>` in insertion order. Lookups are linear
//! scans; the collection is small and order matters more than lookup cost.
//!
//! New ids are `1 + max(existing ids)`, not a counter. Deleting the record
//! holding the highest id frees that id for the next create, and emptying the
//! collection restarts allocation at 1.
//!
//! The store takes no locks. Callers sharing it across tasks wrap it in a
//! lock and hold the write guard for mutations (see `crate::Db`).

use thiserror::Error;

use crate::model::{Todo, TodoPatch, DEFAULT_TITLE};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// No record carries the requested id.
    #[error("todo {0} not found")]
    NotFound(u64),

    /// Two seed records share an id.
    #[error("duplicate todo id {0}")]
    DuplicateId(u64),

    /// A seed record used 0 or an id above [`MAX_SEED_ID`].
    #[error("todo ids must be between 1 and {}", MAX_SEED_ID)]
    InvalidId,
}

/// Largest id a seed record may carry: the largest integer JSON clients
/// represent exactly. Allocation from here on adds 1 per create, so `u64`
/// cannot overflow in practice.
pub const MAX_SEED_ID: u64 = (1 << 53) - 1;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, Default)]
pub struct TodoStore {
    todos: Vec<Todo>,
}

impl TodoStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with the demo records served on startup.
    pub fn seeded() -> Self {
        Self {
            todos: vec![
                Todo::new(1, "Buy coffee", false),
                Todo::new(2, "Write blog", true),
            ],
        }
    }

    /// Build a store from existing records, keeping their order.
    pub fn from_todos(todos: Vec<Todo>) -> Result<Self> {
        for (i, todo) in todos.iter().enumerate() {
            if todo.id == 0 || todo.id > MAX_SEED_ID {
                return Err(StoreError::InvalidId);
            }
            if todos[..i].iter().any(|t| t.id == todo.id) {
                return Err(StoreError::DuplicateId(todo.id));
            }
        }
        Ok(Self { todos })
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Every record, in insertion order.
    pub fn list(&self) -> &[Todo] {
        &self.todos
    }

    pub fn get(&self, id: u64) -> Result<&Todo> {
        self.todos
            .iter()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    /// Append a new record. An absent or empty title becomes `"Untitled"`.
    pub fn create(&mut self, title: Option<String>) -> Todo {
        let title = title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());
        let todo = Todo::new(self.next_id(), title, false);
        self.todos.push(todo.clone());
        todo
    }

    /// Merge the fields present in `patch` into the record. The id never changes.
    pub fn update(&mut self, id: u64, patch: TodoPatch) -> Result<Todo> {
        let todo = self
            .todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;
        if let Some(title) = patch.title {
            todo.title = title;
        }
        if let Some(done) = patch.done {
            todo.done = done;
        }
        Ok(todo.clone())
    }

    pub fn delete(&mut self, id: u64) -> Result<()> {
        let index = self
            .todos
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;
        self.todos.remove(index);
        Ok(())
    }

    fn next_id(&self) -> u64 {
        self.todos.iter().map(|t| t.id).max().unwrap_or(0) + 1
    }
}
