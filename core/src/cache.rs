//! Client-side mirror of the server's todo set for the active session.
//!
//! The cache is never authoritative; it only applies the outcome of requests
//! that already succeeded. It holds at most one entry per id and keeps
//! insertion order.

use crate::types::Todo;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoCache {
    todos: Vec<Todo>,
}

impl TodoCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace everything with a freshly fetched list. Repeated ids keep
    /// their first occurrence.
    pub fn replace_all(&mut self, todos: Vec<Todo>) {
        self.todos.clear();
        for todo in todos {
            if self.position(&todo.id).is_none() {
                self.todos.push(todo);
            }
        }
    }

    /// Add a newly created todo at the end; an id already present is
    /// overwritten in place instead.
    pub fn append(&mut self, todo: Todo) {
        match self.position(&todo.id) {
            Some(index) => self.todos[index] = todo,
            None => self.todos.push(todo),
        }
    }

    /// Merge the server's copy into the matching entry. Returns false when no
    /// entry has that id, or when the server answered for a different id.
    pub fn merge(&mut self, id: &str, server: Todo) -> bool {
        if server.id != id {
            tracing::warn!(id, returned = %server.id, "server returned a different todo id");
            return false;
        }
        match self.position(id) {
            Some(index) => {
                self.todos[index].merge(server);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<Todo> {
        self.position(id).map(|index| self.todos.remove(index))
    }

    pub fn clear(&mut self) {
        self.todos.clear();
    }

    pub fn get(&self, id: &str) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.todos.iter().position(|todo| todo.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(id: &str) -> Todo {
        Todo {
            id: id.to_string(),
            title: format!("todo {id}"),
            description: None,
            completed: false,
            user_id: String::new(),
            created_at: None,
            updated_at: None,
        }
    }

    fn ids(cache: &TodoCache) -> Vec<&str> {
        cache.todos().iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn remove_preserves_order() {
        let mut cache = TodoCache::new();
        cache.replace_all(vec![todo("1"), todo("2"), todo("3")]);

        assert!(cache.remove("2").is_some());

        assert_eq!(ids(&cache), ["1", "3"]);
    }

    #[test]
    fn replace_all_drops_duplicate_ids() {
        let mut cache = TodoCache::new();
        let mut dup = todo("1");
        dup.title = "second".to_string();
        cache.replace_all(vec![todo("1"), todo("2"), dup]);

        assert_eq!(ids(&cache), ["1", "2"]);
        assert_eq!(cache.get("1").unwrap().title, "todo 1");
    }

    #[test]
    fn append_existing_id_replaces_in_place() {
        let mut cache = TodoCache::new();
        cache.replace_all(vec![todo("1"), todo("2")]);
        let mut again = todo("1");
        again.completed = true;

        cache.append(again);

        assert_eq!(ids(&cache), ["1", "2"]);
        assert!(cache.get("1").unwrap().completed);
    }

    #[test]
    fn merge_unknown_id_changes_nothing() {
        let mut cache = TodoCache::new();
        cache.replace_all(vec![todo("1")]);
        let before = cache.clone();

        assert!(!cache.merge("9", todo("9")));
        assert_eq!(cache, before);
    }

    #[test]
    fn merge_with_mismatched_id_changes_nothing() {
        let mut cache = TodoCache::new();
        cache.replace_all(vec![todo("1"), todo("2")]);
        let before = cache.clone();
        let mut other = todo("2");
        other.title = "renamed".to_string();

        assert!(!cache.merge("1", other));

        assert_eq!(ids(&cache), ["1", "2"]);
        assert_eq!(cache, before);
    }
}
