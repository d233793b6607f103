//! Collection that remembers what changed since it was loaded.

/// A list of owned child records that tracks additions and removals relative
/// to the items it was loaded with.
///
/// Repositories persist only the diff: `new_items` are inserted,
/// `removed_items` are deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchedList<T> {
    current: Vec<T>,
    initial: Vec<T>,
    new: Vec<T>,
    removed: Vec<T>,
}

impl<T: Clone + PartialEq> WatchedList<T> {
    /// Creates a list whose initial contents are considered already persisted.
    pub fn new(initial: Vec<T>) -> Self {
        Self {
            current: initial.clone(),
            initial,
            new: Vec::new(),
            removed: Vec::new(),
        }
    }

    /// Returns the current items.
    pub fn items(&self) -> &[T] {
        &self.current
    }

    /// Returns the items added since load.
    pub fn new_items(&self) -> &[T] {
        &self.new
    }

    /// Returns the items removed since load.
    pub fn removed_items(&self) -> &[T] {
        &self.removed
    }

    /// Returns true if the item is currently in the list.
    pub fn exists(&self, item: &T) -> bool {
        self.current.contains(item)
    }

    /// Returns true if there is anything to persist.
    pub fn has_changes(&self) -> bool {
        !self.new.is_empty() || !self.removed.is_empty()
    }

    /// Adds an item. Re-adding a previously removed initial item cancels the removal.
    pub fn add(&mut self, item: T) {
        if self.exists(&item) {
            return;
        }

        if let Some(pos) = self.removed.iter().position(|r| r == &item) {
            self.removed.remove(pos);
        } else if !self.initial.contains(&item) {
            self.new.push(item.clone());
        }

        self.current.push(item);
    }

    /// Removes an item. Removing a freshly added item simply forgets it.
    pub fn remove(&mut self, item: &T) {
        let Some(pos) = self.current.iter().position(|c| c == item) else {
            return;
        };
        let removed = self.current.remove(pos);

        if let Some(pos) = self.new.iter().position(|n| n == item) {
            self.new.remove(pos);
        } else if self.initial.contains(item) {
            self.removed.push(removed);
        }
    }

    /// Replaces the whole contents, recording the difference.
    pub fn update(&mut self, items: Vec<T>) {
        let to_remove: Vec<T> = self
            .current
            .iter()
            .filter(|c| !items.contains(c))
            .cloned()
            .collect();
        for item in &to_remove {
            self.remove(item);
        }
        for item in items {
            self.add(item);
        }
    }

    /// Marks the current contents as persisted.
    pub fn commit(&mut self) {
        self.initial = self.current.clone();
        self.new.clear();
        self.removed.clear();
    }
}

impl<T: Clone + PartialEq> Default for WatchedList<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
