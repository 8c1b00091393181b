//! Ordered, mutable row containers backing table views.
//!
//! A [`TableModel`] owns the authoritative display order of its rows. A view
//! binding issues index-addressed move/delete operations and then re-reads
//! the rows (pull-based refresh); nothing outside this module splices the
//! backing sequence directly. Selection state stays in the view — move
//! operations return the row's new index so the view can re-select it.

/// Behavior of `move_up`/`move_down` at the ends of the sequence.
///
/// `Saturate` is the default: moving past the end is a no-op. `Wrap`
/// preserves the legacy behavior where moving the first row up rotates it to
/// the end of the table (and the last row down to the front).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryPolicy {
    #[default]
    Saturate,
    Wrap,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableModel<R> {
    rows: Vec<R>,
    policy: BoundaryPolicy,
}

impl<R> TableModel<R> {
    pub fn new(policy: BoundaryPolicy) -> TableModel<R> {
        TableModel {
            rows: Vec::new(),
            policy,
        }
    }

    pub fn from_rows(rows: Vec<R>, policy: BoundaryPolicy) -> TableModel<R> {
        TableModel { rows, policy }
    }

    /// Rebuild: discard the current sequence and adopt a fresh one.
    /// Mutations made through move/delete do not survive this.
    pub fn replace_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&R> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.rows.iter()
    }

    pub fn policy(&self) -> BoundaryPolicy {
        self.policy
    }

    /// Move the row at `index` one position up. Returns the row's new index,
    /// or `None` when `index` is out of range (nothing changes).
    pub fn move_up(&mut self, index: usize) -> Option<usize> {
        if index >= self.rows.len() {
            return None;
        }
        if index == 0 {
            return match self.policy {
                BoundaryPolicy::Saturate => Some(0),
                BoundaryPolicy::Wrap => {
                    self.rows.rotate_left(1);
                    Some(self.rows.len() - 1)
                }
            };
        }
        self.rows.swap(index, index - 1);
        Some(index - 1)
    }

    /// Move the row at `index` one position down. Mirror of [`move_up`](Self::move_up).
    pub fn move_down(&mut self, index: usize) -> Option<usize> {
        if index >= self.rows.len() {
            return None;
        }
        if index == self.rows.len() - 1 {
            return match self.policy {
                BoundaryPolicy::Saturate => Some(index),
                BoundaryPolicy::Wrap => {
                    self.rows.rotate_right(1);
                    Some(0)
                }
            };
        }
        self.rows.swap(index, index + 1);
        Some(index + 1)
    }

    /// Delete the row at `index`. `None` models "no selection" and is a
    /// no-op, as is an out-of-range index. Returns whether a row was removed.
    pub fn delete_at(&mut self, index: Option<usize>) -> bool {
        match index {
            Some(i) if i < self.rows.len() => {
                self.rows.remove(i);
                true
            }
            _ => false,
        }
    }
}

impl<'a, R> IntoIterator for &'a TableModel<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
