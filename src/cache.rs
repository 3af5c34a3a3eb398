//! Row Cache
//!
//! The last fetched row tree plus the single optional draft row.
//!
//! Published rows are never mutated in place: every change clones the
//! tree, runs the reconciler on the clone and swaps it in, bumping
//! `revision` so readers can tell snapshots apart.

use row_tree::{find, find_delete, find_insert_child, find_mut, find_replace};

use crate::models::{Row, RowId, DRAFT_ROW_ID};

/// Outcome of the most recent list request
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadStatus {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

/// What a reader should show
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CacheView<'a> {
    /// Nothing fetched yet
    Loading,
    /// Nothing fetched, and the last attempt failed
    Failed(&'a str),
    /// Rows to show; `stale_error` is set when a later refetch failed
    Ready {
        rows: &'a [Row],
        stale_error: Option<&'a str>,
    },
}

#[derive(Debug, Clone, Default)]
pub struct RowCache {
    status: LoadStatus,
    rows: Option<Vec<Row>>,
    revision: u64,
    /// Parent of the draft row, while one exists
    draft_parent: Option<RowId>,
}

impl RowCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> CacheView<'_> {
        match (&self.rows, &self.status) {
            (Some(rows), LoadStatus::Failed(msg)) => CacheView::Ready {
                rows,
                stale_error: Some(msg),
            },
            (Some(rows), _) => CacheView::Ready { rows, stale_error: None },
            (None, LoadStatus::Failed(msg)) => CacheView::Failed(msg),
            (None, _) => CacheView::Loading,
        }
    }

    /// Current rows; empty before the first successful load
    pub fn rows(&self) -> &[Row] {
        self.rows.as_deref().unwrap_or(&[])
    }

    #[cfg(test)]
    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    #[cfg(test)]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn has_draft(&self) -> bool {
        self.draft_parent.is_some()
    }

    #[cfg(test)]
    pub fn draft_parent(&self) -> Option<RowId> {
        self.draft_parent
    }

    pub fn find(&self, id: RowId) -> Option<&Row> {
        find(self.rows(), id)
    }

    /// Run `mutator` on a copy of the rows and publish the copy if it
    /// reports a change. Before the first load there is nothing to patch
    /// and the call is a no-op.
    pub fn patch<F>(&mut self, mutator: F) -> bool
    where
        F: FnOnce(&mut Vec<Row>) -> bool,
    {
        let Some(current) = &self.rows else {
            log::debug!("patch ignored: rows not loaded");
            return false;
        };
        let mut draft = current.clone();
        if !mutator(&mut draft) {
            return false;
        }
        self.rows = Some(draft);
        self.revision += 1;
        log::trace!("rows patched, revision {}", self.revision);
        true
    }

    /// Mark a list request as started; shown rows stay in place
    pub fn begin_refetch(&mut self) {
        if self.rows.is_none() {
            self.status = LoadStatus::Loading;
            self.revision += 1;
        }
    }

    /// Success replaces the whole tree (dropping any draft); failure keeps
    /// the previous rows and records the error.
    pub fn finish_refetch(&mut self, result: Result<Vec<Row>, String>) {
        match result {
            Ok(rows) => {
                log::info!("loaded {} top-level rows", rows.len());
                self.rows = Some(rows);
                self.status = LoadStatus::Ready;
                self.draft_parent = None;
            }
            Err(msg) => {
                log::error!("failed to load rows: {}", msg);
                self.status = LoadStatus::Failed(msg);
            }
        }
        self.revision += 1;
    }

    /// Append an empty draft row under `parent`.
    ///
    /// Refused while another draft exists or when `parent` is not in the tree.
    pub fn insert_draft(&mut self, parent: RowId) -> bool {
        if let Some(existing) = self.draft_parent {
            log::debug!(
                "draft under {} still open, not adding under {}",
                existing, parent
            );
            return false;
        }
        if parent == DRAFT_ROW_ID {
            return false;
        }
        let inserted = self.patch(|rows| find_insert_child(rows, parent, Row::draft(parent)));
        if inserted {
            self.draft_parent = Some(parent);
        } else {
            log::warn!("cannot add child: row {} not found", parent);
        }
        inserted
    }

    /// Drop the draft row without contacting the service
    pub fn discard_draft(&mut self) -> bool {
        self.draft_parent = None;
        let removed = self.patch(|rows| find_delete(rows, DRAFT_ROW_ID));
        if removed {
            log::debug!("draft discarded");
        }
        removed
    }

    /// Put a saved row in place of `target` (the draft or the row's own id),
    /// then refresh the values of any other rows the server recalculated.
    pub fn apply_saved(&mut self, target: RowId, current: Row, changed: &[Row]) -> bool {
        let saved_id = current.id;
        let applied = self.patch(|rows| {
            let mut touched = find_replace(rows, target, current);
            touched |= apply_changed(rows, changed, saved_id);
            touched
        });
        if target == DRAFT_ROW_ID {
            self.draft_parent = None;
        }
        self.sync_draft_slot();
        if !applied {
            log::warn!("saved row {} had no place in the tree", target);
        }
        applied
    }

    /// Remove `id` and its subtree after a confirmed delete
    pub fn apply_deleted(&mut self, id: RowId, changed: &[Row]) -> bool {
        let removed = self.patch(|rows| {
            let removed = find_delete(rows, id);
            removed | apply_changed(rows, changed, id)
        });
        self.sync_draft_slot();
        if !removed {
            log::warn!("deleted row {} was not in the tree", id);
        }
        removed
    }

    /// Free the draft slot when the draft left the tree along with a
    /// replaced or removed subtree
    fn sync_draft_slot(&mut self) {
        if self.draft_parent.is_some() && self.find(DRAFT_ROW_ID).is_none() {
            log::debug!("draft dropped with its subtree");
            self.draft_parent = None;
        }
    }
}

/// Copy server-recalculated values onto matching rows, keeping their
/// children and skipping `skip` (the row the reply is about).
fn apply_changed(rows: &mut [Row], changed: &[Row], skip: RowId) -> bool {
    let mut touched = false;
    for update in changed.iter().filter(|row| row.id != skip) {
        if let Some(row) = find_mut(rows, update.id) {
            row.copy_values_from(update);
            touched = true;
        }
    }
    touched
}
