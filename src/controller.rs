//! Row Actions
//!
//! Async glue between a row's editor, the row service and the cache.
//! Each action checks its preconditions synchronously, awaits at most one
//! service call, and patches the cache only after that call succeeded.

use crate::cache::RowCache;
use crate::commands::{RowService, ServiceError};
use crate::editor::{CommitRequest, DeleteRequest, RowEditor};
use crate::models::RowId;
use crate::store::StateCell;

/// Fetch the whole tree and replace the cached one
pub async fn refetch<S, C>(service: &S, cache: &C)
where
    S: RowService + ?Sized,
    C: StateCell<RowCache>,
{
    cache.write_with(RowCache::begin_refetch);
    let result = service.list().await.map_err(|e| e.to_string());
    cache.write_with(|c| c.finish_refetch(result));
}

/// Append a draft child under the editor's row if nothing forbids it
pub fn add_child<C, E>(cache: &C, editor: &E) -> bool
where
    C: StateCell<RowCache>,
    E: StateCell<RowEditor>,
{
    let draft_exists = cache.read_with(RowCache::has_draft).unwrap_or(true);
    let Some(parent) = editor
        .read_with(|e| e.can_add_child(draft_exists).then(|| e.row_id()))
        .flatten()
    else {
        log::debug!("add child refused");
        return false;
    };
    cache.write_with(|c| c.insert_draft(parent)).unwrap_or(false)
}

/// Send the buffered values; create for a draft, update otherwise.
///
/// Returns whether the row was saved. A blocked commit (blank name, row
/// busy, not editing) makes no call at all.
pub async fn commit_row<S, C, E>(service: &S, cache: &C, editor: &E) -> bool
where
    S: RowService + ?Sized,
    C: StateCell<RowCache>,
    E: StateCell<RowEditor>,
{
    let Some(request) = editor.write_with(RowEditor::begin_commit).flatten() else {
        return false;
    };

    let reply = match &request {
        CommitRequest::Create(body) => service.create(body).await,
        CommitRequest::Update(id, body) => service.update(*id, body).await,
    };

    match reply.and_then(|response| response.into_saved()) {
        Ok((saved, changed)) => {
            log::info!("saved row {} ({})", saved.id, saved.row_name);
            editor.write_with(|e| e.finish_commit(Ok(&saved)));
            cache.write_with(|c| c.apply_saved(request.target(), saved, &changed));
            true
        }
        Err(err) => {
            log_failure("save", request.target(), &err);
            editor.write_with(|e| e.finish_commit(Err(&err)));
            false
        }
    }
}

/// Delete the editor's row. The draft is dropped locally; a saved row is
/// removed from the cache only once the service confirmed it.
pub async fn delete_row<S, C, E>(service: &S, cache: &C, editor: &E) -> bool
where
    S: RowService + ?Sized,
    C: StateCell<RowCache>,
    E: StateCell<RowEditor>,
{
    let Some(request) = editor.write_with(RowEditor::begin_delete).flatten() else {
        return false;
    };

    match request {
        DeleteRequest::Discard => cache.write_with(RowCache::discard_draft).unwrap_or(false),
        DeleteRequest::Remote(id) => match service.delete(id).await {
            Ok(response) => {
                log::info!("deleted row {}", id);
                editor.write_with(|e| e.finish_delete(Ok(())));
                cache.write_with(|c| c.apply_deleted(id, &response.changed));
                true
            }
            Err(err) => {
                log_failure("delete", id, &err);
                editor.write_with(|e| e.finish_delete(Err(&err)));
                false
            }
        },
    }
}

fn log_failure(action: &str, id: RowId, err: &ServiceError) {
    log::error!("failed to {} row {}: {}", action, id, err);
}
