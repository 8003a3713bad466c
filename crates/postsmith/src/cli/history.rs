//! History command handlers.

use super::HistoryCommands;
use super::render::{render_history, render_saved};
use postsmith_core::SavedPost;
use postsmith_error::{OutputError, PostsmithResult, StorageError, StorageErrorKind};
use postsmith_storage::PostRepository;
use std::io::Write;
use uuid::Uuid;

/// Handle history commands on behalf of `owner`.
///
/// Records owned by someone else are reported as not found.
pub async fn handle_history_command(
    cmd: HistoryCommands,
    repo: &dyn PostRepository,
    owner: &str,
    out: &mut impl Write,
) -> PostsmithResult<()> {
    match cmd {
        HistoryCommands::List { format } => {
            let records = repo.list(owner).await?;
            render_history(&records, format, out)
        }

        HistoryCommands::Show { id, format } => {
            let record = owned(repo, owner, id).await?;
            render_saved(&record, format, out)
        }

        HistoryCommands::Edit { id, title, caption } => {
            let record = owned(repo, owner, id).await?;
            let mut content = record.content;
            if let Some(title) = title {
                content.title = title;
            }
            if let Some(caption) = caption {
                content.caption = caption;
            }
            let updated = repo.update(id, &content).await?;
            tracing::info!(id = %updated.id, "Saved post edited");
            writeln!(out, "Updated {}", updated.id)
                .map_err(|e| OutputError::new("stdout", e.to_string()))?;
            Ok(())
        }

        HistoryCommands::Delete { id } => {
            owned(repo, owner, id).await?;
            repo.delete(id).await?;
            tracing::info!(id = %id, "Saved post deleted");
            writeln!(out, "Deleted {}", id)
                .map_err(|e| OutputError::new("stdout", e.to_string()))?;
            Ok(())
        }
    }
}

async fn owned(repo: &dyn PostRepository, owner: &str, id: Uuid) -> PostsmithResult<SavedPost> {
    let record = repo.get(id).await?;
    if record.owner != owner {
        return Err(StorageError::new(StorageErrorKind::NotFound(id.to_string())).into());
    }
    Ok(record)
}
