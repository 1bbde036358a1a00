//! File Repository Implementation
//!
//! PostgreSQL implementation of the FileRepository trait.
//! The root sentinel is stored as a NULL `parent_id`; insertion order is
//! the `seq` column.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{EntityId, FileEntry, FileKind, FileRepository, NewFileEntry, ParentRef};
use crate::shared::error::AppError;

const FILE_COLUMNS: &str = "id, user_id, name, kind, is_public, parent_id, local_path, created_at";

/// `parent_id` predicate for a listing; `$2` binds the folder id when present.
///
/// Plain predicates keep the `(user_id, parent_id, seq)` index usable.
fn parent_filter(parent: &ParentRef) -> &'static str {
    match parent {
        ParentRef::Root => "parent_id IS NULL",
        ParentRef::Folder(_) => "parent_id = $2",
    }
}

/// Database row representation of the files table.
#[derive(Debug, sqlx::FromRow)]
struct FileRow {
    id: EntityId,
    user_id: EntityId,
    name: String,
    kind: String,
    is_public: bool,
    parent_id: Option<EntityId>,
    local_path: Option<String>,
    created_at: DateTime<Utc>,
}

impl FileRow {
    fn into_entry(self) -> Result<FileEntry, AppError> {
        let kind = FileKind::parse(&self.kind).ok_or_else(|| {
            AppError::Internal(format!("file {} has unknown kind {:?}", self.id, self.kind))
        })?;

        Ok(FileEntry {
            id: self.id,
            user_id: self.user_id,
            name: self.name,
            kind,
            is_public: self.is_public,
            parent_id: ParentRef::from_option(self.parent_id),
            local_path: self.local_path,
            created_at: self.created_at,
        })
    }
}

/// PostgreSQL file repository implementation.
#[derive(Clone)]
pub struct PgFileRepository {
    pool: PgPool,
}

impl PgFileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileRepository for PgFileRepository {
    async fn insert(&self, entry: NewFileEntry) -> Result<FileEntry, AppError> {
        let sql = format!(
            r#"
            INSERT INTO files (id, user_id, name, kind, is_public, parent_id, local_path)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {FILE_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, FileRow>(&sql)
            .bind(EntityId::generate())
            .bind(entry.user_id)
            .bind(&entry.name)
            .bind(entry.kind.as_str())
            .bind(entry.is_public)
            .bind(entry.parent_id.as_option())
            .bind(&entry.local_path)
            .fetch_one(&self.pool)
            .await?;

        row.into_entry()
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<FileEntry>, AppError> {
        let sql = format!("SELECT {FILE_COLUMNS} FROM files WHERE id = $1");
        let row = sqlx::query_as::<_, FileRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(FileRow::into_entry).transpose()
    }

    async fn set_public(
        &self,
        id: EntityId,
        owner: EntityId,
        is_public: bool,
    ) -> Result<Option<FileEntry>, AppError> {
        let sql = format!(
            r#"
            UPDATE files
            SET is_public = $3
            WHERE id = $1 AND user_id = $2
            RETURNING {FILE_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, FileRow>(&sql)
            .bind(id)
            .bind(owner)
            .bind(is_public)
            .fetch_optional(&self.pool)
            .await?;

        row.map(FileRow::into_entry).transpose()
    }

    async fn count_children(&self, owner: EntityId, parent: ParentRef) -> Result<u64, AppError> {
        let sql = format!(
            "SELECT COUNT(*) FROM files WHERE user_id = $1 AND {}",
            parent_filter(&parent)
        );
        let mut query = sqlx::query_scalar::<_, i64>(&sql).bind(owner);
        if let ParentRef::Folder(id) = parent {
            query = query.bind(id);
        }
        let count = query.fetch_one(&self.pool).await?;

        Ok(count.max(0) as u64)
    }

    async fn list_children(
        &self,
        owner: EntityId,
        parent: ParentRef,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<FileEntry>, AppError> {
        // Paging binds follow the optional `$2`
        let (offset, lim) = if parent.is_root() { ("$2", "$3") } else { ("$3", "$4") };
        let sql = format!(
            r#"
            SELECT {FILE_COLUMNS} FROM files
            WHERE user_id = $1 AND {}
            ORDER BY seq
            OFFSET {offset} LIMIT {lim}
            "#,
            parent_filter(&parent)
        );
        let mut query = sqlx::query_as::<_, FileRow>(&sql).bind(owner);
        if let ParentRef::Folder(id) = parent {
            query = query.bind(id);
        }
        let rows = query
            .bind(i64::try_from(skip).unwrap_or(i64::MAX))
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(FileRow::into_entry).collect()
    }

    async fn count(&self) -> Result<u64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM files")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.max(0) as u64)
    }
}
