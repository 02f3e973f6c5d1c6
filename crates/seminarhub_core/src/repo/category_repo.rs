//! Read-only category catalog storage.

use crate::model::category::{Category, CategoryId};
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{Connection, OptionalExtension, Row};

/// Repository interface for the category catalog.
pub trait CategoryRepository {
    /// Returns every category ordered by id.
    fn list_categories(&self) -> RepoResult<Vec<Category>>;
    /// Returns one category by id.
    fn get_category(&self, id: CategoryId) -> RepoResult<Option<Category>>;
}

/// SQLite-backed category catalog.
#[derive(Clone, Copy)]
pub struct SqliteCategoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCategoryRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl CategoryRepository for SqliteCategoryRepository<'_> {
    fn list_categories(&self) -> RepoResult<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM categories ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
            categories.push(parse_category_row(row)?);
        }
        Ok(categories)
    }

    fn get_category(&self, id: CategoryId) -> RepoResult<Option<Category>> {
        let category = self
            .conn
            .query_row(
                "SELECT id, name FROM categories WHERE id = ?1;",
                [id],
                |row| Ok((row.get::<_, CategoryId>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;

        category
            .map(|(id, name)| checked_category(id, name))
            .transpose()
    }
}

fn parse_category_row(row: &Row<'_>) -> RepoResult<Category> {
    checked_category(row.get("id")?, row.get("name")?)
}

fn checked_category(id: CategoryId, name: String) -> RepoResult<Category> {
    if !Category::is_valid_name(&name) {
        return Err(RepoError::InvalidData(format!(
            "invalid category name length in categories.name for id {id}"
        )));
    }
    Ok(Category { id, name })
}
