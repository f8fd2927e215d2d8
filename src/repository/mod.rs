use crate::db::{DbConnection, DbPool};
use crate::domain::item::{InventoryItem, InventoryItemPatch, NewInventoryItem};
use crate::domain::types::ItemId;

pub mod errors;
pub mod item;
#[cfg(test)]
pub mod test;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations for inventory items.
pub trait InventoryReader {
    /// List every item, most recently updated first.
    fn list_items(&self) -> RepositoryResult<Vec<InventoryItem>>;
}

/// Write operations for inventory items. Every write returns the row as stored.
pub trait InventoryWriter {
    /// Persist a new item; the store assigns `id` and `last_updated`.
    fn create_item(&self, item: &NewInventoryItem) -> RepositoryResult<InventoryItem>;
    /// Apply a field-level patch and refresh `last_updated`.
    ///
    /// Fails with [`RepositoryError::NotFound`] when the id is unknown.
    fn update_item(
        &self,
        id: ItemId,
        patch: &InventoryItemPatch,
    ) -> RepositoryResult<InventoryItem>;
    /// Hard-delete an item.
    ///
    /// Fails with [`RepositoryError::NotFound`] when the id is unknown.
    fn delete_item(&self, id: ItemId) -> RepositoryResult<usize>;
}
