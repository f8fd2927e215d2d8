use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Duration, NaiveDateTime};

use crate::domain::item::{InventoryItem, InventoryItemPatch, NewInventoryItem};
use crate::domain::types::ItemId;
use crate::repository::{InventoryReader, InventoryWriter, RepositoryError, RepositoryResult};

/// Simple in-memory repository used for unit tests.
///
/// Timestamps come from a fake clock that advances one second per write so
/// ordering assertions stay deterministic.
#[derive(Default)]
pub struct TestRepository {
    items: Mutex<Vec<InventoryItem>>,
    next_id: AtomicUsize,
    ticks: AtomicUsize,
    calls: AtomicUsize,
    failing: bool,
}

impl TestRepository {
    pub fn new(items: Vec<InventoryItem>) -> Self {
        let next_id = items.iter().map(|i| i.id.get() as usize).max().unwrap_or(0);
        Self {
            items: Mutex::new(items),
            next_id: AtomicUsize::new(next_id),
            ..Default::default()
        }
    }

    /// Repository whose every operation fails like a broken database.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    /// Number of repository operations invoked so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> Vec<InventoryItem> {
        self.items.lock().unwrap().clone()
    }

    fn enter(&self) -> RepositoryResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            Err(RepositoryError::DatabaseError(
                diesel::result::Error::BrokenTransactionManager,
            ))
        } else {
            Ok(())
        }
    }

    fn tick(&self) -> NaiveDateTime {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst) as i64 + 1;
        DateTime::from_timestamp(1_700_000_000, 0).unwrap().naive_utc() + Duration::seconds(tick)
    }
}

impl InventoryReader for TestRepository {
    fn list_items(&self) -> RepositoryResult<Vec<InventoryItem>> {
        self.enter()?;
        let mut items = self.snapshot();
        items.sort_by(|a, b| {
            b.last_updated
                .cmp(&a.last_updated)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(items)
    }
}

impl InventoryWriter for TestRepository {
    fn create_item(&self, item: &NewInventoryItem) -> RepositoryResult<InventoryItem> {
        self.enter()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i32 + 1;
        let created = InventoryItem {
            id: ItemId::new(id).unwrap(),
            name: item.name.clone(),
            description: item.description.clone(),
            unit_price: item.unit_price,
            quantity_in_stock: item.quantity_in_stock,
            reorder_level: item.reorder_level,
            reorder_time_in_days: item.reorder_time_in_days,
            quantity_in_reorder: item.quantity_in_reorder,
            category: item.category.clone(),
            last_updated: self.tick(),
        };
        self.items.lock().unwrap().push(created.clone());
        Ok(created)
    }

    fn update_item(
        &self,
        id: ItemId,
        patch: &InventoryItemPatch,
    ) -> RepositoryResult<InventoryItem> {
        self.enter()?;
        let stamp = self.tick();
        let mut items = self.items.lock().unwrap();
        let item = items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(RepositoryError::NotFound)?;
        patch.apply_to(item);
        item.last_updated = stamp;
        Ok(item.clone())
    }

    fn delete_item(&self, id: ItemId) -> RepositoryResult<usize> {
        self.enter()?;
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|i| i.id != id);
        match before - items.len() {
            0 => Err(RepositoryError::NotFound),
            affected => Ok(affected),
        }
    }
}
