use chrono::{Duration, NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::domain::item::{InventoryItem, InventoryItemPatch, NewInventoryItem};
use crate::domain::types::ItemId;
use crate::models::item::{
    InventoryItem as DbInventoryItem, InventoryItemChangeset,
    NewInventoryItem as DbNewInventoryItem,
};
use crate::repository::{
    DieselRepository, InventoryReader, InventoryWriter, RepositoryError, RepositoryResult,
};

/// Timestamp for an update that is strictly later than `previous`, even when
/// the clock has not moved since the last write.
fn next_timestamp(previous: NaiveDateTime) -> NaiveDateTime {
    let now = Utc::now().naive_utc();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

impl InventoryReader for DieselRepository {
    fn list_items(&self) -> RepositoryResult<Vec<InventoryItem>> {
        use crate::schema::inventory;

        let mut conn = self.conn()?;

        let items = inventory::table
            .order((inventory::last_updated.desc(), inventory::id.desc()))
            .load::<DbInventoryItem>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<InventoryItem>, _>>()?;

        Ok(items)
    }
}

impl InventoryWriter for DieselRepository {
    fn create_item(&self, item: &NewInventoryItem) -> RepositoryResult<InventoryItem> {
        use crate::schema::inventory;

        let mut conn = self.conn()?;
        let db_item = DbNewInventoryItem::new(item.clone(), Utc::now().naive_utc());

        let created = diesel::insert_into(inventory::table)
            .values(&db_item)
            .get_result::<DbInventoryItem>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_item(
        &self,
        id: ItemId,
        patch: &InventoryItemPatch,
    ) -> RepositoryResult<InventoryItem> {
        use crate::schema::inventory;

        let mut conn = self.conn()?;

        let updated = conn.transaction::<_, RepositoryError, _>(|conn| {
            let previous = inventory::table
                .find(id.get())
                .select(inventory::last_updated)
                .first::<NaiveDateTime>(conn)
                .optional()?
                .ok_or(RepositoryError::NotFound)?;

            let changeset = InventoryItemChangeset::new(patch.clone(), next_timestamp(previous));

            let row = diesel::update(inventory::table.find(id.get()))
                .set(&changeset)
                .get_result::<DbInventoryItem>(conn)?;
            Ok(row)
        })?;

        Ok(updated.try_into()?)
    }

    fn delete_item(&self, id: ItemId) -> RepositoryResult<usize> {
        use crate::schema::inventory;

        let mut conn = self.conn()?;

        let affected = diesel::delete(inventory::table.find(id.get())).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(affected)
    }
}
