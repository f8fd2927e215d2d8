//! State container behind the inventory console page.
//!
//! The console caches the full item list, derives a filtered view from it and
//! tracks which record is being edited or inspected. Every user interaction is
//! a method on [`Console`]; the ones that talk to the store take a
//! [`ConsoleGateway`].

use serde::Serialize;

use crate::domain::item::InventoryItem;
use crate::domain::types::ItemId;
use crate::forms::inventory::{ItemForm, ItemFormPayload};

pub mod gateway;

pub use gateway::{ConsoleError, ConsoleGateway, LocalGateway};

pub const LOAD_FAILED: &str = "Failed to load items";
pub const SAVE_FAILED: &str = "Failed to save item";
pub const DELETE_FAILED: &str = "Failed to delete item";
pub const ITEM_ADDED: &str = "Item added";
pub const ITEM_UPDATED: &str = "Item updated";
pub const ITEM_DELETED: &str = "Item deleted";

/// Message shown to the user after an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "level", content = "message", rename_all = "lowercase")]
pub enum Notification {
    Success(String),
    Error(String),
}

/// The filter currently applied to the table.
///
/// Search and category share one slot: applying either replaces the other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewFilter {
    #[default]
    All,
    Search(String),
    Category(String),
}

/// Element of a table row that received a click.
///
/// The action buttons are handled on their own and never open the detail
/// view of the row they sit in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Row(ItemId),
    EditButton(ItemId),
    DeleteButton(ItemId),
}

#[derive(Debug, Default)]
pub struct Console {
    items: Vec<InventoryItem>,
    filtered: Vec<InventoryItem>,
    filter: ViewFilter,
    editing: Option<InventoryItem>,
    selected: Option<InventoryItem>,
    item_modal_open: bool,
    detail_modal_open: bool,
    form: ItemForm,
    notification: Option<Notification>,
}

impl Console {
    /// Build a console seeded with the full list from the store.
    pub async fn load<G: ConsoleGateway>(gateway: &G) -> Self {
        let mut console = Self::default();
        console.refresh(gateway).await;
        console
    }

    /// Re-fetch the full list and reset the filtered view to it.
    pub async fn refresh<G: ConsoleGateway>(&mut self, gateway: &G) {
        match gateway.list_items().await {
            Ok(items) => self.reset_items(items),
            Err(e) => {
                log::error!("Failed to fetch inventory: {e}");
                self.notify(Notification::Error(LOAD_FAILED.into()));
            }
        }
    }

    fn reset_items(&mut self, items: Vec<InventoryItem>) {
        self.items = items;
        self.show_all();
    }

    fn show_all(&mut self) {
        self.filtered = self.items.clone();
        self.filter = ViewFilter::All;
    }

    fn notify(&mut self, notification: Notification) {
        self.notification = Some(notification);
    }

    fn find(&self, id: ItemId) -> Option<&InventoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Keep items whose name or description contains `query`, ignoring case.
    pub fn search(&mut self, query: &str) {
        if query.is_empty() {
            self.show_all();
            return;
        }

        let needle = query.to_lowercase();
        self.filtered = self
            .items
            .iter()
            .filter(|item| item.matches_text(&needle))
            .cloned()
            .collect();
        self.filter = ViewFilter::Search(query.to_string());
    }

    /// Keep items whose category equals `category`; `None` or blank clears.
    pub fn filter_by_category(&mut self, category: Option<&str>) {
        let Some(category) = category.filter(|c| !c.is_empty()) else {
            self.show_all();
            return;
        };

        self.filtered = self
            .items
            .iter()
            .filter(|item| item.category.as_ref().is_some_and(|c| c.as_str() == category))
            .cloned()
            .collect();
        self.filter = ViewFilter::Category(category.to_string());
    }

    /// Distinct categories present in the cached list, in first-seen order.
    pub fn category_options(&self) -> Vec<&str> {
        let mut options: Vec<&str> = Vec::new();
        for category in self.items.iter().filter_map(|item| item.category.as_deref()) {
            if !options.contains(&category) {
                options.push(category);
            }
        }
        options
    }

    /// Open an empty form for a new item.
    pub fn open_create(&mut self) {
        self.editing = None;
        self.form = ItemForm::default();
        self.item_modal_open = true;
    }

    /// Open the form prefilled with an existing item. Returns `false` when the
    /// id is not in the cached list.
    pub fn begin_edit(&mut self, id: ItemId) -> bool {
        let Some(item) = self.find(id).cloned() else {
            return false;
        };
        self.form = ItemForm::from(&item);
        self.editing = Some(item);
        self.item_modal_open = true;
        true
    }

    /// Show the read-only detail view of an item.
    pub fn select(&mut self, id: ItemId) -> bool {
        let Some(item) = self.find(id).cloned() else {
            return false;
        };
        self.selected = Some(item);
        self.detail_modal_open = true;
        true
    }

    /// Dispatch a click inside the table to exactly one handler.
    pub async fn click<G: ConsoleGateway>(&mut self, target: ClickTarget, gateway: &G) {
        match target {
            ClickTarget::Row(id) => {
                self.select(id);
            }
            ClickTarget::EditButton(id) => {
                self.begin_edit(id);
            }
            ClickTarget::DeleteButton(id) => {
                self.delete(id, gateway).await;
            }
        }
    }

    /// Close the add/edit form and discard its values.
    pub fn cancel_edit(&mut self) {
        self.item_modal_open = false;
        self.form = ItemForm::default();
    }

    pub fn close_detail(&mut self) {
        self.detail_modal_open = false;
    }

    /// Save the form: update when editing, create otherwise.
    ///
    /// On success the returned record is spliced into the cached list and the
    /// form closes. On failure the form stays open with the submitted values.
    pub async fn submit<G: ConsoleGateway>(&mut self, form: ItemForm, gateway: &G) -> bool {
        self.form = form.clone();

        let payload = match ItemFormPayload::try_from(form) {
            Ok(payload) => payload,
            Err(e) => {
                log::warn!("Rejected item form: {e}");
                self.notify(Notification::Error(SAVE_FAILED.into()));
                return false;
            }
        };

        let editing_id = self.editing.as_ref().map(|item| item.id);
        let result = match editing_id {
            Some(id) => gateway.update_item(id, payload.into_update_request()).await,
            None => gateway.create_item(payload.into_create_request()).await,
        };

        let saved = match result {
            Ok(saved) => saved,
            Err(e) => {
                log::error!("Failed to save item: {e}");
                self.notify(Notification::Error(SAVE_FAILED.into()));
                return false;
            }
        };

        if editing_id.is_some() {
            for item in self.items.iter_mut().filter(|item| item.id == saved.id) {
                *item = saved.clone();
            }
            self.notify(Notification::Success(ITEM_UPDATED.into()));
        } else {
            self.items.push(saved);
            self.notify(Notification::Success(ITEM_ADDED.into()));
        }

        self.show_all();
        self.editing = None;
        self.form = ItemForm::default();
        self.item_modal_open = false;
        true
    }

    /// Delete an item, then reload the full list from the store.
    pub async fn delete<G: ConsoleGateway>(&mut self, id: ItemId, gateway: &G) -> bool {
        match gateway.delete_item(id).await {
            Ok(()) => {
                self.notify(Notification::Success(ITEM_DELETED.into()));
                self.refresh(gateway).await;
                true
            }
            Err(e) => {
                log::error!("Failed to delete item {id}: {e}");
                self.notify(Notification::Error(DELETE_FAILED.into()));
                false
            }
        }
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    /// Rows currently shown in the table.
    pub fn filtered(&self) -> &[InventoryItem] {
        &self.filtered
    }

    pub fn filter(&self) -> &ViewFilter {
        &self.filter
    }

    pub fn editing(&self) -> Option<&InventoryItem> {
        self.editing.as_ref()
    }

    pub fn selected(&self) -> Option<&InventoryItem> {
        self.selected.as_ref()
    }

    pub fn is_item_modal_open(&self) -> bool {
        self.item_modal_open
    }

    pub fn is_detail_modal_open(&self) -> bool {
        self.detail_modal_open
    }

    pub fn form(&self) -> &ItemForm {
        &self.form
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn take_notification(&mut self) -> Option<Notification> {
        self.notification.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{CategoryName, ItemName, StockCount, UnitPrice};
    use crate::repository::test::TestRepository;
    use chrono::DateTime;

    fn item(
        id: i32,
        name: &str,
        description: Option<&str>,
        category: Option<&str>,
    ) -> InventoryItem {
        InventoryItem {
            id: ItemId::new(id).unwrap(),
            name: ItemName::new(name).unwrap(),
            description: description.map(str::to_string),
            unit_price: UnitPrice::new(1.5).unwrap(),
            quantity_in_stock: StockCount::new(3).unwrap(),
            reorder_level: StockCount::new(1).unwrap(),
            reorder_time_in_days: None,
            quantity_in_reorder: None,
            category: category.map(|c| CategoryName::new(c).unwrap()),
            last_updated: DateTime::from_timestamp(i64::from(id), 0).unwrap().naive_utc(),
        }
    }

    fn sample_repo() -> TestRepository {
        TestRepository::new(vec![
            item(1, "Laptop", Some("15 inch screen"), Some("Electronics")),
            item(2, "Apples", Some("Green, crunchy"), Some("Groceries")),
            item(3, "Stapler", None, Some("Office Supplies")),
            item(4, "Phone charger", Some("USB-C"), Some("Electronics")),
            item(5, "Tent", Some("Two person"), None),
        ])
    }

    fn widget_form() -> ItemForm {
        ItemForm {
            name: "Widget".into(),
            unit_price: "9.99".into(),
            quantity_in_stock: "5".into(),
            reorder_level: "10".into(),
            ..Default::default()
        }
    }

    fn names(items: &[InventoryItem]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[actix_rt::test]
    async fn load_seeds_full_and_filtered_views() {
        let repo = sample_repo();
        let console = Console::load(&LocalGateway::new(&repo)).await;

        assert_eq!(console.items().len(), 5);
        assert_eq!(console.filtered(), console.items());
        assert_eq!(console.filter(), &ViewFilter::All);
        assert!(console.notification().is_none());
    }

    #[actix_rt::test]
    async fn load_failure_leaves_lists_empty() {
        let repo = TestRepository::failing();
        let console = Console::load(&LocalGateway::new(&repo)).await;

        assert!(console.items().is_empty());
        assert_eq!(
            console.notification(),
            Some(&Notification::Error(LOAD_FAILED.into()))
        );
    }

    #[actix_rt::test]
    async fn search_is_case_insensitive_over_name_and_description() {
        let repo = sample_repo();
        let mut console = Console::load(&LocalGateway::new(&repo)).await;

        console.search("LAP");
        assert_eq!(names(console.filtered()), vec!["Laptop"]);

        console.search("green");
        assert_eq!(names(console.filtered()), vec!["Apples"]);

        console.search("nothing like this");
        assert!(console.filtered().is_empty());

        console.search("");
        assert_eq!(console.filtered().len(), 5);
        assert_eq!(console.filter(), &ViewFilter::All);
    }

    #[actix_rt::test]
    async fn search_does_not_query_the_store() {
        let repo = sample_repo();
        let mut console = Console::load(&LocalGateway::new(&repo)).await;
        let calls = repo.calls();

        console.search("a");
        console.filter_by_category(Some("Electronics"));
        assert_eq!(repo.calls(), calls);
    }

    #[actix_rt::test]
    async fn category_filter_selects_exact_matches() {
        let repo = sample_repo();
        let mut console = Console::load(&LocalGateway::new(&repo)).await;

        console.filter_by_category(Some("Electronics"));
        let mut shown = names(console.filtered());
        shown.sort();
        assert_eq!(shown, vec!["Laptop", "Phone charger"]);

        console.filter_by_category(Some("Electr"));
        assert!(console.filtered().is_empty());

        console.filter_by_category(None);
        assert_eq!(console.filtered().len(), 5);
    }

    #[actix_rt::test]
    async fn search_and_category_share_one_slot() {
        let repo = sample_repo();
        let mut console = Console::load(&LocalGateway::new(&repo)).await;

        console.filter_by_category(Some("Groceries"));
        console.search("o");
        assert_eq!(console.filter(), &ViewFilter::Search("o".into()));
        assert!(names(console.filtered()).contains(&"Laptop"));
    }

    #[actix_rt::test]
    async fn category_options_are_distinct_and_skip_missing() {
        let repo = sample_repo();
        let console = Console::load(&LocalGateway::new(&repo)).await;

        let mut options = console.category_options();
        options.sort();
        assert_eq!(options, vec!["Electronics", "Groceries", "Office Supplies"]);
    }

    #[actix_rt::test]
    async fn create_appends_returned_record_and_closes_form() {
        let repo = sample_repo();
        let gateway = LocalGateway::new(&repo);
        let mut console = Console::load(&gateway).await;
        console.search("laptop");

        console.open_create();
        assert!(console.is_item_modal_open());
        assert!(console.submit(widget_form(), &gateway).await);

        assert_eq!(console.items().len(), 6);
        let widget = console.items().last().unwrap();
        assert_eq!(widget.name, "Widget");
        assert!(widget.is_low_stock());
        assert_eq!(console.filtered().len(), 6);
        assert!(!console.is_item_modal_open());
        assert_eq!(console.form(), &ItemForm::default());
        assert_eq!(
            console.take_notification(),
            Some(Notification::Success(ITEM_ADDED.into()))
        );
    }

    #[actix_rt::test]
    async fn edit_replaces_record_by_id() {
        let repo = sample_repo();
        let gateway = LocalGateway::new(&repo);
        let mut console = Console::load(&gateway).await;
        let id = ItemId::new(3).unwrap();

        assert!(console.begin_edit(id));
        assert_eq!(console.form().name, "Stapler");
        let form = ItemForm {
            quantity_in_stock: "0".into(),
            reorder_level: "2".into(),
            ..console.form().clone()
        };
        assert!(console.submit(form, &gateway).await);

        assert_eq!(console.items().len(), 5);
        let stapler = console.items().iter().find(|i| i.id == id).unwrap();
        assert!(stapler.is_low_stock());
        assert!(console.editing().is_none());
        assert_eq!(
            console.notification(),
            Some(&Notification::Success(ITEM_UPDATED.into()))
        );
    }

    #[actix_rt::test]
    async fn invalid_form_is_not_sent() {
        let repo = sample_repo();
        let gateway = LocalGateway::new(&repo);
        let mut console = Console::load(&gateway).await;
        let calls = repo.calls();

        console.open_create();
        let form = ItemForm {
            unit_price: "cheap".into(),
            ..widget_form()
        };
        assert!(!console.submit(form.clone(), &gateway).await);

        assert_eq!(repo.calls(), calls);
        assert!(console.is_item_modal_open());
        assert_eq!(console.form(), &form);
        assert_eq!(
            console.notification(),
            Some(&Notification::Error(SAVE_FAILED.into()))
        );
    }

    #[actix_rt::test]
    async fn failed_save_keeps_form_open() {
        let repo = sample_repo();
        let mut console = Console::load(&LocalGateway::new(&repo)).await;
        let broken = TestRepository::failing();

        console.open_create();
        assert!(!console.submit(widget_form(), &LocalGateway::new(&broken)).await);
        assert!(console.is_item_modal_open());
        assert_eq!(console.items().len(), 5);
        assert_eq!(
            console.notification(),
            Some(&Notification::Error(SAVE_FAILED.into()))
        );
    }

    #[actix_rt::test]
    async fn delete_reloads_full_list() {
        let repo = sample_repo();
        let gateway = LocalGateway::new(&repo);
        let mut console = Console::load(&gateway).await;
        console.search("tent");

        assert!(console.delete(ItemId::new(1).unwrap(), &gateway).await);
        assert_eq!(console.items().len(), 4);
        assert_eq!(console.filtered().len(), 4);
        assert!(console.items().iter().all(|i| i.id != 1));
        assert_eq!(
            console.notification(),
            Some(&Notification::Success(ITEM_DELETED.into()))
        );
    }

    #[actix_rt::test]
    async fn failed_delete_reports_error() {
        let repo = sample_repo();
        let gateway = LocalGateway::new(&repo);
        let mut console = Console::load(&gateway).await;

        assert!(!console.delete(ItemId::new(99).unwrap(), &gateway).await);
        assert_eq!(console.items().len(), 5);
        assert_eq!(
            console.notification(),
            Some(&Notification::Error(DELETE_FAILED.into()))
        );
    }

    #[actix_rt::test]
    async fn row_click_opens_detail_but_action_buttons_do_not() {
        let repo = sample_repo();
        let gateway = LocalGateway::new(&repo);
        let mut console = Console::load(&gateway).await;
        let id = ItemId::new(2).unwrap();

        console.click(ClickTarget::EditButton(id), &gateway).await;
        assert!(console.is_item_modal_open());
        assert!(!console.is_detail_modal_open());
        assert!(console.selected().is_none());

        console.cancel_edit();
        console.click(ClickTarget::DeleteButton(id), &gateway).await;
        assert!(!console.is_detail_modal_open());
        assert_eq!(console.items().len(), 4);

        console.click(ClickTarget::Row(ItemId::new(1).unwrap()), &gateway).await;
        assert!(console.is_detail_modal_open());
        assert_eq!(console.selected().unwrap().name, "Laptop");

        console.close_detail();
        assert!(!console.is_detail_modal_open());
    }

    #[actix_rt::test]
    async fn open_create_discards_edit_state() {
        let repo = sample_repo();
        let mut console = Console::load(&LocalGateway::new(&repo)).await;

        console.begin_edit(ItemId::new(1).unwrap());
        console.open_create();
        assert!(console.editing().is_none());
        assert_eq!(console.form(), &ItemForm::default());
    }
}
