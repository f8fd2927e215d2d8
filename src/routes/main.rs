use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use serde::Deserialize;
use tera::Tera;

use crate::console::{ClickTarget, Console, LocalGateway, ViewFilter};
use crate::domain::types::{ItemId, KNOWN_CATEGORIES};
use crate::dto::inventory::InventoryItemDto;
use crate::repository::DieselRepository;
use crate::routes::{base_context, render_template};

/// View state of the console page carried in the URL.
#[derive(Deserialize, Debug, Default)]
pub struct ConsoleQueryParams {
    /// Search text.
    q: Option<String>,
    category: Option<String>,
    /// Present when the "add item" form is open.
    new: Option<String>,
    /// Item whose edit form is open.
    edit: Option<i32>,
    /// Item whose detail view is open.
    item: Option<i32>,
}

#[get("/")]
pub async fn index(
    params: web::Query<ConsoleQueryParams>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params = params.into_inner();
    let gateway = LocalGateway::new(repo.get_ref());
    let mut console = Console::load(&gateway).await;

    if let Some(query) = params.q.as_deref() {
        console.search(query);
    }
    if let Some(category) = params.category.as_deref().filter(|c| !c.is_empty()) {
        console.filter_by_category(Some(category));
    }
    if params.new.is_some() {
        console.open_create();
    }
    if let Some(id) = params.edit.and_then(|id| ItemId::new(id).ok()) {
        console.click(ClickTarget::EditButton(id), &gateway).await;
    }
    if let Some(id) = params.item.and_then(|id| ItemId::new(id).ok()) {
        console.click(ClickTarget::Row(id), &gateway).await;
    }

    render_console(&mut console, &flash_messages, &tera)
}

/// Render the console page for the given state.
///
/// Form routes use this to show a rejected form with the values the user
/// submitted.
pub fn render_console(
    console: &mut Console,
    flash_messages: &IncomingFlashMessages,
    tera: &Tera,
) -> HttpResponse {
    let (search, active_category) = match console.filter() {
        ViewFilter::All => ("", ""),
        ViewFilter::Search(query) => (query.as_str(), ""),
        ViewFilter::Category(category) => ("", category.as_str()),
    };

    let items = console
        .filtered()
        .iter()
        .map(InventoryItemDto::from)
        .collect::<Vec<_>>();

    let mut context = base_context(flash_messages, "inventory");
    context.insert("items", &items);
    context.insert("total", &console.items().len());
    context.insert("search", search);
    context.insert("active_category", active_category);
    context.insert("category_options", &console.category_options());
    context.insert("known_categories", &KNOWN_CATEGORIES);
    context.insert("item_modal_open", &console.is_item_modal_open());
    context.insert("editing", &console.editing().map(InventoryItemDto::from));
    context.insert("form", console.form());
    context.insert("detail_modal_open", &console.is_detail_modal_open());
    context.insert("selected", &console.selected().map(InventoryItemDto::from));
    context.insert("notification", &console.take_notification());

    render_template(tera, "inventory/index.html", &context)
}
