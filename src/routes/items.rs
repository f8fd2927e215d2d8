use actix_web::{HttpResponse, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::console::{Console, LocalGateway, SAVE_FAILED};
use crate::domain::types::ItemId;
use crate::forms::inventory::ItemForm;
use crate::repository::DieselRepository;
use crate::routes::main::render_console;
use crate::routes::{flash_notification, redirect};

#[post("/items")]
pub async fn create_item(
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<ItemForm>,
) -> HttpResponse {
    let gateway = LocalGateway::new(repo.get_ref());
    let mut console = Console::load(&gateway).await;

    console.open_create();
    if !console.submit(form, &gateway).await {
        // The form stays open with the submitted values.
        return render_console(&mut console, &flash_messages, &tera);
    }

    flash_notification(console.take_notification());
    redirect("/")
}

#[post("/items/{item_id}")]
pub async fn update_item(
    item_id: web::Path<i32>,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<ItemForm>,
) -> HttpResponse {
    let item_id = match ItemId::new(item_id.into_inner()) {
        Ok(id) => id,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/");
        }
    };

    let gateway = LocalGateway::new(repo.get_ref());
    let mut console = Console::load(&gateway).await;

    if !console.begin_edit(item_id) {
        FlashMessage::error(SAVE_FAILED).send();
        return redirect("/");
    }

    if !console.submit(form, &gateway).await {
        return render_console(&mut console, &flash_messages, &tera);
    }

    flash_notification(console.take_notification());
    redirect("/")
}

#[post("/items/{item_id}/delete")]
pub async fn delete_item(
    item_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> HttpResponse {
    let item_id = match ItemId::new(item_id.into_inner()) {
        Ok(id) => id,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/");
        }
    };

    let gateway = LocalGateway::new(repo.get_ref());
    let mut console = Console::default();

    console.delete(item_id, &gateway).await;
    flash_notification(console.take_notification());

    redirect("/")
}
