use actix_web::http::{StatusCode, header};
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;

use crate::dto::inventory::MessageResponse;
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::errors::ALLOWED_METHODS;
use crate::services::inventory::{GatewayRequest, GatewayResponse, handle_request};

#[derive(Deserialize, Debug)]
pub struct GatewayQueryParams {
    id: Option<String>,
}

/// `/api/inventory`, every method. The service layer decides which methods
/// are supported.
pub async fn inventory_gateway(
    request: HttpRequest,
    params: web::Query<GatewayQueryParams>,
    body: web::Bytes,
    repo: web::Data<DieselRepository>,
) -> HttpResponse {
    let result = GatewayRequest::parse(request.method().as_str(), params.id.as_deref(), &body)
        .and_then(|request| handle_request(request, repo.get_ref()));

    match result {
        Ok(response) => success_response(response),
        Err(err) => error_response(&err),
    }
}

fn success_response(response: GatewayResponse) -> HttpResponse {
    let status = StatusCode::from_u16(response.status_code()).unwrap_or(StatusCode::OK);
    let mut builder = HttpResponse::build(status);
    match response {
        GatewayResponse::Items(items) => builder.json(items),
        GatewayResponse::Created(item) | GatewayResponse::Updated(item) => builder.json(item),
        GatewayResponse::Deleted(message) => builder.json(message),
    }
}

fn error_response(err: &ServiceError) -> HttpResponse {
    match err {
        ServiceError::UnsupportedMethod(_) => HttpResponse::MethodNotAllowed()
            .insert_header((header::ALLOW, ALLOWED_METHODS.join(", ")))
            .body(err.to_string()),
        _ => {
            let status = StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            HttpResponse::build(status).json(MessageResponse::new(err.to_string()))
        }
    }
}
