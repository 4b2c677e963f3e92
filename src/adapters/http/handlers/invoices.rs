use actix_web::{HttpMessage, HttpRequest, HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::adapters::http::{
  dtos::{InvoiceListQuery, InvoiceRequest, PaymentRequest, SendInvoiceRequest, StatusRequest},
  errors::ApiError,
  forms::decode_invoice_form,
};
use crate::application::invoice::{
  ChangeInvoiceStatusUseCase, CreateInvoiceCommand, CreateInvoiceUseCase, DeleteInvoiceUseCase,
  DuplicateInvoiceUseCase, GetInvoiceDetailsUseCase, InvoiceRange, ListCustomersUseCase,
  ListInvoicesCommand, ListInvoicesUseCase, RecordInvoicePaymentUseCase, SendInvoiceCommand,
  SendInvoiceUseCase, UpdateInvoiceCommand, UpdateInvoiceUseCase,
};
use crate::domain::invoice::CustomerDetails;
use crate::domain::pagination::PageRequest;
use crate::infrastructure::config::BillingConfig;

use super::requester;

/// Reads an invoice body sent either as JSON or as an url-encoded form with
/// `items[N][field]` rows.
fn invoice_body(http_req: &HttpRequest, body: &[u8]) -> Result<InvoiceRequest, ApiError> {
  let request = if http_req.content_type() == "application/x-www-form-urlencoded" {
    decode_invoice_form(body)?
  } else {
    serde_json::from_slice(body)
      .map_err(|e| ApiError::Validation(format!("Malformed invoice body: {}", e)))?
  };

  request.validate()?;
  Ok(request)
}

fn customer(request: &InvoiceRequest) -> CustomerDetails {
  CustomerDetails {
    name: request.customer_name.trim().to_string(),
    email: request.customer_email.clone(),
    contact: request.customer_contact.clone(),
    address: request.customer_address.clone(),
  }
}

/// POST /api/v1/invoices
pub async fn create_invoice_handler(
  http_req: HttpRequest,
  body: web::Bytes,
  use_case: web::Data<Arc<CreateInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let request = invoice_body(&http_req, &body)?;

  let command = CreateInvoiceCommand {
    customer: customer(&request),
    advance_paid: request.advance_paid,
    items: request.items.into_iter().map(Into::into).collect(),
  };

  let invoice = use_case.execute(requester(&http_req)?, command).await?;
  Ok(HttpResponse::Created().json(invoice))
}

async fn list(
  http_req: HttpRequest,
  query: InvoiceListQuery,
  range: Option<InvoiceRange>,
  use_case: &ListInvoicesUseCase,
  billing: &BillingConfig,
) -> Result<HttpResponse, ApiError> {
  let command = ListInvoicesCommand {
    status: query.status,
    search: query.search,
    start_date: query.start_date,
    end_date: query.end_date,
    range,
    page: PageRequest::new(query.page, query.per_page, billing.invoices_per_page),
  };

  let page = use_case.execute(requester(&http_req)?, command).await?;
  Ok(HttpResponse::Ok().json(page))
}

/// GET /api/v1/invoices
pub async fn list_invoices_handler(
  http_req: HttpRequest,
  query: web::Query<InvoiceListQuery>,
  use_case: web::Data<Arc<ListInvoicesUseCase>>,
  billing: web::Data<BillingConfig>,
) -> Result<HttpResponse, ApiError> {
  list(http_req, query.into_inner(), None, &use_case, &billing).await
}

/// GET /api/v1/invoices/today
pub async fn list_today_invoices_handler(
  http_req: HttpRequest,
  query: web::Query<InvoiceListQuery>,
  use_case: web::Data<Arc<ListInvoicesUseCase>>,
  billing: web::Data<BillingConfig>,
) -> Result<HttpResponse, ApiError> {
  list(
    http_req,
    query.into_inner(),
    Some(InvoiceRange::Today),
    &use_case,
    &billing,
  )
  .await
}

/// GET /api/v1/invoices/last-week
pub async fn list_last_week_invoices_handler(
  http_req: HttpRequest,
  query: web::Query<InvoiceListQuery>,
  use_case: web::Data<Arc<ListInvoicesUseCase>>,
  billing: web::Data<BillingConfig>,
) -> Result<HttpResponse, ApiError> {
  list(
    http_req,
    query.into_inner(),
    Some(InvoiceRange::LastWeek),
    &use_case,
    &billing,
  )
  .await
}

/// GET /api/v1/invoices/{id}
pub async fn get_invoice_handler(
  http_req: HttpRequest,
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<GetInvoiceDetailsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let invoice = use_case
    .execute(requester(&http_req)?, path.into_inner())
    .await?;
  Ok(HttpResponse::Ok().json(invoice))
}

/// PUT /api/v1/invoices/{id}
///
/// Replaces customer details and line items. The advance stays untouched.
pub async fn update_invoice_handler(
  http_req: HttpRequest,
  path: web::Path<Uuid>,
  body: web::Bytes,
  use_case: web::Data<Arc<UpdateInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let request = invoice_body(&http_req, &body)?;

  let command = UpdateInvoiceCommand {
    customer: customer(&request),
    items: request.items.into_iter().map(Into::into).collect(),
  };

  let invoice = use_case
    .execute(requester(&http_req)?, path.into_inner(), command)
    .await?;
  Ok(HttpResponse::Ok().json(invoice))
}

/// POST /api/v1/invoices/{id}/status
pub async fn change_status_handler(
  http_req: HttpRequest,
  path: web::Path<Uuid>,
  request: web::Json<StatusRequest>,
  use_case: web::Data<Arc<ChangeInvoiceStatusUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case
    .execute(requester(&http_req)?, path.into_inner(), &request.status)
    .await?;
  Ok(HttpResponse::Ok().json(response))
}

/// POST /api/v1/invoices/{id}/payment
pub async fn record_payment_handler(
  http_req: HttpRequest,
  path: web::Path<Uuid>,
  request: web::Json<PaymentRequest>,
  use_case: web::Data<Arc<RecordInvoicePaymentUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case
    .execute(requester(&http_req)?, path.into_inner(), request.amount)
    .await?;
  Ok(HttpResponse::Ok().json(response))
}

/// POST /api/v1/invoices/{id}/duplicate
pub async fn duplicate_invoice_handler(
  http_req: HttpRequest,
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<DuplicateInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let invoice = use_case
    .execute(requester(&http_req)?, path.into_inner())
    .await?;
  Ok(HttpResponse::Created().json(invoice))
}

/// POST /api/v1/invoices/{id}/send
pub async fn send_invoice_handler(
  http_req: HttpRequest,
  path: web::Path<Uuid>,
  request: web::Json<SendInvoiceRequest>,
  use_case: web::Data<Arc<SendInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let command = SendInvoiceCommand {
    email: request.email,
    whatsapp: request.whatsapp,
  };

  let response = use_case
    .execute(requester(&http_req)?, path.into_inner(), command)
    .await?;
  Ok(HttpResponse::Ok().json(response))
}

/// DELETE /api/v1/invoices/{id}
pub async fn delete_invoice_handler(
  http_req: HttpRequest,
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<DeleteInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  use_case
    .execute(requester(&http_req)?, path.into_inner())
    .await?;
  Ok(HttpResponse::NoContent().finish())
}

/// GET /api/v1/customers
pub async fn list_customers_handler(
  http_req: HttpRequest,
  use_case: web::Data<Arc<ListCustomersUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let customers = use_case.execute(requester(&http_req)?).await?;
  Ok(HttpResponse::Ok().json(customers))
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::test::TestRequest;

  #[test]
  fn test_invoice_body_accepts_json() {
    let req = TestRequest::default()
      .insert_header(("Content-Type", "application/json"))
      .to_http_request();
    let body = br#"{"customer_name":"Asha","items":[{"description":"Visa","quantity":1,"rate":"2500"}]}"#;

    let request = invoice_body(&req, body).unwrap();

    assert_eq!(request.customer_name, "Asha");
    assert_eq!(request.items[0].quantity.as_deref(), Some("1"));
  }

  #[test]
  fn test_invoice_body_accepts_form() {
    let req = TestRequest::default()
      .insert_header(("Content-Type", "application/x-www-form-urlencoded"))
      .to_http_request();
    let body = b"customer_name=Ravi&items%5B0%5D%5Bdescription%5D=Scan&items%5B0%5D%5Brate%5D=40";

    let request = invoice_body(&req, body).unwrap();

    assert_eq!(request.customer_name, "Ravi");
    assert_eq!(request.items.len(), 1);
  }

  #[test]
  fn test_invoice_body_requires_customer_name() {
    let req = TestRequest::default()
      .insert_header(("Content-Type", "application/json"))
      .to_http_request();

    let err = invoice_body(&req, br#"{"customer_name":""}"#).unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
  }
}
