use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::adapters::http::{
  dtos::{ExpenseListQuery, ExpenseRequest},
  errors::ApiError,
};
use crate::application::expense::{
  CreateExpenseUseCase, DeleteExpenseUseCase, ExpenseReportUseCase, GetExpenseUseCase,
  ListConfiguredCategoriesUseCase, ListExpenseCategoriesUseCase, ListExpensesCommand,
  ListExpensesUseCase, UpdateExpenseUseCase,
};
use crate::domain::expense::ExpenseInput;
use crate::domain::pagination::PageRequest;
use crate::infrastructure::config::BillingConfig;

use super::requester;

impl From<ExpenseRequest> for ExpenseInput {
  fn from(request: ExpenseRequest) -> Self {
    ExpenseInput {
      title: request.title,
      description: request.description,
      amount: request.amount,
      category: request.category,
      date: request.date,
    }
  }
}

fn list_command(query: ExpenseListQuery, billing: &BillingConfig) -> ListExpensesCommand {
  ListExpensesCommand {
    category: query.category,
    start_date: query.start_date,
    end_date: query.end_date,
    page: PageRequest::new(query.page, query.per_page, billing.expenses_per_page),
  }
}

/// POST /api/v1/expenses
pub async fn create_expense_handler(
  http_req: HttpRequest,
  request: web::Json<ExpenseRequest>,
  use_case: web::Data<Arc<CreateExpenseUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let expense = use_case
    .execute(requester(&http_req)?, request.into_inner().into())
    .await?;
  Ok(HttpResponse::Created().json(expense))
}

/// GET /api/v1/expenses
///
/// One page of expenses plus the total of every matching row.
pub async fn list_expenses_handler(
  http_req: HttpRequest,
  query: web::Query<ExpenseListQuery>,
  use_case: web::Data<Arc<ListExpensesUseCase>>,
  billing: web::Data<BillingConfig>,
) -> Result<HttpResponse, ApiError> {
  let command = list_command(query.into_inner(), &billing);
  let listing = use_case.execute(requester(&http_req)?, command).await?;
  Ok(HttpResponse::Ok().json(listing))
}

/// GET /api/v1/expenses/categories
pub async fn list_categories_handler(
  http_req: HttpRequest,
  use_case: web::Data<Arc<ListExpenseCategoriesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let categories = use_case.execute(requester(&http_req)?).await?;
  Ok(HttpResponse::Ok().json(categories))
}

/// GET /api/v1/expenses/admin/categories
pub async fn list_configured_categories_handler(
  http_req: HttpRequest,
  use_case: web::Data<Arc<ListConfiguredCategoriesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let categories = use_case.execute(requester(&http_req)?).await?;
  Ok(HttpResponse::Ok().json(categories))
}

/// GET /api/v1/expenses/reports
pub async fn expense_report_handler(
  http_req: HttpRequest,
  query: web::Query<ExpenseListQuery>,
  use_case: web::Data<Arc<ExpenseReportUseCase>>,
  billing: web::Data<BillingConfig>,
) -> Result<HttpResponse, ApiError> {
  let command = list_command(query.into_inner(), &billing);
  let report = use_case.execute(requester(&http_req)?, command).await?;
  Ok(HttpResponse::Ok().json(report))
}

/// GET /api/v1/expenses/{id}
pub async fn get_expense_handler(
  http_req: HttpRequest,
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<GetExpenseUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let expense = use_case
    .execute(requester(&http_req)?, path.into_inner())
    .await?;
  Ok(HttpResponse::Ok().json(expense))
}

/// PUT /api/v1/expenses/{id}
pub async fn update_expense_handler(
  http_req: HttpRequest,
  path: web::Path<Uuid>,
  request: web::Json<ExpenseRequest>,
  use_case: web::Data<Arc<UpdateExpenseUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let expense = use_case
    .execute(
      requester(&http_req)?,
      path.into_inner(),
      request.into_inner().into(),
    )
    .await?;
  Ok(HttpResponse::Ok().json(expense))
}

/// DELETE /api/v1/expenses/{id}
pub async fn delete_expense_handler(
  http_req: HttpRequest,
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<DeleteExpenseUseCase>>,
) -> Result<HttpResponse, ApiError> {
  use_case
    .execute(requester(&http_req)?, path.into_inner())
    .await?;
  Ok(HttpResponse::NoContent().finish())
}
