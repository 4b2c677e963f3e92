use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;

use crate::adapters::http::{
  dtos::{ChartQuery, DateRangeQuery, PeriodQuery},
  errors::ApiError,
};
use crate::application::analytics::{
  AnalyticsUseCase, ChartDataUseCase, DashboardSummaryUseCase, ExportStatsUseCase,
  ProfitLossUseCase,
};

use super::requester;

/// GET /api/v1/dashboard
pub async fn dashboard_summary_handler(
  http_req: HttpRequest,
  use_case: web::Data<Arc<DashboardSummaryUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let summary = use_case.execute(requester(&http_req)?).await?;
  Ok(HttpResponse::Ok().json(summary))
}

/// GET /api/v1/dashboard/analytics?period=30
pub async fn analytics_handler(
  http_req: HttpRequest,
  query: web::Query<PeriodQuery>,
  use_case: web::Data<Arc<AnalyticsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let analytics = use_case
    .execute(requester(&http_req)?, query.period.as_deref())
    .await?;
  Ok(HttpResponse::Ok().json(analytics))
}

/// GET /api/v1/dashboard/chart-data?type=revenue&period=7
pub async fn chart_data_handler(
  http_req: HttpRequest,
  query: web::Query<ChartQuery>,
  use_case: web::Data<Arc<ChartDataUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let chart = use_case
    .execute(
      requester(&http_req)?,
      &query.chart,
      query.period.as_deref(),
    )
    .await?;
  Ok(HttpResponse::Ok().json(chart))
}

/// GET /api/v1/dashboard/profit-loss
pub async fn profit_loss_handler(
  http_req: HttpRequest,
  query: web::Query<DateRangeQuery>,
  use_case: web::Data<Arc<ProfitLossUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let report = use_case
    .execute(requester(&http_req)?, query.start_date, query.end_date)
    .await?;
  Ok(HttpResponse::Ok().json(report))
}

/// GET /api/v1/dashboard/export-stats
pub async fn export_stats_handler(
  http_req: HttpRequest,
  use_case: web::Data<Arc<ExportStatsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let stats = use_case.execute(requester(&http_req)?).await?;
  Ok(HttpResponse::Ok().json(stats))
}
