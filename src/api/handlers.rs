// src/api/handlers.rs
use actix_web::{web, HttpResponse};
use crate::error::BillingError;
use crate::models::{HealthResponse, RecomputeResponse, UserNameResponse, UserSearchQuery};
use crate::services::{QueryService, RecomputeScheduler};
use chrono::Utc;
use std::sync::Arc;

pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: "telecom-billing-engine".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Fuzzy lookup by name. A blank `name` returns an empty list.
pub async fn find_users(
    query: web::Query<UserSearchQuery>,
    query_service: web::Data<Arc<QueryService>>,
) -> HttpResponse {
    HttpResponse::Ok().json(query_service.find_users_by_name(&query.name))
}

pub async fn user_name(
    phone: web::Path<String>,
    query_service: web::Data<Arc<QueryService>>,
) -> HttpResponse {
    let phone_number = phone.into_inner();
    let user_name = query_service.get_user_name(&phone_number);

    HttpResponse::Ok().json(UserNameResponse {
        phone_number,
        user_name,
    })
}

pub async fn fee_summary(
    phone: web::Path<String>,
    query_service: web::Data<Arc<QueryService>>,
) -> HttpResponse {
    HttpResponse::Ok().json(query_service.fee_summary(&phone).await)
}

pub async fn call_details(
    phone: web::Path<String>,
    query_service: web::Data<Arc<QueryService>>,
) -> HttpResponse {
    HttpResponse::Ok().json(query_service.call_details(&phone).await)
}

/// Runs a recompute cycle immediately, outside the timer.
pub async fn recompute_ledger(
    scheduler: web::Data<Arc<RecomputeScheduler>>,
) -> Result<HttpResponse, BillingError> {
    let snapshot = scheduler.run_cycle().await.map_err(|e| {
        tracing::error!("Manual recompute failed: {}", e);
        e
    })?;

    Ok(HttpResponse::Ok().json(RecomputeResponse {
        success: true,
        calls: snapshot.calls.len(),
        fees: snapshot.fees.len(),
        computed_at: snapshot.computed_at.unwrap_or_else(Utc::now),
    }))
}
