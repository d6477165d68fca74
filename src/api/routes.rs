// src/api/routes.rs
use actix_web::web;
use crate::api::handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(handlers::health_check))
            .route("/users", web::get().to(handlers::find_users))
            .route("/users/{phone}/name", web::get().to(handlers::user_name))
            .route("/fees/{phone}/summary", web::get().to(handlers::fee_summary))
            .route("/calls/{phone}", web::get().to(handlers::call_details))
            .route("/ledger/recompute", web::post().to(handlers::recompute_ledger))
    );
}
