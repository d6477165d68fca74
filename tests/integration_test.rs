// tests/integration_test.rs
#[cfg(test)]
mod tests {
    use actix_web::{test, web, App};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use std::time::Duration;
    use telecom_billing_engine::api::routes;
    use telecom_billing_engine::models::{CallRecord, CallType};
    use telecom_billing_engine::storage::{JsonFileStorage, Storage};
    use telecom_billing_engine::BillingEngine;
    use tempfile::TempDir;

    async fn engine(dir: &TempDir) -> BillingEngine {
        let storage: Arc<dyn Storage> = Arc::new(JsonFileStorage::new(dir.path()));
        let engine = BillingEngine::bootstrap(storage, Duration::from_secs(5)).await;
        engine.scheduler.run_cycle().await.unwrap();
        engine
    }

    macro_rules! app {
        ($engine:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($engine.query.clone()))
                    .app_data(web::Data::new($engine.scheduler.clone()))
                    .configure(routes::configure),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_health_endpoint() {
        let app = test::init_service(
            App::new().configure(routes::configure)
        ).await;

        let req = test::TestRequest::get()
            .uri("/api/v1/health")
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    #[actix_web::test]
    async fn test_fee_summary_for_seeded_caller() {
        let dir = TempDir::new().unwrap();
        let engine = engine(&dir).await;
        let app = app!(engine);

        let req = test::TestRequest::get()
            .uri("/api/v1/fees/13800000001/summary")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["userName"], "张三");
        assert_eq!(body["localSum"], json!(1.0));
        assert_eq!(body["longDistanceSum"], json!(1.8));
        assert_eq!(body["totalSum"], json!(2.8));
    }

    #[actix_web::test]
    async fn test_fee_summary_without_calls() {
        let dir = TempDir::new().unwrap();
        let engine = engine(&dir).await;
        let app = app!(engine);

        let req = test::TestRequest::get()
            .uri("/api/v1/fees/19999999999/summary")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["userName"], "unknown user");
        assert_eq!(body["totalSum"], json!(0.0));
    }

    #[actix_web::test]
    async fn test_find_users_by_name() {
        let dir = TempDir::new().unwrap();
        let engine = engine(&dir).await;
        let app = app!(engine);

        let req = test::TestRequest::get()
            .uri("/api/v1/users?name=%E5%BC%A0")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|u| u["userName"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["张三", "张三丰"]);

        let req = test::TestRequest::get().uri("/api/v1/users?name=").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!([]));
    }

    #[actix_web::test]
    async fn test_user_name_lookup() {
        let dir = TempDir::new().unwrap();
        let engine = engine(&dir).await;
        let app = app!(engine);

        let req = test::TestRequest::get()
            .uri("/api/v1/users/13800000002/name")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["userName"], "李四");
    }

    #[actix_web::test]
    async fn test_call_details_listing() {
        let dir = TempDir::new().unwrap();
        let engine = engine(&dir).await;
        let app = app!(engine);

        let req = test::TestRequest::get()
            .uri("/api/v1/calls/13800000001")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let calls = body.as_array().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0]["callId"], "C001");
        assert_eq!(calls[0]["calleeName"], "王五");
        assert_eq!(calls[0]["callType"], "long-distance");
        assert_eq!(calls[1]["callId"], "C002");
        assert_eq!(calls[1]["callerName"], "张三");
    }

    #[actix_web::test]
    async fn test_recompute_picks_up_appended_calls() {
        let dir = TempDir::new().unwrap();
        let engine = engine(&dir).await;
        let app = app!(engine);

        engine
            .storage
            .append_call(&CallRecord {
                call_id: "C0004".to_string(),
                caller_number: "13900000003".to_string(),
                callee_number: "13800000001".to_string(),
                start_time: "2025-11-18 12:00:00".to_string(),
                duration_seconds: 400,
                call_type: CallType::Local,
                long_distance_area_code: None,
            })
            .await
            .unwrap();

        // Not visible until the next cycle.
        let before = engine.query.fee_summary("13900000003").await;
        assert!(before.total_sum.is_zero());

        let req = test::TestRequest::post()
            .uri("/api/v1/ledger/recompute")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["fees"], 4);

        let req = test::TestRequest::get()
            .uri("/api/v1/fees/13900000003/summary")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        // 400s -> 7 min -> 0.50 + 2 * 0.20
        assert_eq!(body["userName"], "张三丰");
        assert_eq!(body["totalSum"], json!(0.9));
    }

    #[actix_web::test]
    async fn test_persisted_ledger_restored_on_restart() {
        let dir = TempDir::new().unwrap();
        drop(engine(&dir).await);

        let storage: Arc<dyn Storage> = Arc::new(JsonFileStorage::new(dir.path()));
        let restarted = BillingEngine::bootstrap(storage, Duration::from_secs(5)).await;

        let snapshot = restarted.ledger.snapshot().await;
        assert_eq!(snapshot.fees.len(), 3);
        assert!(snapshot.computed_at.is_none());
    }

    #[actix_web::test]
    async fn test_bootstrap_with_incomplete_catalog_rows() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("users.json"),
            json!({"users": [
                {"userId": "U001", "phoneNumber": "13800000001"},
                {"userId": "U002", "userName": "李四", "phoneNumber": "13800000002"}
            ]})
            .to_string(),
        )
        .unwrap();
        std::fs::write(
            dir.path().join("rates.json"),
            json!({"longDistanceRates": [{"areaCode": "010", "areaName": "北京"}]}).to_string(),
        )
        .unwrap();

        let engine = engine(&dir).await;
        assert_eq!(engine.catalog.users().len(), 2);
        assert_eq!(engine.catalog.rates().len(), 1);

        let app = app!(engine);
        let req = test::TestRequest::get()
            .uri("/api/v1/fees/13800000001/summary")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        // The 010 call is still rated; a rate without ratePerMinute is free.
        assert_eq!(body["userName"], "");
        assert_eq!(body["localSum"], json!(1.0));
        assert_eq!(body["longDistanceSum"], json!(0.0));
        assert_eq!(body["totalSum"], json!(1.0));

        let req = test::TestRequest::get()
            .uri("/api/v1/users/13800000002/name")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["userName"], "李四");
    }

    #[actix_web::test]
    async fn test_bootstrap_with_unreadable_users_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("users.json"), "{ not json").unwrap();

        let engine = engine(&dir).await;
        assert!(engine.catalog.users().is_empty());
        assert_eq!(engine.catalog.rates().len(), 3);

        let summary = engine.query.fee_summary("13800000001").await;
        assert_eq!(summary.user_name, "unknown user");
        assert_eq!(summary.total_sum, rust_decimal_macros::dec!(2.80));
    }
}
