pub mod admin;
pub mod ticket;
pub mod user;

pub use admin::admin_config;
pub use ticket::ticket_config;
pub use user::user_config;

use actix_web::web;

use crate::error::AppError;

/// 挂载全部业务路由到 /api
pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // 参数缺失或格式错误时同样返回统一的 JSON 错误
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                AppError::ValidationError(format!("Invalid query parameters: {err}")).into()
            }))
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                AppError::ValidationError(format!("Invalid request body: {err}")).into()
            }))
            .configure(user_config)
            .configure(ticket_config)
            .configure(admin_config),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LotteryConfig, StorageConfig};
    use crate::services::{LotteryService, PrizeCatalog};
    use crate::storage::Stores;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use serde_json::{Value, json};

    async fn lottery_service() -> LotteryService {
        let storage = StorageConfig {
            data_dir: std::env::temp_dir().join(format!("lottery-api-{}", uuid::Uuid::new_v4())),
        };
        let stores = Stores::open(&storage).await.unwrap();
        LotteryService::new(
            stores,
            PrizeCatalog::default(),
            StdRng::seed_from_u64(1),
            &LotteryConfig::default(),
        )
    }

    #[actix_web::test]
    async fn test_full_round_over_http() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(lottery_service().await))
                .configure(api_config),
        )
        .await;

        // 注册
        let req = test::TestRequest::post()
            .uri("/api/register")
            .set_json(json!({ "username": "alice", "password": "pw" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["balance"], 10_000);
        assert!(body["data"].get("password").is_none());
        let user_id = body["data"]["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::post()
            .uri("/api/register")
            .set_json(json!({ "username": "alice", "password": "pw" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

        let req = test::TestRequest::post()
            .uri("/api/login")
            .set_json(json!({ "username": "alice", "password": "nope" }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNAUTHORIZED
        );

        // 创建开奖
        let req = test::TestRequest::post().uri("/api/admin/draws").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["status"], "pending");
        let draw_id = body["data"]["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::post().uri("/api/admin/draws").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

        // 购票
        let req = test::TestRequest::post()
            .uri("/api/tickets")
            .set_json(json!({ "user_id": user_id, "draw_id": draw_id, "numbers": [1, 2, 3, 4, 5, 50] }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );

        let req = test::TestRequest::post()
            .uri("/api/tickets")
            .set_json(json!({ "user_id": user_id, "draw_id": draw_id, "numbers": [1, 2, 3, 4, 5, 6] }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["matches"], 0);
        assert!(body["data"].get("prize_id").is_none());
        let ticket_id = body["data"]["id"].as_str().unwrap().to_string();

        // 开奖
        let req = test::TestRequest::post()
            .uri("/api/admin/draws/execute")
            .set_json(json!({ "draw_id": draw_id }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["status"], "completed");
        assert_eq!(body["data"]["winning_numbers"].as_array().unwrap().len(), 6);
        assert_eq!(body["message"], "Draw executed successfully");

        let req = test::TestRequest::post()
            .uri("/api/admin/draws/execute")
            .set_json(json!({ "draw_id": draw_id }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

        let req = test::TestRequest::get()
            .uri("/api/admin/draws/pending")
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        // 查询
        let req = test::TestRequest::get()
            .uri(&format!("/api/tickets/detail?id={ticket_id}"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["ticket"]["id"], ticket_id.as_str());

        let req = test::TestRequest::get()
            .uri(&format!("/api/tickets/user?user_id={user_id}"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["draw_status"], "completed");

        let req = test::TestRequest::get().uri("/api/admin/stats").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["total_users"], 1);
        assert_eq!(body["data"]["total_tickets"], 1);
        assert_eq!(body["data"]["total_draws"], 1);

        let req = test::TestRequest::get()
            .uri("/api/admin/prize-catalog")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 6);
    }

    #[actix_web::test]
    async fn test_unknown_entities_are_not_found() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(lottery_service().await))
                .configure(api_config),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/user?id=missing").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "NOT_FOUND");

        let req = test::TestRequest::get()
            .uri("/api/tickets/detail?id=missing")
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::post()
            .uri("/api/admin/draws/execute")
            .set_json(json!({ "draw_id": "missing" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_malformed_requests_use_error_envelope() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(lottery_service().await))
                .configure(api_config),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/tickets/user").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let req = test::TestRequest::post()
            .uri("/api/register")
            .set_json(json!({ "username": "alice" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
