use actix_web::{HttpResponse, ResponseError, Result, web};

use crate::models::*;
use crate::services::LotteryService;

#[utoipa::path(
    get,
    path = "/admin/draws",
    tag = "admin",
    responses(
        (status = 200, description = "获取开奖列表成功", body = [Draw])
    )
)]
pub async fn list_draws(service: web::Data<LotteryService>) -> Result<HttpResponse> {
    let draws = service.list_draws().await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(draws)))
}

#[utoipa::path(
    post,
    path = "/admin/draws",
    tag = "admin",
    responses(
        (status = 200, description = "创建开奖成功", body = Draw),
        (status = 409, description = "已有进行中的开奖")
    )
)]
pub async fn create_draw(service: web::Data<LotteryService>) -> Result<HttpResponse> {
    match service.create_draw().await {
        Ok(draw) => Ok(HttpResponse::Ok().json(ApiResponse::success(draw))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/draws/pending",
    tag = "admin",
    responses(
        (status = 200, description = "获取进行中的开奖成功", body = Draw),
        (status = 404, description = "没有进行中的开奖")
    )
)]
pub async fn get_pending_draw(service: web::Data<LotteryService>) -> Result<HttpResponse> {
    match service.get_pending_draw().await {
        Ok(draw) => Ok(HttpResponse::Ok().json(ApiResponse::success(draw))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/draws/execute",
    tag = "admin",
    request_body = ExecuteDrawRequest,
    responses(
        (status = 200, description = "开奖并结算完成", body = Draw),
        (status = 404, description = "开奖不存在"),
        (status = 409, description = "该期已开奖")
    )
)]
/// 开奖：生成中奖号码并对该期全部彩票结算
pub async fn execute_draw(
    service: web::Data<LotteryService>,
    request: web::Json<ExecuteDrawRequest>,
) -> Result<HttpResponse> {
    match service.execute_draw(&request.draw_id).await {
        Ok(draw) => Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
            draw,
            "Draw executed successfully",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/stats",
    tag = "admin",
    responses(
        (status = 200, description = "获取统计成功", body = Stats)
    )
)]
pub async fn get_stats(service: web::Data<LotteryService>) -> Result<HttpResponse> {
    let stats = service.get_stats().await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(stats)))
}

#[utoipa::path(
    get,
    path = "/admin/prizes",
    tag = "admin",
    responses(
        (status = 200, description = "获取已发放奖品成功", body = [Prize])
    )
)]
pub async fn get_prizes(service: web::Data<LotteryService>) -> Result<HttpResponse> {
    let prizes = service.get_all_prizes().await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(prizes)))
}

#[utoipa::path(
    get,
    path = "/admin/prize-catalog",
    tag = "admin",
    responses(
        (status = 200, description = "获取奖品目录成功", body = [PrizeTier])
    )
)]
pub async fn get_prize_catalog(service: web::Data<LotteryService>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(service.list_prize_catalog())))
}

pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/draws", web::get().to(list_draws))
            .route("/draws", web::post().to(create_draw))
            .route("/draws/pending", web::get().to(get_pending_draw))
            .route("/draws/execute", web::post().to(execute_draw))
            .route("/stats", web::get().to(get_stats))
            .route("/prizes", web::get().to(get_prizes))
            .route("/prize-catalog", web::get().to(get_prize_catalog)),
    );
}
