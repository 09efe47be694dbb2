use actix_web::{HttpResponse, ResponseError, Result, web};

use crate::models::*;
use crate::services::LotteryService;

#[utoipa::path(
    post,
    path = "/tickets",
    tag = "ticket",
    request_body = CreateTicketRequest,
    responses(
        (status = 200, description = "购票成功", body = Ticket),
        (status = 400, description = "号码无效或余额不足"),
        (status = 404, description = "用户或开奖不存在"),
        (status = 409, description = "该期已停止售票")
    )
)]
pub async fn create_ticket(
    service: web::Data<LotteryService>,
    request: web::Json<CreateTicketRequest>,
) -> Result<HttpResponse> {
    let request = request.into_inner();
    match service
        .create_ticket(&request.user_id, &request.draw_id, request.numbers)
        .await
    {
        Ok(ticket) => Ok(HttpResponse::Ok().json(ApiResponse::success(ticket))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/tickets/user",
    tag = "ticket",
    params(
        ("user_id" = String, Query, description = "用户ID")
    ),
    responses(
        (status = 200, description = "获取用户彩票成功", body = [UserTicketView])
    )
)]
/// 用户全部彩票（倒序），每项附带奖品与开奖状态
pub async fn get_user_tickets(
    service: web::Data<LotteryService>,
    query: web::Query<UserTicketsQuery>,
) -> Result<HttpResponse> {
    let tickets = service.get_user_ticket_details(&query.user_id).await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(tickets)))
}

#[utoipa::path(
    get,
    path = "/tickets/detail",
    tag = "ticket",
    params(
        ("id" = String, Query, description = "彩票ID")
    ),
    responses(
        (status = 200, description = "获取彩票详情成功", body = TicketDetail),
        (status = 404, description = "彩票不存在")
    )
)]
pub async fn get_ticket_detail(
    service: web::Data<LotteryService>,
    query: web::Query<TicketDetailQuery>,
) -> Result<HttpResponse> {
    match service.get_ticket_detail(&query.id).await {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(detail))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn ticket_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/tickets")
            .route("", web::post().to(create_ticket))
            .route("/user", web::get().to(get_user_tickets))
            .route("/detail", web::get().to(get_ticket_detail)),
    );
}
