use actix_web::{HttpResponse, ResponseError, Result, web};

use crate::models::*;
use crate::services::LotteryService;

#[utoipa::path(
    post,
    path = "/register",
    tag = "user",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "注册成功", body = UserResponse),
        (status = 400, description = "用户名或密码为空"),
        (status = 409, description = "用户名已存在")
    )
)]
pub async fn register(
    service: web::Data<LotteryService>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    match service
        .register_user(&request.username, &request.password)
        .await
    {
        Ok(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(user))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "user",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "登录成功", body = UserResponse),
        (status = 401, description = "用户名或密码错误")
    )
)]
pub async fn login(
    service: web::Data<LotteryService>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    match service.login_user(&request.username, &request.password).await {
        Ok(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(user))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/user",
    tag = "user",
    params(
        ("id" = String, Query, description = "用户ID")
    ),
    responses(
        (status = 200, description = "获取用户成功", body = UserResponse),
        (status = 404, description = "用户不存在")
    )
)]
pub async fn get_user(
    service: web::Data<LotteryService>,
    query: web::Query<UserQuery>,
) -> Result<HttpResponse> {
    match service.get_user(&query.id).await {
        Ok(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(user))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn user_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/login", web::post().to(login))
        .route("/user", web::get().to(get_user));
}
