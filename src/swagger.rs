use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::user::register,
        handlers::user::login,
        handlers::user::get_user,
        handlers::ticket::create_ticket,
        handlers::ticket::get_user_tickets,
        handlers::ticket::get_ticket_detail,
        handlers::admin::list_draws,
        handlers::admin::create_draw,
        handlers::admin::get_pending_draw,
        handlers::admin::execute_draw,
        handlers::admin::get_stats,
        handlers::admin::get_prizes,
        handlers::admin::get_prize_catalog,
    ),
    components(
        schemas(
            UserResponse,
            RegisterRequest,
            LoginRequest,
            Draw,
            DrawStatus,
            ExecuteDrawRequest,
            Ticket,
            CreateTicketRequest,
            TicketDetail,
            UserTicketView,
            Prize,
            PrizeType,
            PrizeTemplate,
            PrizeTier,
            Stats,
            PrizesByType,
            ApiError,
        )
    ),
    tags(
        (name = "user", description = "User registration and login API"),
        (name = "ticket", description = "Ticket purchase API"),
        (name = "admin", description = "Draw management and statistics API"),
    ),
    info(
        title = "Lottery Backend API",
        version = "0.1.0",
        description = "Simulated numbers-lottery REST API documentation"
    ),
    servers(
        (url = "/api", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
