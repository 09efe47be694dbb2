use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use lottery_backend::{
    config::Config, handlers, middlewares::create_cors, services::LotteryService,
    storage::Stores, swagger::swagger_config,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // 加载配置
    let config = Config::from_toml().expect("Failed to load configuration");

    // 打开四个数据文件（不存在则为空）
    let stores = Stores::open(&config.storage)
        .await
        .expect("Failed to open data store");

    if config.lottery.rng_seed.is_some() {
        log::warn!("Lottery RNG is running with a fixed seed");
    }
    let lottery_service = LotteryService::from_config(stores, &config.lottery);

    log::info!(
        "Starting HTTP server at {}:{} (data dir: {})",
        config.server.host,
        config.server.port,
        config.storage.data_dir.display()
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .app_data(web::Data::new(lottery_service.clone()))
            .configure(swagger_config)
            .configure(handlers::api_config)
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
