use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer};
use std::io;

use taskdesk::config::Config;
use taskdesk::routes::{self, health};
use taskdesk::{db, AppState};

fn to_io_error(error: taskdesk::AppError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, error.to_string())
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;

    let state = match &config.database_url {
        Some(url) => {
            let pool = db::connect(url, config.max_db_connections)
                .await
                .map_err(to_io_error)?;
            if config.run_migrations {
                db::migrate(&pool).await.map_err(to_io_error)?;
            }
            AppState::postgres(pool, config.auth.clone())
        }
        None => {
            log::warn!("DATABASE_URL is not set; using in-memory storage");
            AppState::in_memory(config.auth.clone())
        }
    };

    log::info!("Starting taskdesk server at {}", config.server_url());

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(|cfg| state.configure(cfg))
            .service(health::health)
            .configure(routes::config)
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
