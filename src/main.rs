mod auth;
mod book_handlers;
mod config;
mod db;
mod error;
mod models;
mod routes;
mod user_handlers;

use crate::auth::TokenService;
use crate::config::Config;
use crate::db::{BookStore, Credentials};
use actix_web::{middleware, web, App, HttpServer};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();

    let store = match BookStore::open(&config.database_path) {
        Ok(store) => store,
        Err(err) => {
            log::error!("Failed to open the database {}: {}", config.database_path, err);
            std::process::exit(1);
        }
    };

    let mut credentials = Credentials::new();
    if let Err(err) = credentials.add_user(&config.seed_username, &config.seed_password) {
        log::error!("Failed to provision credentials: {}", err);
        std::process::exit(1);
    }

    let store = web::Data::new(store);
    let credentials = web::Data::new(credentials);
    let tokens = web::Data::new(TokenService::new(&config.jwt_secret));

    let addr = config.bind_addr();
    log::info!("Starting the server at {}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .app_data(credentials.clone())
            .app_data(tokens.clone())
            .wrap(middleware::Logger::default())
            .configure(routes::configure)
    })
    .bind(addr)?
    .run()
    .await
}
