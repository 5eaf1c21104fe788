use crate::{auth, book_handlers, user_handlers};
use actix_web::web;
use actix_web_httpauth::middleware::HttpAuthentication;

/// Registers the public handlers and the token-protected /books scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(user_handlers::index)
        .service(user_handlers::health)
        .service(user_handlers::login)
        .service(
            web::scope("/books")
                .wrap(HttpAuthentication::with_fn(auth::authenticate))
                .service(book_handlers::get_books)
                .service(book_handlers::add_book)
                .service(book_handlers::get_book)
                .service(book_handlers::update_book)
                .service(book_handlers::delete_book),
        );
}
