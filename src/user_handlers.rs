use crate::auth::TokenService;
use crate::db::Credentials;
use crate::error::ApiError;
use crate::models::{LoginRequest, LoginResponse};
use actix_web::{get, post, web, HttpResponse, Responder};
use bcrypt::verify;

#[get("/")]
pub async fn index() -> impl Responder {
    let html = r#"
    <!DOCTYPE html>
    <html>
    <head>
        <title>Bookshelf API</title>
        <style>
            body {
                background-color: #fdf6e3;
                color: #333;
                font-family: monospace;
                padding: 40px;
            }
            code {
                background: #eee8d5;
                padding: 2px 6px;
                border-radius: 4px;
            }
            li {
                margin-bottom: 10px;
            }
        </style>
    </head>
    <body>
        <h1>Bookshelf API</h1>
        <p>Available endpoints:</p>
        <ul>
            <li><code>GET /</code> &ndash; This help page</li>
            <li><code>GET /health</code> &ndash; Health check (returns OK)</li>
            <li><code>POST /login</code> &ndash; Exchange credentials for a token</li>
            <li><code>GET /books</code> &ndash; List all books (token required)</li>
            <li><code>POST /books</code> &ndash; Add a book (token required)</li>
            <li><code>GET /books/{id}</code> &ndash; Fetch one book (token required)</li>
            <li><code>PUT /books/{id}</code> &ndash; Update a book (token required)</li>
            <li><code>DELETE /books/{id}</code> &ndash; Delete a book (token required)</li>
        </ul>
        <p>Protected routes expect the raw token in the <code>Authorization</code> header.</p>
    </body>
    </html>
    "#;

    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}

/// Simple health check
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

#[post("/login")]
pub async fn login(
    credentials: web::Data<Credentials>,
    tokens: web::Data<TokenService>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Some(user) = credentials.get(&body.username) {
        if verify(&body.password, &user.password_hash).unwrap_or(false) {
            let token = tokens.issue(&user.username)?;
            return Ok(HttpResponse::Ok().json(LoginResponse { token }));
        }
    }
    Err(ApiError::InvalidCredentials)
}
