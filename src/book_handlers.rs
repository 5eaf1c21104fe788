use crate::db::BookStore;
use crate::error::ApiError;
use crate::models::{BookInput, Created, Message};
use actix_web::{delete, get, post, put, web, HttpResponse};

#[post("")]
pub async fn add_book(
    store: web::Data<BookStore>,
    body: web::Json<BookInput>,
) -> Result<HttpResponse, ApiError> {
    let store = store.get_ref().clone();
    let book = body.into_inner();

    let id = web::block(move || store.insert(&book))
        .await
        .map_err(|_| ApiError::Internal)??;

    Ok(HttpResponse::Ok().json(Created {
        message: "Book added successfully".to_string(),
        id,
    }))
}

#[get("")]
pub async fn get_books(store: web::Data<BookStore>) -> Result<HttpResponse, ApiError> {
    let store = store.get_ref().clone();

    let books = web::block(move || store.list())
        .await
        .map_err(|_| ApiError::Internal)??;

    if books.is_empty() {
        return Ok(HttpResponse::Ok()
            .json(Message::new("No books to show! Please add some books first!")));
    }

    Ok(HttpResponse::Ok().json(books))
}

#[get("/{id}")]
pub async fn get_book(
    store: web::Data<BookStore>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let store = store.get_ref().clone();
    let id = path.into_inner();

    let book = web::block(move || store.get(id))
        .await
        .map_err(|_| ApiError::Internal)??;

    match book {
        Some(book) => Ok(HttpResponse::Ok().json(book)),
        None => Err(ApiError::NotFound),
    }
}

#[put("/{id}")]
pub async fn update_book(
    store: web::Data<BookStore>,
    path: web::Path<i64>,
    body: web::Json<BookInput>,
) -> Result<HttpResponse, ApiError> {
    let store = store.get_ref().clone();
    let id = path.into_inner();
    let book = body.into_inner();

    web::block(move || store.update(id, &book))
        .await
        .map_err(|_| ApiError::Internal)??;

    Ok(HttpResponse::Ok().json(Message::new("Book updated successfully")))
}

#[delete("/{id}")]
pub async fn delete_book(
    store: web::Data<BookStore>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let store = store.get_ref().clone();
    let id = path.into_inner();

    let deleted = web::block(move || store.delete(id))
        .await
        .map_err(|_| ApiError::Internal)??;

    if deleted == 0 {
        return Ok(HttpResponse::Ok().json(Message::new("Book doesn't exist")));
    }

    Ok(HttpResponse::Ok().json(Message::new("Book deleted successfully")))
}
