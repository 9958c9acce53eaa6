//! Dashboard book handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use bookstall_core::{BookId, FetchResult, gate};

use super::PageQuery;
use crate::db::BookRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::{OptionalAuth, RequireAuth, SessionUserValidator};
use crate::models::{Book, BookChanges, CurrentUser};
use crate::state::AppState;
use crate::views::Listing;

/// Book edit form data.
#[derive(Debug, Deserialize)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub description: String,
}

/// The seller's book listing.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/books/index.html")]
pub struct BooksIndexTemplate {
    pub user: Option<CurrentUser>,
    pub listing: Listing<Book>,
}

/// Book edit page.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/books/edit.html")]
pub struct BookEditTemplate {
    pub user: Option<CurrentUser>,
    pub book: Book,
    pub title: String,
    pub author: String,
    pub description: String,
    pub error: Option<String>,
}

impl BookEditTemplate {
    fn new(user: Option<CurrentUser>, book: Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            description: book.description.clone(),
            user,
            book,
            error: None,
        }
    }
}

/// List the caller's books.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse> {
    let fetched = FetchResult::from_result(
        BookRepository::new(state.pool()).list_by_owner(user.id).await,
        "Failed to fetch books",
    );
    let listing = Listing::build(
        fetched,
        state.pagination(),
        query.page,
        "/dashboard/books",
        &[],
    )?;

    Ok(BooksIndexTemplate {
        user: Some(user),
        listing,
    })
}

/// Show the edit form for one of the caller's books.
pub async fn edit(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    session: Session,
    Path(id): Path<BookId>,
) -> Result<impl IntoResponse> {
    let validator = SessionUserValidator::new(&session, state.pool());
    let book = gate::open(&validator, &BookRepository::new(state.pool()), id).await?;

    Ok(BookEditTemplate::new(user, book))
}

/// Save changes to one of the caller's books.
pub async fn update(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    session: Session,
    Path(id): Path<BookId>,
    Form(form): Form<BookForm>,
) -> Result<Response> {
    let books = BookRepository::new(state.pool());
    let validator = SessionUserValidator::new(&session, state.pool());
    let book = gate::open(&validator, &books, id).await?;

    let changes = match BookChanges::parse(&form.title, &form.author, &form.description) {
        Ok(changes) => changes,
        Err(e) => {
            let page = BookEditTemplate {
                title: form.title,
                author: form.author,
                description: form.description,
                error: Some(e.to_string()),
                ..BookEditTemplate::new(user, book)
            };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
    };

    books.update(book.owner_id, id, &changes).await?;
    tracing::info!(book_id = %id, "book updated");

    Ok(Redirect::to("/dashboard/books").into_response())
}

/// Delete one of the caller's books.
pub async fn delete(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<BookId>,
) -> Result<Redirect> {
    let books = BookRepository::new(state.pool());
    let validator = SessionUserValidator::new(&session, state.pool());
    let book = gate::open(&validator, &books, id).await?;

    books.delete(book.owner_id, id).await?;
    tracing::info!(book_id = %id, "book deleted");

    Ok(Redirect::to("/dashboard/books"))
}
