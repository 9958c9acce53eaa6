//! The core gate and paginator driven with storefront models.
//!
//! In-memory collaborators stand in for the session and the database so the
//! ordering of the gate's checks can be observed directly.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;

use bookstall_core::{
    BookId, Email, FetchResult, GateError, Paginator, PaginationOptions, ResourceStore,
    SessionValidator, UserId, Validated, gate,
};
use bookstall_storefront::models::{Book, CurrentUser, SessionInfo};

#[derive(Debug, PartialEq, Eq)]
enum Fault {
    Offline,
}

struct FakeSession(Result<Option<CurrentUser>, ()>);

impl SessionValidator for FakeSession {
    type Principal = CurrentUser;
    type Session = SessionInfo;
    type Error = Fault;

    async fn validate(&self) -> Result<Validated<CurrentUser, SessionInfo>, Fault> {
        match &self.0 {
            Ok(Some(user)) => Ok(Validated::authenticated(
                user.clone(),
                SessionInfo {
                    id: "test-session".to_string(),
                    expires_at: None,
                },
            )),
            Ok(None) => Ok(Validated::anonymous()),
            Err(()) => Err(Fault::Offline),
        }
    }
}

#[derive(Default)]
struct Shelf {
    books: HashMap<BookId, Book>,
    offline: bool,
    lookups: AtomicUsize,
}

impl Shelf {
    fn with(books: impl IntoIterator<Item = Book>) -> Self {
        Self {
            books: books.into_iter().map(|b| (b.id, b)).collect(),
            ..Self::default()
        }
    }
}

impl ResourceStore for Shelf {
    type Id = BookId;
    type Resource = Book;
    type Error = Fault;

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, Fault> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.offline {
            return Err(Fault::Offline);
        }
        Ok(self.books.get(&id).cloned())
    }
}

fn user(id: i32) -> CurrentUser {
    CurrentUser {
        id: UserId::new(id),
        email: Email::parse(&format!("user{id}@example.com")).unwrap(),
        name: format!("User {id}"),
    }
}

fn book(id: i32, owner: i32) -> Book {
    let now = Utc::now();
    Book {
        id: BookId::new(id),
        owner_id: UserId::new(owner),
        title: format!("Book {id}"),
        author: "Someone".to_string(),
        description: String::new(),
        created_at: now,
        updated_at: now,
    }
}

fn signed_in(id: i32) -> FakeSession {
    FakeSession(Ok(Some(user(id))))
}

// =============================================================================
// Gate
// =============================================================================

#[tokio::test]
async fn test_owner_opens_own_book() {
    let shelf = Shelf::with([book(1, 10)]);
    let opened = gate::open(&signed_in(10), &shelf, BookId::new(1))
        .await
        .unwrap();
    assert_eq!(opened.title, "Book 1");
}

#[tokio::test]
async fn test_foreign_and_missing_books_look_the_same() {
    let shelf = Shelf::with([book(1, 20)]);

    let foreign = gate::open(&signed_in(10), &shelf, BookId::new(1)).await;
    let missing = gate::open(&signed_in(10), &shelf, BookId::new(2)).await;

    assert!(matches!(foreign, Err(GateError::NotFound)));
    assert!(matches!(missing, Err(GateError::NotFound)));
}

#[tokio::test]
async fn test_anonymous_never_reaches_store() {
    let shelf = Shelf::with([book(1, 10)]);
    let result = gate::open(&FakeSession(Ok(None)), &shelf, BookId::new(1)).await;

    assert!(matches!(result, Err(GateError::NotFound)));
    assert_eq!(shelf.lookups.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_faults_are_unavailable_not_not_found() {
    let shelf = Shelf {
        offline: true,
        ..Shelf::default()
    };
    let store_fault = gate::open(&signed_in(10), &shelf, BookId::new(1)).await;
    assert!(matches!(store_fault, Err(GateError::Unavailable(Fault::Offline))));

    let shelf = Shelf::with([book(1, 10)]);
    let session_fault = gate::open(&FakeSession(Err(())), &shelf, BookId::new(1)).await;
    assert!(matches!(
        session_fault,
        Err(ref e) if e.is_retryable()
    ));
    assert_eq!(shelf.lookups.load(Ordering::SeqCst), 0);
}

// =============================================================================
// Pagination over fetched books
// =============================================================================

fn six_per_page() -> PaginationOptions {
    PaginationOptions::per_page(NonZeroUsize::new(6).unwrap())
}

#[test]
fn test_thirteen_books_make_three_pages() {
    let books: Vec<Book> = (1..=13).map(|id| book(id, 10)).collect();
    let mut paginator = Paginator::new(books, six_per_page());

    assert_eq!(paginator.total_pages(), 3);
    assert_eq!(paginator.set_page(3).unwrap(), 3);
    let last: Vec<i32> = paginator
        .visible_items()
        .iter()
        .map(|b| b.id.as_i32())
        .collect();
    assert_eq!(last, vec![13]);
}

#[test]
fn test_pages_partition_the_collection() {
    let books: Vec<Book> = (1..=13).map(|id| book(id, 10)).collect();
    let mut paginator = Paginator::new(books.clone(), six_per_page());

    let mut seen = Vec::new();
    for page in paginator.page_numbers() {
        paginator.set_page(page).unwrap();
        seen.extend(paginator.visible_items().iter().cloned());
    }
    assert_eq!(seen, books);
}

#[test]
fn test_failed_fetch_feeds_nothing_to_paginator() {
    let fetched: FetchResult<Vec<Book>> = FetchResult::Failure("database offline".into());
    let json = serde_json::to_value(fetched.map(|books| books.len())).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"success": false, "error": "database offline"})
    );
}

#[test]
fn test_refresh_resets_to_first_page() {
    let mut paginator = Paginator::new((1..=13).map(|id| book(id, 10)).collect(), six_per_page());
    paginator.set_page(2).unwrap();

    paginator.replace((1..=4).map(|id| book(id, 10)).collect());

    assert_eq!(paginator.current_page(), 1);
    assert_eq!(paginator.total_pages(), 1);
    assert_eq!(paginator.visible_items().len(), 4);
}
