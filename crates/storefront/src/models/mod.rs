//! Domain models for storefront.

pub mod book;
pub mod cart;
pub mod product;
pub mod session;
pub mod user;

pub use book::{Book, BookChanges, BookChangesError};
pub use cart::{Cart, CartLine};
pub use product::{NewProduct, Product};
pub use session::{CurrentUser, SessionInfo, keys as session_keys};
pub use user::User;
