//! Seed demo data for a user.
//!
//! Creates `count` books and `count` products owned by the given user. The
//! default of 13 fills two full dashboard pages and one partial page.

use bookstall_core::{Email, Price};
use bookstall_storefront::db::{BookRepository, ProductRepository, UserRepository};
use bookstall_storefront::models::{BookChanges, NewProduct};

use super::{CommandError, connect};

const TITLES: [&str; 8] = [
    "The Quiet Harbor",
    "Maps of Forgotten Rivers",
    "A Field Guide to Small Things",
    "Letters from the Lighthouse",
    "The Clockmaker's Daughter",
    "Salt and Ember",
    "Notes on Winter",
    "The Last Tram Home",
];

const AUTHORS: [&str; 4] = ["Ada Marsh", "Tomas Reyes", "Ines Kowalski", "June Okafor"];

/// Insert demo records for `owner_email`.
///
/// # Errors
///
/// Returns `CommandError::UnknownUser` if no such user exists, or a database
/// error if an insert fails.
pub async fn run(owner_email: &str, count: u32) -> Result<(), CommandError> {
    let pool = connect().await?;

    let email = Email::parse(owner_email)?;
    let owner = UserRepository::new(&pool)
        .get_by_email(&email)
        .await?
        .ok_or_else(|| CommandError::UnknownUser(email.to_string()))?;

    let books = BookRepository::new(&pool);
    let products = ProductRepository::new(&pool);

    for n in 0..count {
        let title = demo_title(n);
        let author = AUTHORS
            .get(n as usize % AUTHORS.len())
            .copied()
            .unwrap_or("Anonymous");

        let changes = BookChanges {
            title: title.clone(),
            author: author.to_owned(),
            description: format!("{title} by {author}. A demo listing."),
        };
        books.create(owner.id, &changes).await?;

        let product = NewProduct {
            title: format!("{title} (paperback)"),
            description: format!("Paperback edition of {title}."),
            price: demo_price(n),
            // Every fifth product starts hidden so the toggle has something to show.
            visible: n % 5 != 4,
        };
        products.create(owner.id, &product).await?;
    }

    tracing::info!(owner = %email, count, "seeded demo books and products");
    Ok(())
}

/// $8.99 plus $1.50 per step, saturating for very large counts.
fn demo_price(n: u32) -> Price {
    Price::from_cents(n.saturating_mul(150).saturating_add(899))
}

fn demo_title(n: u32) -> String {
    let base = TITLES
        .get(n as usize % TITLES.len())
        .copied()
        .unwrap_or("Untitled");
    let volume = n as usize / TITLES.len();
    if volume == 0 {
        base.to_owned()
    } else {
        format!("{base}, Vol. {}", volume + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_titles_are_unique() {
        let titles: std::collections::HashSet<_> = (0..20).map(demo_title).collect();
        assert_eq!(titles.len(), 20);
    }

    #[test]
    fn test_demo_price_never_overflows() {
        assert_eq!(demo_price(0), Price::from_cents(899));
        assert_eq!(demo_price(2), Price::from_cents(1199));
        assert_eq!(demo_price(u32::MAX), Price::from_cents(u32::MAX));
        assert_eq!(demo_price(30_000_000), Price::from_cents(u32::MAX));
    }
}
