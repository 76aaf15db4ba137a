//! Domain models for Libris

pub mod author;
pub mod book;
pub mod librarian;
pub mod library;
pub mod user;

pub use author::Author;
pub use book::{Book, BookDetail, BookForm, BookShort};
pub use librarian::Librarian;
pub use library::{Library, LibraryDetail};
pub use user::{Role, User, UserClaims, UserProfile};
