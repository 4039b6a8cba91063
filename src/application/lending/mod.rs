mod errors;
mod lending_service;
mod queries;

pub use errors::{ErrorKind, LendingError, Result};
pub use lending_service::{
    FINE_BLOCK_THRESHOLD, MAX_BORROWED, ServiceDependencies, add_book, calculate_fine,
    checkout_book, register_member, return_book,
};
pub use queries::{available_books, borrowing_history};
