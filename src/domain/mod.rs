pub mod book;
pub mod commands;
pub mod errors;
pub mod ledger;
pub mod member;
pub mod record;
pub mod value_objects;

pub use book::Book;
pub use errors::*;
pub use member::Member;
pub use record::BorrowRecord;
pub use value_objects::*;
