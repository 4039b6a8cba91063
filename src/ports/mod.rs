pub mod catalog_store;
pub mod clock;
pub mod member_store;

pub use catalog_store::CatalogStore;
pub use clock::Clock;
pub use member_store::MemberStore;
