pub mod catalog_store;
pub mod member_store;

pub use catalog_store::CatalogStore;
pub use member_store::MemberStore;
