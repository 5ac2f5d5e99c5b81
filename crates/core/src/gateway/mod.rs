//! Translation between domain entities and what backs them.

pub mod category;
pub mod product;

pub use category::CategoryGateway;
pub use product::ProductGateway;
