pub mod catalog;
pub mod command;
pub mod config;
pub mod controller;
pub mod domain;
pub mod errors;
pub mod gateway;
pub mod presenter;
pub mod store;
pub mod usecase;

pub use catalog::{CategoryCatalog, StaticCategoryCatalog};
pub use command::{CreateProduct, UpdateProduct};
pub use controller::ProductControllers;
pub use domain::category::{Category, CategoryId};
pub use domain::product::{Product, ProductId};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use presenter::{CategoryOutput, ProductContent, ProductOutput};
pub use store::{ProductRecord, ProductStore, StoreError};
