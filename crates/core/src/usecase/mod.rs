//! One operation per verb. Each use case checks that the product's category
//! exists and otherwise forwards gateway results unchanged.

pub mod create;
pub mod delete;
pub mod find_by_category;
pub mod find_one;
pub mod update;

pub use create::CreateProductUseCase;
pub use delete::DeleteProductUseCase;
pub use find_by_category::FindProductsByCategoryUseCase;
pub use find_one::FindOneProductUseCase;
pub use update::UpdateProductUseCase;
