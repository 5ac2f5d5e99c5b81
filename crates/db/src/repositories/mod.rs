use prodcat_core::store::StoreError;

pub mod memory;
pub mod product;

pub use memory::InMemoryProductStore;
pub use product::SqlProductStore;

/// Connection, constraint and query failures all surface as `Database`;
/// the message is kept for logs and never shown to API clients.
pub fn db_error(error: sqlx::Error) -> StoreError {
    match error {
        sqlx::Error::ColumnDecode { index, source } => {
            StoreError::Decode(format!("column `{index}`: {source}"))
        }
        other => StoreError::Database(other.to_string()),
    }
}
