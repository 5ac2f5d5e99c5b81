use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use prodcat_core::store::{ProductRecord, ProductStore, StoreError};
use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::db_error;
use crate::DbPool;

const SELECT_COLUMNS: &str =
    "SELECT id, name, description, category_id, amount, created_at, updated_at FROM product";

pub struct SqlProductStore {
    pool: DbPool,
}

impl SqlProductStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for SqlProductStore {
    async fn create(&self, record: ProductRecord) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO product (id, name, description, category_id, amount, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(&record.id)
        .bind(&record.name)
        .bind(&record.description)
        .bind(record.category_id)
        .bind(record.amount.to_string())
        .bind(encode_timestamp(record.created_at))
        .bind(encode_timestamp(record.updated_at))
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    async fn find_one(&self, id: &str) -> Result<Option<ProductRecord>, StoreError> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        row.as_ref().map(row_to_record).transpose()
    }

    async fn find_by_category(&self, category_id: i64) -> Result<Vec<ProductRecord>, StoreError> {
        let rows = sqlx::query(&format!(
            "{SELECT_COLUMNS} WHERE category_id = ?1 ORDER BY created_at ASC, id ASC"
        ))
        .bind(category_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.iter().map(row_to_record).collect()
    }

    async fn update_by_id(&self, record: ProductRecord) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE product
             SET name = ?2, description = ?3, category_id = ?4, amount = ?5,
                 created_at = ?6, updated_at = ?7
             WHERE id = ?1",
        )
        .bind(&record.id)
        .bind(&record.name)
        .bind(&record.description)
        .bind(record.category_id)
        .bind(record.amount.to_string())
        .bind(encode_timestamp(record.created_at))
        .bind(encode_timestamp(record.updated_at))
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(record.id));
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> Result<String, StoreError> {
        let result = sqlx::query("DELETE FROM product WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(id.to_string())
    }
}

/// Fixed-width nanosecond RFC 3339 so that text ordering matches time ordering.
fn encode_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn decode_timestamp(column: &str, raw: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|value| value.with_timezone(&Utc))
        .map_err(|error| StoreError::Decode(format!("invalid {column} `{raw}`: {error}")))
}

fn row_to_record(row: &SqliteRow) -> Result<ProductRecord, StoreError> {
    let amount_raw: String = row.try_get("amount").map_err(db_error)?;
    let amount = Decimal::from_str(&amount_raw)
        .map_err(|error| StoreError::Decode(format!("invalid amount `{amount_raw}`: {error}")))?;
    let created_at_raw: String = row.try_get("created_at").map_err(db_error)?;
    let updated_at_raw: String = row.try_get("updated_at").map_err(db_error)?;

    Ok(ProductRecord {
        id: row.try_get("id").map_err(db_error)?,
        name: row.try_get("name").map_err(db_error)?,
        description: row.try_get("description").map_err(db_error)?,
        category_id: row.try_get("category_id").map_err(db_error)?,
        amount,
        created_at: decode_timestamp("created_at", &created_at_raw)?,
        updated_at: decode_timestamp("updated_at", &updated_at_raw)?,
    })
}
