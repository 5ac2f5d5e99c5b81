use chrono::{SecondsFormat, TimeZone, Utc};
use tracing::info;

use crate::connection::DbPool;

/// Deterministic demo products, one or more per reference category. Ids are
/// UUIDv7 values stamped with the seed timestamp, so they sort in listing order.
const SEED_PRODUCTS: &[SeedProductContract] = &[
    SeedProductContract {
        id: "018cc251-f400-7000-8000-000000000001",
        name: "Cheese Crackers",
        description: "Baked crackers with aged cheddar",
        category_id: 1,
        amount: "3.50",
    },
    SeedProductContract {
        id: "018cc251-f400-7000-8000-000000000002",
        name: "Trail Mix",
        description: "Nuts, raisins and dark chocolate",
        category_id: 1,
        amount: "4.25",
    },
    SeedProductContract {
        id: "018cc251-f400-7000-8000-000000000003",
        name: "French Fries",
        description: "Large portion, sea salt",
        category_id: 2,
        amount: "5.90",
    },
    SeedProductContract {
        id: "018cc251-f400-7000-8000-000000000004",
        name: "Lemonade",
        description: "Fresh squeezed, 500ml",
        category_id: 3,
        amount: "4.00",
    },
    SeedProductContract {
        id: "018cc251-f400-7000-8000-000000000005",
        name: "Chocolate Cake",
        description: "Slice of triple chocolate cake",
        category_id: 4,
        amount: "7.75",
    },
];

/// Demo catalog used by `prodcat seed` and by smoke tests.
pub struct DemoCatalogSeed;

impl DemoCatalogSeed {
    /// Inserts the demo products. Existing rows with the same ids are left
    /// untouched, so loading twice is harmless.
    pub async fn load(pool: &DbPool) -> Result<SeedResult, sqlx::Error> {
        let seeded_at = seed_timestamp();
        let mut tx = pool.begin().await?;
        let mut inserted = 0;

        for product in SEED_PRODUCTS {
            let result = sqlx::query(
                "INSERT OR IGNORE INTO product
                 (id, name, description, category_id, amount, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
            )
            .bind(product.id)
            .bind(product.name)
            .bind(product.description)
            .bind(product.category_id)
            .bind(product.amount)
            .bind(&seeded_at)
            .execute(&mut *tx)
            .await?;
            inserted += result.rows_affected();
        }

        tx.commit().await?;
        info!(
            event_name = "db.seed.loaded",
            inserted,
            total = SEED_PRODUCTS.len(),
            "demo catalog seed applied"
        );

        let products_seeded = SEED_PRODUCTS
            .iter()
            .map(|product| SeedProductInfo {
                product_id: product.id,
                name: product.name,
                category_id: product.category_id,
            })
            .collect();

        Ok(SeedResult { inserted, products_seeded })
    }

    /// Checks that every demo product is present in its category.
    pub async fn verify(pool: &DbPool) -> Result<VerificationResult, sqlx::Error> {
        let mut checks = Vec::with_capacity(SEED_PRODUCTS.len());

        for product in SEED_PRODUCTS {
            let present: i64 = sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM product WHERE id = ?1 AND category_id = ?2)",
            )
            .bind(product.id)
            .bind(product.category_id)
            .fetch_one(pool)
            .await?;
            checks.push((product.id, present == 1));
        }

        let all_present = checks.iter().all(|(_, present)| *present);
        Ok(VerificationResult { all_present, checks })
    }

    pub async fn clean(pool: &DbPool) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut removed = 0;
        for product in SEED_PRODUCTS {
            removed += sqlx::query("DELETE FROM product WHERE id = ?1")
                .bind(product.id)
                .execute(&mut *tx)
                .await?
                .rows_affected();
        }
        tx.commit().await?;
        Ok(removed)
    }
}

fn seed_timestamp() -> String {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Nanos, true)
}

#[derive(Debug, Clone, Copy)]
struct SeedProductContract {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    category_id: i64,
    amount: &'static str,
}

#[derive(Debug)]
pub struct SeedResult {
    pub inserted: u64,
    pub products_seeded: Vec<SeedProductInfo>,
}

#[derive(Debug)]
pub struct SeedProductInfo {
    pub product_id: &'static str,
    pub name: &'static str,
    pub category_id: i64,
}

#[derive(Debug)]
pub struct VerificationResult {
    pub all_present: bool,
    pub checks: Vec<(&'static str, bool)>,
}
