use crate::commands::{
    current_thread_runtime, load_config, CommandResult, EXIT_DATABASE, EXIT_MIGRATION,
    EXIT_VERIFICATION,
};
use prodcat_db::{connect_with_config, migrations, DbPool, DemoCatalogSeed, SeedProductInfo};

pub fn run() -> CommandResult {
    let config = match load_config("seed") {
        Ok(config) => config,
        Err(failure) => return failure,
    };
    let runtime = match current_thread_runtime("seed") {
        Ok(runtime) => runtime,
        Err(failure) => return failure,
    };

    let result = runtime.block_on(async {
        let pool = connect_with_config(&config.database)
            .await
            .map_err(|error| ("db_connectivity", error.to_string(), EXIT_DATABASE))?;

        let run_result = load_and_verify(&pool).await;
        pool.close().await;
        run_result
    });

    match result {
        Ok(products) => CommandResult::success("seed", seed_summary(&products)),
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("seed", error_class, message, exit_code)
        }
    }
}

async fn load_and_verify(
    pool: &DbPool,
) -> Result<Vec<SeedProductInfo>, (&'static str, String, u8)> {
    migrations::run_pending(pool)
        .await
        .map_err(|error| ("migration", error.to_string(), EXIT_MIGRATION))?;

    let seed_result = DemoCatalogSeed::load(pool)
        .await
        .map_err(|error| ("seed_execution", error.to_string(), EXIT_MIGRATION))?;

    let verification = DemoCatalogSeed::verify(pool)
        .await
        .map_err(|error| ("seed_verification", error.to_string(), EXIT_VERIFICATION))?;

    if verification.all_present {
        Ok(seed_result.products_seeded)
    } else {
        let message = verification_failure_message(&verification.checks);
        Err(("seed_verification", message, EXIT_VERIFICATION))
    }
}

fn seed_summary(products: &[SeedProductInfo]) -> String {
    let lines: Vec<String> = products
        .iter()
        .map(|product| {
            format!("  - {}: {} (category {})", product.product_id, product.name, product.category_id)
        })
        .collect();
    format!("demo catalog loaded with {} products:\n{}", products.len(), lines.join("\n"))
}

fn verification_failure_message(checks: &[(&'static str, bool)]) -> String {
    let missing =
        checks.iter().filter_map(|(check, passed)| (!passed).then_some(*check)).collect::<Vec<_>>();
    if missing.is_empty() {
        "some seed products failed to load".to_string()
    } else {
        format!("seed verification failed for products: {}", missing.join(", "))
    }
}
