use prodcat_core::config::{AppConfig, LoadOptions};
use prodcat_core::{CategoryCatalog, StaticCategoryCatalog};
use prodcat_db::{connect_with_config, migrations};
use serde::Serialize;

use crate::commands::{CommandResult, EXIT_VERIFICATION};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

/// Exits non-zero when any readiness check fails.
pub fn run(json_output: bool) -> CommandResult {
    let report = build_report();
    let exit_code = if report.overall_status == CheckStatus::Pass { 0 } else { EXIT_VERIFICATION };

    let output = if json_output {
        serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        })
    } else {
        render_human(&report)
    };

    CommandResult { exit_code, output }
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            checks.extend(check_database(&config));
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            for name in ["database_connectivity", "product_schema"] {
                checks.push(DoctorCheck {
                    name,
                    status: CheckStatus::Skipped,
                    details: "skipped because configuration did not load".to_string(),
                });
            }
        }
    }
    checks.push(check_catalog(&StaticCategoryCatalog::reference()));

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

/// Connectivity, then whether the product schema is migrated. The schema
/// check runs against the same pool and is skipped when the connection fails.
fn check_database(config: &AppConfig) -> Vec<DoctorCheck> {
    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return vec![DoctorCheck {
                name: "database_connectivity",
                status: CheckStatus::Fail,
                details: format!("failed to initialize async runtime: {error}"),
            }];
        }
    };

    runtime.block_on(async {
        let pool = match connect_with_config(&config.database).await {
            Ok(pool) => pool,
            Err(error) => {
                return vec![
                    DoctorCheck {
                        name: "database_connectivity",
                        status: CheckStatus::Fail,
                        details: format!("failed to connect to database: {error}"),
                    },
                    DoctorCheck {
                        name: "product_schema",
                        status: CheckStatus::Skipped,
                        details: "skipped because the database is unreachable".to_string(),
                    },
                ];
            }
        };

        let connectivity = DoctorCheck {
            name: "database_connectivity",
            status: CheckStatus::Pass,
            details: format!("connected using `{}`", config.database.url),
        };
        let schema = schema_check(&pool).await;
        pool.close().await;
        vec![connectivity, schema]
    })
}

async fn schema_check(pool: &prodcat_db::DbPool) -> DoctorCheck {
    match migrations::product_table_present(pool).await {
        Ok(true) => DoctorCheck {
            name: "product_schema",
            status: CheckStatus::Pass,
            details: "product table present".to_string(),
        },
        Ok(false) => DoctorCheck {
            name: "product_schema",
            status: CheckStatus::Fail,
            details: "product table missing; run `prodcat migrate`".to_string(),
        },
        Err(error) => DoctorCheck {
            name: "product_schema",
            status: CheckStatus::Fail,
            details: format!("schema inspection failed: {error}"),
        },
    }
}

fn check_catalog(catalog: &dyn CategoryCatalog) -> DoctorCheck {
    let categories = catalog.categories();
    if categories.is_empty() {
        return DoctorCheck {
            name: "category_catalog",
            status: CheckStatus::Fail,
            details: "category catalog is empty".to_string(),
        };
    }

    let names = categories.iter().map(|category| category.name.as_str()).collect::<Vec<_>>();
    DoctorCheck {
        name: "category_catalog",
        status: CheckStatus::Pass,
        details: format!("{} categories: {}", categories.len(), names.join(", ")),
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
