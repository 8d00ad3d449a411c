use serde::Serialize;
use shelf_core::config::{AppConfig, LoadOptions};
use shelf_store::{seed_products, InMemoryProductRepository, ProductRepository};

use crate::commands::CommandResult;

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

pub fn run(json_output: bool) -> CommandResult {
    let report = build_report();
    let exit_code = if report.overall_status == CheckStatus::Pass { 0 } else { 1 };

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
            checks.push(check_listener_address(&config));
            checks.push(check_seed_catalog(&config));
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            checks.push(DoctorCheck {
                name: "listener_address",
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            });
            checks.push(DoctorCheck {
                name: "seed_catalog",
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            });
        }
    }

    let all_pass = checks.iter().all(|check| check.status != CheckStatus::Fail);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_listener_address(config: &AppConfig) -> DoctorCheck {
    let address = match config.server.socket_addr() {
        Ok(address) => address,
        Err(error) => {
            return DoctorCheck {
                name: "listener_address",
                status: CheckStatus::Fail,
                details: error.to_string(),
            };
        }
    };

    let result = block_on(async {
        let listener = tokio::net::TcpListener::bind(address)
            .await
            .map_err(|error| format!("cannot bind `{address}`: {error}"))?;
        drop(listener);
        Ok::<(), String>(())
    });

    match result {
        Ok(()) => DoctorCheck {
            name: "listener_address",
            status: CheckStatus::Pass,
            details: format!("`{address}` is available"),
        },
        Err(error) => {
            DoctorCheck { name: "listener_address", status: CheckStatus::Fail, details: error }
        }
    }
}

fn check_seed_catalog(config: &AppConfig) -> DoctorCheck {
    if !config.catalog.seed_on_startup {
        return DoctorCheck {
            name: "seed_catalog",
            status: CheckStatus::Skipped,
            details: "catalog.seed_on_startup is false".to_string(),
        };
    }

    let result = block_on(async {
        let repository = InMemoryProductRepository::with_products(seed_products())
            .map_err(|error| format!("seed catalog is invalid: {error}"))?;
        let count = repository.count().await.map_err(|error| error.to_string())?;
        Ok::<usize, String>(count)
    });

    match result {
        Ok(count) => DoctorCheck {
            name: "seed_catalog",
            status: CheckStatus::Pass,
            details: format!("{count} seed products with unique ids"),
        },
        Err(error) => DoctorCheck { name: "seed_catalog", status: CheckStatus::Fail, details: error },
    }
}

fn block_on<T>(future: impl std::future::Future<Output = Result<T, String>>) -> Result<T, String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| format!("failed to initialize async runtime: {error}"))?;
    runtime.block_on(future)
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
