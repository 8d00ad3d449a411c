use shelf_core::config::{AppConfig, LoadOptions};
use shelf_store::seed_products;

use crate::commands::CommandResult;

pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "seed",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    if !config.catalog.seed_on_startup {
        return CommandResult::success(
            "seed",
            "catalog.seed_on_startup is false; the server starts with an empty catalog",
            Some(Vec::new()),
        );
    }

    let products = seed_products();
    CommandResult::success(
        "seed",
        format!("server starts with {} seed products", products.len()),
        Some(products),
    )
}
