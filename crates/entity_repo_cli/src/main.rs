//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `entity_repo_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use entity_repo_core::{EntityRepository, InMemoryRepository, StockItem};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("entity_repo_core ping={}", entity_repo_core::ping());
    println!("entity_repo_core version={}", entity_repo_core::core_version());

    match smoke_round_trip() {
        Ok(count) => {
            println!("entity_repo_core smoke=ok entities={count}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("entity_repo_core smoke=error {message}");
            ExitCode::FAILURE
        }
    }
}

fn smoke_round_trip() -> Result<usize, String> {
    let mut repo = InMemoryRepository::new();
    let item = StockItem::new(1, "smoke", 1).map_err(|err| err.to_string())?;
    repo.add(item).map_err(|err| err.to_string())?;
    repo.update_quantity(1, 2).map_err(|err| err.to_string())?;
    Ok(repo.len())
}
