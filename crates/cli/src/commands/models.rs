//! `clai list-models` — show the provider's model catalog.

use clai_config::AppConfig;
use clai_core::completion::ModelCatalog;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let client = clai_providers::build_from_config(&config);

    let models = client
        .list_models()
        .await
        .map_err(|e| format!("Failed to fetch models: {e}"))?;

    if models.is_empty() {
        println!("No models reported by {}.", config.provider);
        return Ok(());
    }

    println!("Available models:");
    for model in models {
        println!("Model ID: {}", model.id);
        match model.context_length {
            Some(length) => println!("Context Window Size: {length} tokens"),
            None => println!("Context Window Size: unknown"),
        }
        println!("{}", "-".repeat(40));
    }

    Ok(())
}
