use std::path::Path;

use anyhow::{Context, Result};

use arxivbot_core::generator::GeneratorInput;

pub fn run(output: Option<&Path>) -> Result<()> {
    let input = GeneratorInput::from_lookup(|name| std::env::var(name).ok())?;
    let rendered = input.render()?;

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(
                "Wrote configuration with {} subscription(s) to {}",
                input.categories.len(),
                path.display()
            );
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
