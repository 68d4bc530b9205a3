use std::path::Path;

use anyhow::{bail, Context, Result};

use soundcue_api::Config;
use soundcue_core::taxonomy::TaxonomyTables;

use super::print_json;

/// Audit a pair of tables: `file` if given, else the configured override,
/// else the shipped tables. Exits non-zero if anything is wrong.
pub fn check(config: &Config, file: Option<&Path>, json: bool) -> Result<()> {
    let path = file.or(config.taxonomy_path.as_deref());
    let (origin, tables) = match path {
        Some(path) => (
            path.display().to_string(),
            TaxonomyTables::load(path)
                .with_context(|| format!("Failed to read taxonomy from {}", path.display()))?,
        ),
        None => (String::from("built-in tables"), TaxonomyTables::builtin()),
    };

    let problems: Vec<String> = tables.problems().iter().map(ToString::to_string).collect();

    if json {
        print_json(&serde_json::json!({
            "origin": origin,
            "ok": problems.is_empty(),
            "problems": problems,
        }))?;
    } else if problems.is_empty() {
        println!(
            "✓ {origin}: {} genres, {} contexts, consistent",
            tables.genre_contexts.len(),
            tables.context_genres.len()
        );
    } else {
        println!("✗ {origin}: {} problem(s)\n", problems.len());
        for problem in &problems {
            println!("  - {problem}");
        }
    }

    if !problems.is_empty() {
        bail!("Taxonomy check failed");
    }
    Ok(())
}

/// Print the shipped tables in the override file format.
pub fn dump() -> Result<()> {
    let toml = TaxonomyTables::builtin().to_toml_string()?;
    print!("{toml}");
    Ok(())
}
