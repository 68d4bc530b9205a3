use anyhow::Result;

use soundcue_api::Config;
use soundcue_core::{classify, Resolution};

use super::print_json;

/// Show which catalog genre a classifier label lands on, and why.
pub fn run_normalize(config: &Config, label: &str, json: bool) -> Result<()> {
    let normalized = classify(Some(label));

    if json {
        return print_json(&normalized);
    }

    let how = match normalized.resolution {
        Resolution::Canonical => "catalog genre",
        Resolution::Synonym => "alternate spelling",
        Resolution::Editorial => "filed under nearest catalog genre",
        Resolution::Fallback => "unrecognized, using fallback",
    };
    println!("{label:?} -> {} ({how})", normalized.genre);

    let taxonomy = config.taxonomy()?;
    let contexts: Vec<&str> = taxonomy
        .contexts_for(normalized.genre)
        .iter()
        .map(|c| c.slug())
        .collect();
    println!("  fits: {}", contexts.join(", "));
    Ok(())
}
