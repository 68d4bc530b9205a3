use anyhow::Result;
use soundcue_api::{config, Config};

/// Show the current effective configuration (file, environment and flags
/// already applied).
pub fn show_config(current: &Config) -> Result<()> {
    println!("Current Configuration");
    println!("=====================\n");

    let path = config::config_file_path();
    println!("Config file: {}", path.display());
    let exists = path.exists();
    println!("File exists: {}\n", if exists { "yes" } else { "no (using defaults)" });

    println!("Settings:");
    println!("  source: {}", current.source);
    println!("  api_url: {}", current.api_url);
    println!("  stream_url_template: {}", current.stream_url_template);
    println!(
        "  taxonomy_path: {}",
        current
            .taxonomy_path
            .as_ref()
            .map_or_else(|| String::from("<built-in>"), |p| p.display().to_string())
    );

    println!("\nPriority: CLI args > ENV vars (SOUNDCUE_*) > Config file > Defaults");

    Ok(())
}

/// Show the config file path.
pub fn show_path() -> Result<()> {
    println!("{}", config::config_file_path().display());
    Ok(())
}

/// Show example configuration.
pub fn show_example() -> Result<()> {
    print!("{}", config::example_config());
    Ok(())
}

/// Initialize config file with defaults.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to configure soundcue.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}
