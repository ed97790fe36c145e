/// Example program to print the loaded configuration
///
/// Run with: cargo run -p rune-config --example print_config

fn main() {
    let config = rune_config::LayersConfig::load();

    println!("=== Rune Layers Configuration ===\n");

    println!("Compose Settings:");
    println!("  Base Container: {}", config.compose.base_container);
    println!();

    println!("Snapshot Settings:");
    println!("  Pretty: {}", config.snapshot.pretty);
    println!("  Classify: {}", config.snapshot.classify);
    println!();

    println!("Diagnostics: {:?}", config.diagnostics);
    println!();

    match toml::to_string_pretty(&config) {
        Ok(toml_str) => {
            println!("=== Serialized Configuration ===");
            println!("{}", toml_str);
        }
        Err(e) => {
            eprintln!("Failed to serialize config: {}", e);
        }
    }
}
