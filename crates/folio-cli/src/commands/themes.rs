use anyhow::Result;

use folio_core::AppConfig;
use folio_tui::themes::available_themes;

pub fn run(config: &AppConfig) -> Result<()> {
    let current = config.ui.theme.name.as_str();
    println!("Available themes:\n");
    for name in available_themes() {
        let marker = if name == current || (current == "gruvbox" && name == "gruvbox-dark") {
            "*"
        } else {
            " "
        };
        println!("  {} {}", marker, name);
    }
    println!("\nSet `ui.theme.name` in {} to switch.", AppConfig::config_path().display());
    Ok(())
}
