use std::fs;

use crate::cli::commands::InitArgs;

const BOARD_TOML_TEMPLATE: &str = r##"[board]
name = "{name}"

# --- Map defaults ---
# Initial viewport center and zoom (0 = whole world, 16 = street scale).
# The `g` key in the TUI jumps back here.

[map]
center_lat = {lat}
center_lng = {lng}
zoom = 6

# --- UI Customization ---
# Uncomment and edit to override defaults.
#
# [ui]
# show_key_hints = true
#
# [ui.colors]
# background = "#101421"
# text = "#C8D0E0"
# marker = "#FF6B6B"
# crosshair = "#FFD700"
"##;

/// Handle `pm init`
pub fn cmd_init(args: InitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let board_dir = cwd.join("pinboard");

    if board_dir.exists() && !args.force {
        return Err("pinboard/ already exists (use --force to reinitialize)".into());
    }

    let name = match args.name {
        Some(name) => name,
        None => cwd
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("pins")
            .to_string(),
    };

    let (lat, lng) = match args.center.as_slice() {
        [lat, lng] => (*lat, *lng),
        _ => (35.6812, 139.7671),
    };

    fs::create_dir_all(&board_dir)?;
    let config = BOARD_TOML_TEMPLATE
        .replace("{name}", &name)
        .replace("{lat}", &format!("{lat:.4}"))
        .replace("{lng}", &format!("{lng:.4}"));
    fs::write(board_dir.join("board.toml"), config)?;

    println!("initialized board \"{}\" in pinboard/", name);
    Ok(())
}
