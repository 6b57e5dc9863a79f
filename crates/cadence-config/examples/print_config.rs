/// Example program to print the loaded configuration
///
/// Run with: cargo run -p cadence-config --example print_config

fn main() {
    let config = match cadence_config::CadenceConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    println!("=== Cadence Configuration ===\n");

    println!("Demo Settings:");
    println!("  Name: {:?}", config.demo.name);
    println!();

    println!("Window Settings:");
    println!("  Title: {}", config.window.title);
    println!("  Size: {}x{}", config.window.width, config.window.height);
    println!("  Headless: {}", config.window.headless);
    println!("  Max Frames: {}", config.window.max_frames);
    println!();

    println!("Timing Settings:");
    println!("  Target FPS: {}", config.timing.target_fps);
    println!();

    println!("Asset Settings:");
    println!("  Sprite Sheet: {:?}", config.assets.sprite_sheet);
    println!("  Sound: {:?}", config.assets.sound);
    println!("  Music: {:?}", config.assets.music);
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
