//! Basic usage example

use tenv::Tenv;

#[derive(Debug, Default, Tenv)]
struct Config {
    // Loaded from HOST
    #[tenv(name = "HOST")]
    pub host: String,

    // Numeric type, loaded from PORT
    #[tenv(name = "PORT")]
    pub port: i32,

    // Boolean type
    #[tenv(name = "DEBUG")]
    pub debug: bool,

    // Override keys are upper-cased: loaded from LOG_LEVEL
    #[tenv(name = "log_level")]
    pub log_level: String,
}

fn main() -> anyhow::Result<()> {
    // Set environment variables for demonstration
    std::env::set_var("HOST", "localhost");
    std::env::set_var("PORT", "8080");
    std::env::set_var("DEBUG", "true");
    std::env::set_var("LOG_LEVEL", "info");

    // Populate configuration
    let mut config = Config::default();
    tenv::populate_from_env(&mut config)?;

    println!("Configuration loaded:");
    println!("  Host: {}", config.host);
    println!("  Port: {}", config.port);
    println!("  Debug: {}", config.debug);
    println!("  Log Level: {}", config.log_level);

    if config.debug {
        println!("Debug mode is on.");
    } else {
        println!("Debug mode is off.");
    }

    Ok(())
}
