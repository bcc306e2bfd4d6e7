//! Postomat - automated parcel-locker station
//!
//! Main entry point for the postomat CLI.

use clap::{Parser, Subcommand, ValueEnum};
use postomat::config::StationConfig;
use postomat::identity::{Party, Recipient, Sender};
use postomat::parcel::{Parcel, ParcelSize};
use postomat::station::{SecurityLevel, Station};
use postomat::validator;
use postomat::PostomatError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::process;

/// Postomat - parcel-locker station simulator
#[derive(Parser, Debug)]
#[command(name = "postomat")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: ~/.config/postomat/config.yaml)
    #[arg(short, long, env = "POSTOMAT_CONFIG")]
    config: Option<String>,

    /// Override the configured security level (low, medium, high)
    #[arg(long, global = true)]
    security_level: Option<SecurityLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a default station configuration
    Init {
        /// Overwrite an existing configuration
        #[arg(long)]
        force: bool,
    },

    /// Print statistics and security status of a freshly built station as JSON
    Status,

    /// Run a scripted send / notify / receive / maintenance scenario
    Demo {
        /// Seed for locker layout, tracking codes and repairs
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Validate a single field value
    Check {
        /// Field to validate
        #[arg(value_enum)]
        field: Field,

        /// Value to check
        value: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Field {
    Name,
    Phone,
    Email,
    Address,
    Description,
    Tracking,
}

fn main() {
    // Initialize logging
    if let Err(e) = postomat::logging::init() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> postomat::Result<()> {
    match cli.command {
        Commands::Init { force } => handle_init_command(&cli.config, force),
        Commands::Status => {
            let config = load_config(&cli.config, cli.security_level)?;
            handle_status_command(config)
        }
        Commands::Demo { seed } => {
            let config = load_config(&cli.config, cli.security_level)?;
            handle_demo_command(config, seed)
        }
        Commands::Check { field, value } => handle_check_command(field, &value),
    }
}

fn config_path(config_path: &Option<String>) -> PathBuf {
    config_path
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(StationConfig::default_path)
}

/// Load the configuration file, falling back to defaults when none exists
fn load_config(
    config_path_arg: &Option<String>,
    security_level: Option<SecurityLevel>,
) -> postomat::Result<StationConfig> {
    let path = config_path(config_path_arg);
    let config = if path.exists() {
        StationConfig::load(&path)?
    } else if config_path_arg.is_some() {
        return Err(PostomatError::Config(format!(
            "Config file not found: {}",
            path.display()
        )));
    } else {
        tracing::debug!(path = %path.display(), "No configuration found, using defaults");
        StationConfig::default()
    };

    Ok(match security_level {
        Some(level) => config.with_security_level(level),
        None => config,
    })
}

fn handle_init_command(config_path_arg: &Option<String>, force: bool) -> postomat::Result<()> {
    let config_file = config_path(config_path_arg);

    if config_file.exists() && !force {
        println!("Configuration already exists at {}", config_file.display());
        println!("Use --force to overwrite it.");
        return Ok(());
    }

    let config = StationConfig::default();
    config.save(&config_file)?;

    println!("✓ Created configuration at {}", config_file.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit the station id, address and locker count");
    println!("  2. Inspect the station:");
    println!("     postomat status");
    println!("     postomat demo");

    Ok(())
}

fn handle_status_command(config: StationConfig) -> postomat::Result<()> {
    let station = Station::from_config(config)?;

    let report = serde_json::json!({
        "statistics": station.statistics(),
        "security": station.security_status(),
        "lockers": station.lockers_info(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

fn outcome<T, E: std::fmt::Display>(
    label: &str,
    result: &Result<T, E>,
    ok: impl FnOnce(&T) -> String,
) {
    match result {
        Ok(value) => println!("✓ {}: {}", label, ok(value)),
        Err(e) => println!("✗ {}: {}", label, e),
    }
}

fn handle_demo_command(config: StationConfig, seed: Option<u64>) -> postomat::Result<()> {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut station = Station::with_rng(config, rng)?;
    let registry = station.tracking_registry();

    println!("{}", station);
    println!();

    let sender = Sender::new(
        "Ivan Petrov",
        "+375 (29) 123-45-67",
        "ivan@example.com",
        "Lenina st, 12",
    )?;
    let recipient = Recipient::new("Anna Sidorova", "80331234567", "anna@example.com")?;
    let stranger = Recipient::new("Oleg Ivanov", "375441112233", "oleg@example.com")?;

    let parcel = Parcel::new(
        &registry,
        sender.clone(),
        recipient.clone(),
        ParcelSize::Small,
        "Books",
    )?;
    let code = parcel.tracking_code().clone();
    println!("Created {}", parcel);

    let sent = station.send(parcel.clone(), "courier");
    outcome("send", &sent, |locker| format!("parcel {} placed in locker {}", code, locker));

    let resent = station.send(parcel.clone(), "courier");
    outcome("send again", &resent, |locker| format!("locker {}", locker));

    let large = Parcel::new(
        &registry,
        sender,
        recipient.clone(),
        ParcelSize::Large,
        "Winter tires",
    )?;
    let large_code = large.tracking_code().clone();
    let sent = station.send(large, "courier");
    outcome("send large", &sent, |locker| {
        format!("parcel {} placed in locker {}", large_code, locker)
    });

    let notified = station.notify(&code, None, "operator");
    outcome("notify", &notified, |_| format!("reminder sent to {}", recipient.name()));

    let stolen = station.receive(&code, &stranger, "stranger");
    outcome("receive by stranger", &stolen, |p| p.to_string());

    let received = station.receive(&code, &recipient, "anna");
    outcome("receive", &received, |p| p.to_string());

    let again = station.receive(&code, &recipient, "anna");
    outcome("receive again", &again, |p| p.to_string());

    let returned = station.send(parcel, "courier");
    outcome("send delivered parcel", &returned, |locker| format!("locker {}", locker));

    let broken = station.break_random_locker();
    outcome("break locker", &broken, |n| format!("locker {} out of order", n));

    let report = station.perform_maintenance("Sergei");
    outcome("maintenance", &report, |r| r.to_string());
    if let Ok(report) = &report {
        for issue in &report.issues {
            println!("    - {}", issue);
        }
    }

    let expired = station.check_expired_parcels();
    println!("✓ expiry sweep: {} parcel(s) expired", expired.len());

    println!();
    println!("{}", station);
    println!();
    println!("{}", serde_json::to_string_pretty(&station.security_status())?);

    Ok(())
}

fn handle_check_command(field: Field, value: &str) -> postomat::Result<()> {
    let normalized = match field {
        Field::Name => validator::parse_name(value)?,
        Field::Phone => validator::parse_phone(value)?,
        Field::Email => validator::parse_email(value)?,
        Field::Address => validator::parse_address(value)?,
        Field::Description => validator::parse_description(value)?,
        Field::Tracking => validator::parse_tracking(value)?,
    };

    println!("✓ valid {:?}: {}", field, normalized);
    Ok(())
}
