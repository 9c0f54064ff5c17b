use colored::*;
use failure::Error;
use park_rides::config::{self, SystemConfig};
use park_rides::park::{Employee, Person, Ride, Visitor};
use std::env;
use std::io;
use std::process;
use tracing::{warn, Level};

fn bootstrap_ride(config: &SystemConfig) -> Result<Ride, Error> {
    config::validate_config(config)?;

    let operator = &config.operator;
    let operator = Employee::new(
        Person::new(operator.id.as_str(), operator.name.as_str(), operator.age)?,
        &operator.role,
        operator.available,
    )?;

    if config.ride.max_rider < 1 {
        println!(
            "{}",
            format!("[{}] Max riders must be at least 1, using 1", config.ride.name).yellow()
        );
    }

    let mut ride = Ride::new(
        config.ride.id.as_str(),
        config.ride.name.as_str(),
        Some(operator),
        config.ride.max_rider,
    );

    if let Some(operator) = ride.operator() {
        println!(
            "Operator initialized: {} ({})",
            operator.person.name,
            if operator.is_available() { "Available" } else { "Unavailable" }
        );
    }

    println!("Ride initialized: {} (Max Riders: {})", ride.name, ride.max_rider());

    for visitor in config.visitors.iter() {
        let visitor = Visitor::new(
            Person::new(visitor.id.as_str(), visitor.name.as_str(), visitor.age)?,
            &visitor.ticket_type,
            &visitor.visit_date,
        )?;

        println!("[{}] Added visitor to queue: {}", ride.name, visitor.name());

        ride.enqueue_visitor(visitor);
    }

    Ok(ride)
}

fn print_queue(ride: &Ride) {
    println!("\n[{}] Waiting Queue Status:", ride.name);

    if ride.queue_len() == 0 {
        println!("  Queue is empty");
        return;
    }

    println!("  Total visitors in queue: {}", ride.queue_len());

    for (index, visitor) in ride.list_queue().enumerate() {
        println!("    {}. {}", index + 1, visitor);
    }
}

fn print_history(ride: &Ride) {
    println!("\n[{}] Ride History Status:", ride.name);

    if ride.history_count() == 0 {
        println!("  Ride history is empty");
        return;
    }

    println!("  Total historical visitors: {}", ride.history_count());

    for (index, visitor) in ride.history().enumerate() {
        println!("    {}. {}", index + 1, visitor);
    }
}

fn run_local(config: SystemConfig) -> Result<(), Error> {
    let mut ride = bootstrap_ride(&config)?;

    print_queue(&ride);

    loop {
        println!("\n[{}] Attempting to start one ride cycle...", ride.name);

        match ride.run_one_cycle() {
            Ok(report) => println!("{}", format!("[{}] Ride cycle completed: {}", ride.name, report).green()),
            Err(error) => {
                println!("{}", error.to_string().red());
                break;
            }
        }

        if ride.queue_len() == 0 {
            break;
        }
    }

    print_history(&ride);

    println!("\n[{}] Total visitors in history: {}", ride.name, ride.history_count());

    for visitor in config.visitors.iter() {
        if ride.contains_in_history(&visitor.id) {
            println!("[{}] Visitor found in history: {}", ride.name, visitor.name);
        } else {
            println!("{}", format!("[{}] Visitor NOT found in history: {}", ride.name, visitor.name).yellow());
        }
    }

    match ride.sort_history() {
        Ok(()) => {
            println!("{}", format!("[{}] Ride history sorted (age, then name)", ride.name).green());
            print_history(&ride);
        }
        Err(error) => println!("{}", error.to_string().red()),
    }

    match ride.export_history(&config.history_path) {
        Ok(written) => println!(
            "{}",
            format!("[{}] Exported {} visitors to {}", ride.name, written, config.history_path).green()
        ),
        Err(error) => {
            println!("{}", format!("[{}] Export failed: {}", ride.name, error).red());
            return Ok(());
        }
    }

    let mut replay = Ride::new(ride.id.as_str(), ride.name.as_str(), None, ride.max_rider());

    match replay.import_history(&config.history_path) {
        Ok(report) => {
            for skipped in report.skipped.iter() {
                println!(
                    "{}",
                    format!("[{}] Skipping invalid CSV line {}: {} ({})", replay.name, skipped.line_no, skipped.line, skipped.error).yellow()
                );
            }

            println!(
                "{}",
                format!("[{}] Import completed! Total visitors imported: {}", replay.name, report.imported()).green()
            );

            print_history(&replay);
        }
        Err(error) => println!("{}", format!("[{}] Import failed: {}", replay.name, error).red()),
    }

    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let verbose = args.iter().any(|arg| arg == "-v");
    let path = args
        .iter()
        .find(|arg| *arg != "-v")
        .cloned()
        .unwrap_or_else(|| format!("{}/config.json", env!("CARGO_MANIFEST_DIR")));

    tracing_subscriber::fmt()
        .with_max_level(if verbose { Level::DEBUG } else { Level::WARN })
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let config = config::get_config(&path).unwrap_or_else(|error| {
        warn!(path = %path, error = %error, "could not load config, using defaults");
        SystemConfig::default()
    });

    if let Err(error) = run_local(config) {
        println!("{}", error.to_string().red());
        process::exit(1);
    }
}
