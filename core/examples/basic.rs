//! Basic failure interpreter usage example

use failure_interpreter::{CategoryInterpreter, FailureKind, ManualClock, TimeUnit};
use std::io;
use std::sync::Arc;
use std::time::Duration;

fn main() {
    println!("=== Failure Interpreter Basic Example ===\n");

    let clock = Arc::new(ManualClock::new());

    // Ignore missing files, tolerate two I/O failures per second
    let mut interpreter = CategoryInterpreter::builder()
        .ignore(FailureKind::NotFound)
        .trip(FailureKind::Io)
        .frequency(2)
        .duration(1, TimeUnit::Seconds)
        .clock(Arc::clone(&clock))
        .build()
        .expect("valid configuration");

    println!("--- Ignored failures ---");
    let missing = io::Error::new(io::ErrorKind::NotFound, "config.toml");
    for _ in 0..3 {
        println!("NotFound -> trip: {}", interpreter.should_trip(&missing));
    }

    println!("\n--- Failures outside the trip set ---");
    println!(
        "InvalidState -> trip: {}",
        interpreter.should_trip(&FailureKind::InvalidState)
    );

    println!("\n--- Burst of timeouts ---");
    let timeout = io::Error::new(io::ErrorKind::TimedOut, "upstream read");
    for i in 1..=4 {
        println!("Timeout #{} -> trip: {}", i, interpreter.should_trip(&timeout));
    }

    println!("\n--- After the window expires ---");
    clock.advance(Duration::from_secs(1));
    println!("Timeout -> trip: {}", interpreter.should_trip(&timeout));

    println!("\n--- Rejected reconfiguration ---");
    match interpreter.set_trip(FailureKind::NotFound) {
        Ok(()) => println!("accepted"),
        Err(e) => println!("rejected: {}", e),
    }
    println!("trip set unchanged: {:?}", interpreter.trip());
}
