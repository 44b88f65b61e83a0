//! Print the device state and the next alarm
//!
//! Usage: cargo run -p somneo-sdk --example basic_usage -- <host>

use somneo_sdk::logging::{init_logging, LoggingMode};
use somneo_sdk::Somneo;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(LoggingMode::Development)?;

    let host = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "192.168.1.50".to_string());
    let mut somneo = Somneo::new(&host)?;

    match somneo.refresh() {
        Ok(()) => {}
        Err(e) if e.is_timeout() => {
            eprintln!("{host} did not answer in time");
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    }

    if let Some(info) = somneo.device_info() {
        println!("Device: {}", serde_json::Value::Object(info.clone()));
    }
    if let Some(sensor) = somneo.sensor() {
        println!("Sensors: {}", serde_json::Value::Object(sensor.clone()));
    }

    println!("Alarms:");
    for alarm in somneo.alarms().iter() {
        let (time, days) = alarm.settings();
        let state = if alarm.enabled { "on" } else { "off" };
        println!("  {} [{state}] {time} {}", alarm.id, days.join(","));
    }

    match somneo.next_alarm() {
        Some(next) => println!("Next alarm: {next}"),
        None => println!("No alarm enabled"),
    }
    if let Some(minutes) = somneo.snooze_minutes() {
        println!("Snooze: {minutes} min");
    }

    Ok(())
}
