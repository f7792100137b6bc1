//! Proximity threshold interrupt example
//!
//! This example demonstrates how to:
//! - Set proximity thresholds and a persistence filter
//! - Enable the proximity engine with its interrupt
//! - Poll the status register and clear handled interrupts
//!
//! The INT pin is open drain and active low. Wire it to a GPIO to react to
//! interrupts in hardware; here the status register is polled instead.

use apds9930::{Apds9930, LedDrive, Persistence, ProximityGain, Thresholds};
use embedded_hal::i2c::I2c;

#[cfg(target_os = "linux")]
use linux_embedded_hal::I2cdev;

/// Proximity counts above which an object counts as near
const NEAR_THRESHOLD: u16 = 600;
/// Proximity counts below which a near object counts as gone
const FAR_THRESHOLD: u16 = 200;

#[cfg(target_os = "linux")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let i2c = I2cdev::new("/dev/i2c-1")?;
    let mut sensor = Apds9930::new(i2c);

    println!("APDS-9930 Proximity Interrupt Demo");
    println!("==================================");

    sensor.init()?;
    configure(&mut sensor)?;

    let thresholds = sensor.get_proximity_interrupt_thresholds()?;
    println!(
        "Thresholds: low {} / high {} counts, {} pulses at {:?}",
        thresholds.low,
        thresholds.high,
        sensor.get_proximity_pulse_count()?,
        sensor.get_led_drive_strength()?
    );
    println!("Move your hand towards the sensor. Press Ctrl+C to exit");
    println!();

    let mut interrupt_count = 0u32;
    loop {
        std::thread::sleep(std::time::Duration::from_millis(100));

        if !sensor.is_proximity_interrupt_pending()? {
            continue;
        }

        interrupt_count += 1;
        let value = sensor.read_proximity_value()?;
        let state = if value >= NEAR_THRESHOLD { "NEAR" } else { "FAR" };
        println!("INTERRUPT #{interrupt_count:3} [{state}]: proximity {value:4}");

        sensor.clear_proximity_interrupt()?;
    }
}

fn configure<I2C: I2c>(sensor: &mut Apds9930<I2C>) -> Result<(), apds9930::Error<I2C::Error>> {
    sensor.set_proximity_gain(ProximityGain::X4)?;
    sensor.set_led_drive_strength(LedDrive::Ma100)?;
    sensor.set_proximity_pulse_count(8)?;
    sensor.set_proximity_interrupt_thresholds(Thresholds::new(FAR_THRESHOLD, NEAR_THRESHOLD))?;
    sensor.set_interrupt_persistence(Persistence::new(0, 2))?;
    sensor.clear_all_interrupts()?;
    sensor.enable_proximity(true, true)
}

#[cfg(not(target_os = "linux"))]
fn main() {
    println!("APDS-9930 Proximity Interrupt Demo");
    println!();
    println!("This example requires Linux with I2C support.");
    println!("Hardware interrupt setup (optional):");
    println!("- Connect the APDS-9930 INT pin to a GPIO input with a pull-up");
    println!("- Configure the GPIO interrupt on the falling edge");
    println!("- Call clear_proximity_interrupt() from the handler's deferred work");
}
