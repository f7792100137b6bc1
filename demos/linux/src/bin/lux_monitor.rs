//! Periodic ambient light and proximity readout
//!
//! This example demonstrates how to:
//! - Initialize the sensor with a custom configuration
//! - Enable the light sensor and proximity engine
//! - Read raw channels, lux and proximity in a loop

use apds9930::{AlsGain, Apds9930, Config, ProximityGain};

#[cfg(target_os = "linux")]
use linux_embedded_hal::I2cdev;

#[cfg(target_os = "linux")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let i2c = I2cdev::new("/dev/i2c-1")?;
    let mut sensor = Apds9930::new(i2c);

    println!("APDS-9930 Lux Monitor");
    println!("=====================");

    let config = Config {
        als_gain: AlsGain::X8,
        proximity_gain: ProximityGain::X4,
        ..Config::default()
    };
    sensor.init_with_config(&config)?;

    let id = sensor.get_device_id()?;
    println!("Device ID: {id:#04x}");

    sensor.set_als_integration_time(100.0)?;
    sensor.enable_light_sensor(true, false)?;
    sensor.enable_proximity(true, false)?;

    println!(
        "ALS integration time: {:.2} ms",
        sensor.get_als_integration_time()?
    );
    println!("Press Ctrl+C to exit");
    println!();

    loop {
        std::thread::sleep(std::time::Duration::from_millis(500));

        let status = sensor.get_status()?;
        if !status.als_valid {
            continue;
        }

        let data = sensor.read_als_data()?;
        let lux = sensor.read_lux()?;
        let proximity = sensor.read_proximity_value()?;

        println!(
            "CH0: {:5} | CH1: {:5} | Lux: {:8.2} | Proximity: {:4}",
            data.ch0, data.ch1, lux, proximity
        );
    }
}

#[cfg(not(target_os = "linux"))]
fn main() {
    println!("APDS-9930 Lux Monitor");
    println!();
    println!("This example requires Linux with I2C support.");
    println!("To adapt for your platform, replace linux-embedded-hal with your HAL's I2C.");
}
