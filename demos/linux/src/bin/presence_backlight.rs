//! Presence-driven display backlight
//!
//! Polls the proximity channel once per second. While something is close the
//! backlight stays on; after 10 seconds without presence it is switched off,
//! and it comes back on as soon as presence returns. The backlight here is a
//! flag printed to the console.

use std::time::{Duration, Instant};

use apds9930::{Apds9930, Config, LedDrive};

#[cfg(target_os = "linux")]
use linux_embedded_hal::I2cdev;

const PRESENCE_TIMEOUT: Duration = Duration::from_secs(10);
const POLL_INTERVAL: Duration = Duration::from_millis(1000);
/// Proximity counts treated as "someone is there"
const PRESENCE_THRESHOLD: u16 = 400;

struct Backlight {
    on: bool,
    last_presence: Instant,
}

impl Backlight {
    fn new(now: Instant) -> Self {
        Self {
            on: true,
            last_presence: now,
        }
    }

    fn update(&mut self, present: bool, now: Instant) {
        if present {
            self.last_presence = now;
            if !self.on {
                self.on = true;
                println!("Backlight ON: presence detected");
            }
        } else if self.on && now.duration_since(self.last_presence) > PRESENCE_TIMEOUT {
            self.on = false;
            println!("Backlight OFF: no presence for {}s", PRESENCE_TIMEOUT.as_secs());
        }
    }
}

#[cfg(target_os = "linux")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let i2c = I2cdev::new("/dev/i2c-1")?;
    let mut sensor = Apds9930::new(i2c);

    println!("APDS-9930 Presence Backlight");
    println!("============================");

    let config = Config {
        led_drive: LedDrive::Ma100,
        pulse_count: 8,
        ..Config::default()
    };
    sensor.init_with_config(&config)?;
    sensor.enable_proximity(true, false)?;

    let mut backlight = Backlight::new(Instant::now());
    println!("Backlight ON");

    loop {
        let proximity = sensor.read_proximity_value()?;
        let present = proximity >= PRESENCE_THRESHOLD;
        if present {
            println!("Presence detected (proximity {proximity})");
        }
        backlight.update(present, Instant::now());

        std::thread::sleep(POLL_INTERVAL);
    }
}

#[cfg(not(target_os = "linux"))]
fn main() {
    println!("APDS-9930 Presence Backlight");
    println!();
    println!("This example requires Linux with I2C support.");
}
