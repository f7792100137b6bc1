//! # APDS-9930 Digital Ambient Light and Proximity Sensor Driver
//!
//! This is a platform-agnostic Rust driver for the APDS-9930 ambient light and proximity
//! sensor, built using the [`embedded-hal`] traits for I2C communication.
//!
//! The APDS-9930 provides:
//! - Two ALS photodiode channels (clear and infrared) with 16-bit counts
//! - A 10-bit proximity channel driven by an on-chip IR LED
//! - Programmable gain, integration time and wait time
//! - Threshold interrupts with persistence filters
//! - I2C interface (address 0x39)
//!
//! ## Features
//!
//! - **High-level API** for ALS, proximity and lux measurements
//! - **Async/await support** with feature gating (optional)
//! - **Interrupt support** with thresholds, persistence and clear commands
//! - **Lux calculation** from the two ALS channels
//! - **Logging** through `log` or `defmt` (optional)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use apds9930::{AlsGain, Apds9930};
//!
//! # let i2c = embedded_hal_mock::eh1::i2c::Mock::new(&[]);
//! let mut sensor = Apds9930::new(i2c);
//!
//! // Write the default configuration and power the sensor on
//! sensor.init().unwrap();
//!
//! // Configure and enable the light sensor
//! sensor.set_als_gain(AlsGain::X8).unwrap();
//! sensor.set_als_integration_time(100.0).unwrap();
//! sensor.enable_light_sensor(true, false).unwrap();
//!
//! // Read the ambient light level
//! let lux = sensor.read_lux().unwrap();
//! # let _ = lux;
//! ```
//!
//! ## Async Usage
//!
//! Enable the `async` feature to use async/await patterns:
//!
//! ```toml
//! [dependencies]
//! apds9930 = { version = "0.1", features = ["async"] }
//! ```
//!
//! ```rust,ignore
//! use apds9930::Apds9930;
//!
//! let i2c = /* your async I2C implementation */;
//! let mut sensor = Apds9930::new_async(i2c);
//!
//! sensor.init_async().await.unwrap();
//! sensor.enable_proximity_async(true, false).await.unwrap();
//! let proximity = sensor.read_proximity_value_async().await.unwrap();
//! ```
//!
//! ## Timeouts and bus sharing
//!
//! Every operation is one blocking bus transaction (or a short fixed
//! sequence of them). Transaction timeouts belong to the HAL that provides
//! the bus; [`I2C_TIMEOUT_MS`] is the value the driver is designed around.
//! Nothing is retried here.
//!
//! [`embedded-hal`]: https://crates.io/crates/embedded-hal

#![no_std]
#![deny(missing_docs)]

// must come first so the logging macros are visible to the other modules
#[macro_use]
mod fmt;

#[cfg(feature = "async")]
mod asynch;
pub mod config;
pub mod lux;
pub mod register;
pub mod timing;

use core::fmt::{Display, Formatter};

use embedded_hal::i2c::I2c;

pub use config::{
    AlsGain, Config, LedDrive, Persistence, ProximityDiode, ProximityGain, Thresholds,
    MAX_PULSE_COUNT, MIN_PULSE_COUNT,
};
pub use lux::{AlsData, LastKnownConfig};
use register::{
    config as config_bits, enable, status as status_bits, Field, Register, SpecialFunction,
    AGAIN, COMMAND_REGISTER, PDIODE, PDRIVE, PGAIN,
};
use timing::CYCLE_MS;

/// I2C address of the APDS-9930 sensor
pub const I2C_ADDRESS: u8 = 0x39;

/// Expected content of the ID register
pub const DEVICE_ID: u8 = 0x39;

/// Per-transaction bus timeout the driver is designed around
pub const I2C_TIMEOUT_MS: u32 = 1000;

/// Longest block write, in data bytes, that fits in one frame
pub const MAX_BLOCK_LEN: usize = 31;

/// Mask applied to 10-bit proximity values
pub const PROXIMITY_MASK: u16 = 0x03FF;

/// Device status information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct Status {
    /// ALS channels hold a completed integration
    pub als_valid: bool,
    /// Proximity channel holds a completed integration
    pub proximity_valid: bool,
    /// ALS interrupt asserted
    pub als_interrupt: bool,
    /// Proximity interrupt asserted
    pub proximity_interrupt: bool,
}

impl Status {
    /// Decode a STATUS register byte
    pub const fn from_bits(bits: u8) -> Self {
        Self {
            als_valid: bits & status_bits::AVALID != 0,
            proximity_valid: bits & status_bits::PVALID != 0,
            als_interrupt: bits & status_bits::AINT != 0,
            proximity_interrupt: bits & status_bits::PINT != 0,
        }
    }
}

/// All possible errors in this crate
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Error<E> {
    /// I2C communication error
    I2c(E),
    /// Invalid configuration parameter, rejected before touching the bus
    InvalidConfig(&'static str),
    /// Block write longer than [`MAX_BLOCK_LEN`]
    BlockTooLong(usize),
}

impl<E: core::fmt::Debug> Display for Error<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::I2c(e) => write!(f, "I2C error: {:?}", e),
            Error::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            Error::BlockTooLong(len) => {
                write!(f, "block of {} bytes exceeds {} byte limit", len, MAX_BLOCK_LEN)
            }
        }
    }
}

impl<E: core::fmt::Debug> core::error::Error for Error<E> {}

/// High-level APDS-9930 driver
pub struct Apds9930<I2C> {
    i2c: I2C,
    initialized: bool,
    last_known: LastKnownConfig,
}

impl<I2C: I2c> Apds9930<I2C> {
    /// Create a new APDS-9930 driver instance
    pub fn new(i2c: I2C) -> Self {
        Self::with_bus(i2c)
    }
}

impl<I2C> Apds9930<I2C> {
    fn with_bus(i2c: I2C) -> Self {
        Self {
            i2c,
            initialized: false,
            last_known: LastKnownConfig::default(),
        }
    }

    /// True once `init` has completed successfully
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// ALS settings used by the lux calculation
    pub fn last_known_config(&self) -> LastKnownConfig {
        self.last_known
    }

    /// Destroy the driver and return the I2C interface
    pub fn destroy(self) -> I2C {
        self.i2c
    }
}

impl<I2C> Apds9930<I2C>
where
    I2C: I2c,
{
    /// Initialize the sensor with the default configuration
    pub fn init(&mut self) -> Result<(), Error<I2C::Error>> {
        self.init_with_config(&Config::default())
    }

    /// Initialize the sensor with `config` and power it on.
    ///
    /// Does nothing if the sensor is already initialized. A failed init
    /// leaves the registers in whatever state the last successful write
    /// produced; call it again from scratch.
    pub fn init_with_config(&mut self, config: &Config) -> Result<(), Error<I2C::Error>> {
        if self.initialized {
            info!("APDS-9930 already initialized");
            return Ok(());
        }
        check_config(config).map_err(Error::InvalidConfig)?;

        info!("Initializing APDS-9930");

        let id = self.read_byte(Register::Id)?;
        info!("Device ID: {:#x}", id);
        if id != DEVICE_ID {
            warn!(
                "Device ID {:#x} does not match expected APDS-9930 ID {:#x}",
                id, DEVICE_ID
            );
        }

        // Disable everything before touching the configuration
        self.write_byte(Register::Enable, 0x00)?;

        self.write_byte(Register::Atime, config.atime)?;
        self.last_known.atime = config.atime;
        self.write_byte(Register::Ptime, config.ptime)?;
        self.write_byte(Register::Wtime, config.wtime)?;
        self.write_byte(Register::Ppulse, config.pulse_count - 1)?;
        self.write_byte(Register::Poffset, config.proximity_offset)?;
        self.write_byte(Register::Config, config_byte(config.wait_long))?;
        self.write_byte(Register::Control, config.control())?;
        self.last_known.again = config.als_gain.bits();

        self.set_als_interrupt_thresholds(config.als_thresholds)?;
        self.set_proximity_interrupt_thresholds(config.proximity_thresholds)?;
        self.write_byte(Register::Pers, config.persistence.bits())?;

        self.enable_power(true)?;

        self.initialized = true;
        info!("APDS-9930 initialized");
        Ok(())
    }

    /// Read the device ID register
    pub fn get_device_id(&mut self) -> Result<u8, Error<I2C::Error>> {
        if !self.initialized {
            warn!("get_device_id: sensor not initialized");
        }
        self.read_byte(Register::Id)
    }

    /// Power the internal oscillator on or off
    pub fn enable_power(&mut self, enable: bool) -> Result<(), Error<I2C::Error>> {
        self.modify_register(Register::Enable, enable::PON, on_off(enable, enable::PON))
    }

    /// Enable or disable proximity detection.
    ///
    /// The proximity interrupt follows `enable_interrupt` only while
    /// proximity is being enabled; disabling proximity also disables its
    /// interrupt.
    pub fn enable_proximity(
        &mut self,
        enable: bool,
        enable_interrupt: bool,
    ) -> Result<(), Error<I2C::Error>> {
        let bits = feature_bits(enable::PEN, enable::PIEN, enable, enable_interrupt);
        self.modify_register(Register::Enable, enable::PEN | enable::PIEN, bits)
    }

    /// Enable or disable the ambient light sensor.
    ///
    /// Same interrupt coupling as [`Self::enable_proximity`].
    pub fn enable_light_sensor(
        &mut self,
        enable: bool,
        enable_interrupt: bool,
    ) -> Result<(), Error<I2C::Error>> {
        let bits = feature_bits(enable::AEN, enable::AIEN, enable, enable_interrupt);
        self.modify_register(Register::Enable, enable::AEN | enable::AIEN, bits)
    }

    /// Enable or disable the wait timer between measurement cycles
    pub fn enable_wait_timer(&mut self, enable: bool) -> Result<(), Error<I2C::Error>> {
        self.modify_register(Register::Enable, enable::WEN, on_off(enable, enable::WEN))
    }

    /// Set the ALS gain. Also updates the gain used for lux.
    pub fn set_als_gain(&mut self, gain: AlsGain) -> Result<(), Error<I2C::Error>> {
        self.write_field(AGAIN, gain.bits())?;
        self.last_known.again = gain.bits();
        Ok(())
    }

    /// Read the ALS gain (right-justified, which for bits 1:0 is also the
    /// register position)
    pub fn get_als_gain(&mut self) -> Result<AlsGain, Error<I2C::Error>> {
        let control = self.read_byte(Register::Control)?;
        Ok(AlsGain::from_bits(AGAIN.extract(control)))
    }

    /// Set the proximity gain
    pub fn set_proximity_gain(&mut self, gain: ProximityGain) -> Result<(), Error<I2C::Error>> {
        self.write_field(PGAIN, gain.bits())
    }

    /// Read the proximity gain, decoded from the field left in register
    /// position
    pub fn get_proximity_gain(&mut self) -> Result<ProximityGain, Error<I2C::Error>> {
        self.read_field(PGAIN).map(ProximityGain::from_bits)
    }

    /// Set the IR LED drive strength
    pub fn set_led_drive_strength(&mut self, drive: LedDrive) -> Result<(), Error<I2C::Error>> {
        self.write_field(PDRIVE, drive.bits())
    }

    /// Read the IR LED drive strength
    pub fn get_led_drive_strength(&mut self) -> Result<LedDrive, Error<I2C::Error>> {
        self.read_field(PDRIVE).map(LedDrive::from_bits)
    }

    /// Select the proximity diode
    pub fn set_proximity_diode(&mut self, diode: ProximityDiode) -> Result<(), Error<I2C::Error>> {
        self.write_field(PDIODE, diode.bits())
    }

    /// Read the proximity diode selection
    pub fn get_proximity_diode(&mut self) -> Result<ProximityDiode, Error<I2C::Error>> {
        self.read_field(PDIODE).map(ProximityDiode::from_bits)
    }

    /// Set the number of proximity pulses per cycle (1-64)
    pub fn set_proximity_pulse_count(&mut self, count: u8) -> Result<(), Error<I2C::Error>> {
        check_pulse_count(count).map_err(Error::InvalidConfig)?;
        self.write_byte(Register::Ppulse, count - 1)
    }

    /// Read the number of proximity pulses per cycle
    pub fn get_proximity_pulse_count(&mut self) -> Result<u8, Error<I2C::Error>> {
        Ok(self.read_byte(Register::Ppulse)?.saturating_add(1))
    }

    /// Set the proximity offset register
    pub fn set_proximity_offset(&mut self, offset: u8) -> Result<(), Error<I2C::Error>> {
        self.write_byte(Register::Poffset, offset)
    }

    /// Read the proximity offset register
    pub fn get_proximity_offset(&mut self) -> Result<u8, Error<I2C::Error>> {
        self.read_byte(Register::Poffset)
    }

    /// Set the ALS integration time in milliseconds (2.72 to 696.32).
    /// Also updates the integration time used for lux.
    pub fn set_als_integration_time(&mut self, time_ms: f32) -> Result<(), Error<I2C::Error>> {
        let atime = timing::ms_to_reg_val(time_ms, CYCLE_MS);
        self.write_byte(Register::Atime, atime)?;
        self.last_known.atime = atime;
        Ok(())
    }

    /// Read the ALS integration time in milliseconds
    pub fn get_als_integration_time(&mut self) -> Result<f32, Error<I2C::Error>> {
        let atime = self.read_byte(Register::Atime)?;
        Ok(timing::reg_val_to_ms(atime, CYCLE_MS))
    }

    /// Set the proximity integration time in milliseconds
    pub fn set_proximity_integration_time(
        &mut self,
        time_ms: f32,
    ) -> Result<(), Error<I2C::Error>> {
        self.write_byte(Register::Ptime, timing::ms_to_reg_val(time_ms, CYCLE_MS))
    }

    /// Read the proximity integration time in milliseconds
    pub fn get_proximity_integration_time(&mut self) -> Result<f32, Error<I2C::Error>> {
        let ptime = self.read_byte(Register::Ptime)?;
        Ok(timing::reg_val_to_ms(ptime, CYCLE_MS))
    }

    /// Set the wait time in milliseconds, honoring the current WLONG setting
    pub fn set_wait_time(&mut self, time_ms: f32) -> Result<(), Error<I2C::Error>> {
        let unit = self.wait_cycle_unit()?;
        self.write_byte(Register::Wtime, timing::ms_to_reg_val(time_ms, unit))
    }

    /// Read the wait time in milliseconds, honoring the current WLONG setting
    pub fn get_wait_time(&mut self) -> Result<f32, Error<I2C::Error>> {
        let wtime = self.read_byte(Register::Wtime)?;
        let unit = self.wait_cycle_unit()?;
        Ok(timing::reg_val_to_ms(wtime, unit))
    }

    /// Enable or disable the 12x wait time multiplier
    pub fn set_wait_long_enabled(&mut self, enable: bool) -> Result<(), Error<I2C::Error>> {
        self.modify_register(
            Register::Config,
            config_bits::WLONG,
            on_off(enable, config_bits::WLONG),
        )
    }

    /// Check whether the 12x wait time multiplier is set
    pub fn is_wait_long_enabled(&mut self) -> Result<bool, Error<I2C::Error>> {
        Ok(self.read_byte(Register::Config)? & config_bits::WLONG != 0)
    }

    /// Set the ALS interrupt thresholds (raw channel 0 counts)
    pub fn set_als_interrupt_thresholds(
        &mut self,
        thresholds: Thresholds,
    ) -> Result<(), Error<I2C::Error>> {
        self.write_block(Register::Ailtl, &thresholds.to_als_bytes())
    }

    /// Read the ALS interrupt thresholds
    pub fn get_als_interrupt_thresholds(&mut self) -> Result<Thresholds, Error<I2C::Error>> {
        let mut low = [0u8; 2];
        let mut high = [0u8; 2];
        self.read_block(Register::Ailtl, &mut low)?;
        self.read_block(Register::Aihtl, &mut high)?;
        Ok(Thresholds::new(
            u16::from_le_bytes(low),
            u16::from_le_bytes(high),
        ))
    }

    /// Set the proximity interrupt thresholds. Values are truncated to 10 bits.
    pub fn set_proximity_interrupt_thresholds(
        &mut self,
        thresholds: Thresholds,
    ) -> Result<(), Error<I2C::Error>> {
        self.write_block(Register::Piltl, &thresholds.to_proximity_bytes())
    }

    /// Read the proximity interrupt thresholds (10-bit)
    pub fn get_proximity_interrupt_thresholds(
        &mut self,
    ) -> Result<Thresholds, Error<I2C::Error>> {
        let mut low = [0u8; 2];
        let mut high = [0u8; 2];
        self.read_block(Register::Piltl, &mut low)?;
        self.read_block(Register::Pihtl, &mut high)?;
        Ok(Thresholds::new(proximity_from_le(low), proximity_from_le(high)))
    }

    /// Set the interrupt persistence filters (each 0-15)
    pub fn set_interrupt_persistence(
        &mut self,
        persistence: Persistence,
    ) -> Result<(), Error<I2C::Error>> {
        check_persistence(persistence).map_err(Error::InvalidConfig)?;
        self.write_byte(Register::Pers, persistence.bits())
    }

    /// Read the interrupt persistence filters
    pub fn get_interrupt_persistence(&mut self) -> Result<Persistence, Error<I2C::Error>> {
        Ok(Persistence::from_bits(self.read_byte(Register::Pers)?))
    }

    /// Clear a pending ALS interrupt
    pub fn clear_als_interrupt(&mut self) -> Result<(), Error<I2C::Error>> {
        self.write_special_function(SpecialFunction::ClearAlsInterrupt)
    }

    /// Clear a pending proximity interrupt
    pub fn clear_proximity_interrupt(&mut self) -> Result<(), Error<I2C::Error>> {
        self.write_special_function(SpecialFunction::ClearProximityInterrupt)
    }

    /// Clear both interrupts
    pub fn clear_all_interrupts(&mut self) -> Result<(), Error<I2C::Error>> {
        self.write_special_function(SpecialFunction::ClearAllInterrupts)
    }

    /// Read and decode the STATUS register
    pub fn get_status(&mut self) -> Result<Status, Error<I2C::Error>> {
        Ok(Status::from_bits(self.read_byte(Register::Status)?))
    }

    /// Check if an ALS interrupt is pending
    pub fn is_als_interrupt_pending(&mut self) -> Result<bool, Error<I2C::Error>> {
        Ok(self.get_status()?.als_interrupt)
    }

    /// Check if a proximity interrupt is pending
    pub fn is_proximity_interrupt_pending(&mut self) -> Result<bool, Error<I2C::Error>> {
        Ok(self.get_status()?.proximity_interrupt)
    }

    /// Check if the ALS channels hold valid data
    pub fn is_als_data_valid(&mut self) -> Result<bool, Error<I2C::Error>> {
        Ok(self.get_status()?.als_valid)
    }

    /// Check if the proximity channel holds valid data
    pub fn is_proximity_data_valid(&mut self) -> Result<bool, Error<I2C::Error>> {
        Ok(self.get_status()?.proximity_valid)
    }

    /// Read the raw 10-bit proximity value
    pub fn read_proximity_value(&mut self) -> Result<u16, Error<I2C::Error>> {
        let mut data = [0u8; 2];
        self.read_block(Register::Pdatal, &mut data)?;
        Ok(proximity_from_le(data))
    }

    /// Read both ALS channels in one transaction
    pub fn read_als_data(&mut self) -> Result<AlsData, Error<I2C::Error>> {
        let mut data = [0u8; 4];
        self.read_block(Register::Cdatal, &mut data)?;
        Ok(als_from_le(data))
    }

    /// Read the ALS channels and compute illuminance in lux
    pub fn read_lux(&mut self) -> Result<f32, Error<I2C::Error>> {
        let data = self.read_als_data()?;
        Ok(lux::compute_lux(data, &self.last_known))
    }

    fn wait_cycle_unit(&mut self) -> Result<f32, Error<I2C::Error>> {
        match self.is_wait_long_enabled() {
            Ok(wait_long) => Ok(timing::cycle_unit(true, wait_long)),
            Err(_) if !self.initialized => {
                warn!("WLONG unreadable before init, assuming 1x wait unit");
                Ok(CYCLE_MS)
            }
            Err(e) => Err(e),
        }
    }

    // Register field helpers

    fn modify_register(
        &mut self,
        register: Register,
        mask: u8,
        bits: u8,
    ) -> Result<(), Error<I2C::Error>> {
        let current = self.read_byte(register)?;
        self.write_byte(register, register::merge(current, mask, bits))
    }

    fn write_field(&mut self, field: Field, positioned: u8) -> Result<(), Error<I2C::Error>> {
        let current = self.read_byte(field.register)?;
        trace!("{} <- {:#x}", field.name, positioned);
        self.write_byte(field.register, field.insert(current, positioned))
    }

    fn read_field(&mut self, field: Field) -> Result<u8, Error<I2C::Error>> {
        Ok(field.positioned(self.read_byte(field.register)?))
    }

    // Bus transaction helpers

    fn write_byte(&mut self, register: Register, value: u8) -> Result<(), Error<I2C::Error>> {
        self.write_frame(register.addr(), value)
    }

    fn write_special_function(
        &mut self,
        function: SpecialFunction,
    ) -> Result<(), Error<I2C::Error>> {
        self.write_frame(COMMAND_REGISTER, function as u8)
    }

    fn write_frame(&mut self, address: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write(I2C_ADDRESS, &[address, value])
            .map_err(|e| bus_fault("write", address, e))
    }

    fn write_block(&mut self, register: Register, data: &[u8]) -> Result<(), Error<I2C::Error>> {
        let Some((buf, len)) = block_frame(register, data).map_err(Error::BlockTooLong)? else {
            return Ok(());
        };
        self.i2c
            .write(I2C_ADDRESS, &buf[..len])
            .map_err(|e| bus_fault("block write", register.addr(), e))
    }

    fn read_byte(&mut self, register: Register) -> Result<u8, Error<I2C::Error>> {
        let mut buffer = [0u8; 1];
        self.read_block(register, &mut buffer)?;
        Ok(buffer[0])
    }

    fn read_block(&mut self, register: Register, data: &mut [u8]) -> Result<(), Error<I2C::Error>> {
        if data.is_empty() {
            return Ok(());
        }
        self.i2c
            .write_read(I2C_ADDRESS, &[register.addr()], data)
            .map_err(|e| bus_fault("read", register.addr(), e))
    }
}

// Helpers shared by the blocking and async implementations

fn bus_fault<E: embedded_hal::i2c::Error>(op: &'static str, address: u8, e: E) -> Error<E> {
    error!(
        "I2C {} at reg {:#x} failed: {:?}",
        op,
        address,
        e.kind()
    );
    Error::I2c(e)
}

/// Build the address + data frame for a block write. `None` for an empty
/// block, `Err(len)` for one that does not fit.
fn block_frame(
    register: Register,
    data: &[u8],
) -> Result<Option<([u8; MAX_BLOCK_LEN + 1], usize)>, usize> {
    if data.is_empty() {
        return Ok(None);
    }
    if data.len() > MAX_BLOCK_LEN {
        error!("block write of {} bytes is too long", data.len());
        return Err(data.len());
    }
    let mut buf = [0u8; MAX_BLOCK_LEN + 1];
    buf[0] = register.addr();
    buf[1..=data.len()].copy_from_slice(data);
    Ok(Some((buf, data.len() + 1)))
}

fn check_pulse_count(count: u8) -> Result<(), &'static str> {
    if !(MIN_PULSE_COUNT..=MAX_PULSE_COUNT).contains(&count) {
        error!("Proximity pulse count {} out of range (1-64)", count);
        return Err(config::PULSE_COUNT_RANGE);
    }
    Ok(())
}

fn check_persistence(persistence: Persistence) -> Result<(), &'static str> {
    if !persistence.is_valid() {
        error!(
            "Persistence {}/{} out of range (0-15)",
            persistence.als, persistence.proximity
        );
        return Err(config::PERSISTENCE_RANGE);
    }
    Ok(())
}

fn check_config(config: &Config) -> Result<(), &'static str> {
    config.validate().inspect_err(|msg| {
        error!("Rejected configuration: {}", msg);
    })
}

const fn on_off(enable: bool, mask: u8) -> u8 {
    if enable {
        mask
    } else {
        0
    }
}

/// ENABLE bits for a feature and its interrupt. The interrupt can only be
/// armed together with its feature.
const fn feature_bits(feature: u8, interrupt: u8, enable: bool, enable_interrupt: bool) -> u8 {
    if enable {
        feature | on_off(enable_interrupt, interrupt)
    } else {
        0
    }
}

const fn config_byte(wait_long: bool) -> u8 {
    on_off(wait_long, config_bits::WLONG)
}

fn proximity_from_le(data: [u8; 2]) -> u16 {
    u16::from_le_bytes(data) & PROXIMITY_MASK
}

fn als_from_le(data: [u8; 4]) -> AlsData {
    AlsData {
        ch0: u16::from_le_bytes([data[0], data[1]]),
        ch1: u16::from_le_bytes([data[2], data[3]]),
    }
}
