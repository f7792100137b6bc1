//! Typed register values and the power-on configuration written by `init`.

use crate::register::{AGAIN, APERS, PDIODE, PDRIVE, PGAIN, PPERS};
use crate::PROXIMITY_MASK;

/// ALS analog gain (CONTROL bits 1:0)
///
/// The field sits at bit 0, so the register-positioned and right-justified
/// encodings are the same value.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum AlsGain {
    /// 1x gain
    #[default]
    X1 = 0b00,
    /// 8x gain
    X8 = 0b01,
    /// 16x gain
    X16 = 0b10,
    /// 120x gain
    X120 = 0b11,
}

impl AlsGain {
    /// Control register bits for this gain.
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Decode from CONTROL bits; bits outside AGAIN are ignored.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & AGAIN.mask {
            0b00 => AlsGain::X1,
            0b01 => AlsGain::X8,
            0b10 => AlsGain::X16,
            _ => AlsGain::X120,
        }
    }

    /// Multiplier applied by this gain setting.
    pub fn factor(self) -> f32 {
        match self {
            AlsGain::X1 => 1.0,
            AlsGain::X8 => 8.0,
            AlsGain::X16 => 16.0,
            AlsGain::X120 => 120.0,
        }
    }
}

/// Proximity gain (CONTROL bits 3:2), discriminants in register position
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum ProximityGain {
    /// 1x gain
    X1 = 0b00 << 2,
    /// 2x gain
    X2 = 0b01 << 2,
    /// 4x gain
    #[default]
    X4 = 0b10 << 2,
    /// 8x gain
    X8 = 0b11 << 2,
}

impl ProximityGain {
    /// Control register bits for this gain, in register position.
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Decode from CONTROL bits; bits outside PGAIN are ignored.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & PGAIN.mask {
            0x00 => ProximityGain::X1,
            0x04 => ProximityGain::X2,
            0x08 => ProximityGain::X4,
            _ => ProximityGain::X8,
        }
    }
}

/// LED drive strength (CONTROL bits 7:6), discriminants in register position
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum LedDrive {
    /// 100 mA
    #[default]
    Ma100 = 0b00 << 6,
    /// 50 mA
    Ma50 = 0b01 << 6,
    /// 25 mA
    Ma25 = 0b10 << 6,
    /// 12.5 mA
    Ma12_5 = 0b11 << 6,
}

impl LedDrive {
    /// Control register bits for this drive strength, in register position.
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Decode from CONTROL bits; bits outside PDRIVE are ignored.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & PDRIVE.mask {
            0x00 => LedDrive::Ma100,
            0x40 => LedDrive::Ma50,
            0x80 => LedDrive::Ma25,
            _ => LedDrive::Ma12_5,
        }
    }
}

/// Proximity diode select (CONTROL bits 5:4), discriminants in register position
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum ProximityDiode {
    /// Reserved encoding
    Reserved = 0b00 << 4,
    /// IR LED only
    IrLedOnly = 0b01 << 4,
    /// CH1 photodiode only
    #[default]
    Ch1DiodeOnly = 0b10 << 4,
    /// Both
    Both = 0b11 << 4,
}

impl ProximityDiode {
    /// Control register bits for this selection, in register position.
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Decode from CONTROL bits; bits outside PDIODE are ignored.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & PDIODE.mask {
            0x00 => ProximityDiode::Reserved,
            0x10 => ProximityDiode::IrLedOnly,
            0x20 => ProximityDiode::Ch1DiodeOnly,
            _ => ProximityDiode::Both,
        }
    }
}

/// Interrupt threshold pair in raw ADC counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct Thresholds {
    /// Interrupt when the reading falls below this
    pub low: u16,
    /// Interrupt when the reading rises above this
    pub high: u16,
}

impl Thresholds {
    /// Create a threshold pair
    pub const fn new(low: u16, high: u16) -> Self {
        Self { low, high }
    }

    /// AILTL..AIHTH register bytes
    pub const fn to_als_bytes(&self) -> [u8; 4] {
        let [low_l, low_h] = self.low.to_le_bytes();
        let [high_l, high_h] = self.high.to_le_bytes();
        [low_l, low_h, high_l, high_h]
    }

    /// PILTL..PIHTH register bytes, each value truncated to 10 bits
    pub const fn to_proximity_bytes(&self) -> [u8; 4] {
        Thresholds::new(self.low & PROXIMITY_MASK, self.high & PROXIMITY_MASK).to_als_bytes()
    }
}

/// Interrupt persistence: consecutive out-of-range cycles before an
/// interrupt is asserted. 0 means every cycle. Each value is 0..=15.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct Persistence {
    /// ALS persistence (PERS bits 7:4)
    pub als: u8,
    /// Proximity persistence (PERS bits 3:0)
    pub proximity: u8,
}

impl Persistence {
    /// Largest value either nibble can hold
    pub const MAX: u8 = 0x0F;

    /// Create a persistence pair
    pub const fn new(als: u8, proximity: u8) -> Self {
        Self { als, proximity }
    }

    /// PERS register byte
    pub const fn bits(&self) -> u8 {
        APERS.place(self.als) | PPERS.place(self.proximity)
    }

    /// Decode a PERS register byte
    pub const fn from_bits(bits: u8) -> Self {
        Self {
            als: APERS.extract(bits),
            proximity: PPERS.extract(bits),
        }
    }

    pub(crate) const fn is_valid(&self) -> bool {
        self.als <= Self::MAX && self.proximity <= Self::MAX
    }
}

/// Smallest accepted proximity pulse count
pub const MIN_PULSE_COUNT: u8 = 1;
/// Largest accepted proximity pulse count
pub const MAX_PULSE_COUNT: u8 = 64;

pub(crate) const PULSE_COUNT_RANGE: &str = "pulse count out of range (1-64)";
pub(crate) const PERSISTENCE_RANGE: &str = "persistence out of range (0-15)";

/// Register configuration written by `init`.
///
/// Time registers are raw register values; `0xFF` is one 2.72 ms cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct Config {
    /// ATIME register value
    pub atime: u8,
    /// PTIME register value
    pub ptime: u8,
    /// WTIME register value
    pub wtime: u8,
    /// Proximity pulses per cycle, 1..=64
    pub pulse_count: u8,
    /// POFFSET register value
    pub proximity_offset: u8,
    /// Multiply the wait time by 12
    pub wait_long: bool,
    /// LED drive strength
    pub led_drive: LedDrive,
    /// Proximity diode select
    pub proximity_diode: ProximityDiode,
    /// Proximity gain
    pub proximity_gain: ProximityGain,
    /// ALS gain
    pub als_gain: AlsGain,
    /// ALS interrupt thresholds
    pub als_thresholds: Thresholds,
    /// Proximity interrupt thresholds (10-bit)
    pub proximity_thresholds: Thresholds,
    /// Interrupt persistence filters
    pub persistence: Persistence,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            atime: 0xFF,
            ptime: 0xFF,
            wtime: 0xFF,
            pulse_count: 8,
            proximity_offset: 0x00,
            wait_long: false,
            led_drive: LedDrive::Ma100,
            proximity_diode: ProximityDiode::Ch1DiodeOnly,
            proximity_gain: ProximityGain::X4,
            als_gain: AlsGain::X1,
            als_thresholds: Thresholds::new(0xFFFF, 0x0000),
            proximity_thresholds: Thresholds::new(0, 1023),
            persistence: Persistence::new(2, 2),
        }
    }
}

impl Config {
    /// CONTROL register byte for this configuration.
    pub const fn control(&self) -> u8 {
        self.led_drive.bits()
            | self.proximity_diode.bits()
            | self.proximity_gain.bits()
            | self.als_gain.bits()
    }

    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if !(MIN_PULSE_COUNT..=MAX_PULSE_COUNT).contains(&self.pulse_count) {
            return Err(PULSE_COUNT_RANGE);
        }
        if !self.persistence.is_valid() {
            return Err(PERSISTENCE_RANGE);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_control_byte() {
        // 100 mA | CH1 diode | PGAIN 4x | AGAIN 1x
        assert_eq!(Config::default().control(), 0x28);
    }

    #[test]
    fn test_from_bits_matches_bits() {
        for gain in [AlsGain::X1, AlsGain::X8, AlsGain::X16, AlsGain::X120] {
            assert_eq!(AlsGain::from_bits(gain.bits()), gain);
        }
        for gain in [
            ProximityGain::X1,
            ProximityGain::X2,
            ProximityGain::X4,
            ProximityGain::X8,
        ] {
            assert_eq!(ProximityGain::from_bits(gain.bits() | 0xF3), gain);
        }
        for drive in [LedDrive::Ma100, LedDrive::Ma50, LedDrive::Ma25, LedDrive::Ma12_5] {
            assert_eq!(LedDrive::from_bits(drive.bits() | 0x3F), drive);
        }
        for diode in [
            ProximityDiode::Reserved,
            ProximityDiode::IrLedOnly,
            ProximityDiode::Ch1DiodeOnly,
            ProximityDiode::Both,
        ] {
            assert_eq!(ProximityDiode::from_bits(diode.bits() | 0xCF), diode);
        }
    }

    #[test]
    fn test_threshold_bytes() {
        let t = Thresholds::new(0x1234, 0xABCD);
        assert_eq!(t.to_als_bytes(), [0x34, 0x12, 0xCD, 0xAB]);
        assert_eq!(t.to_proximity_bytes(), [0x34, 0x02, 0xCD, 0x03]);
        assert_eq!(
            Thresholds::new(0xFFFF, 0xFFFF).to_proximity_bytes(),
            [0xFF, 0x03, 0xFF, 0x03]
        );
    }

    #[test]
    fn test_persistence_nibbles() {
        assert_eq!(Persistence::new(2, 2).bits(), 0x22);
        assert_eq!(Persistence::new(0xF, 0).bits(), 0xF0);
        assert_eq!(Persistence::from_bits(0x5C), Persistence::new(5, 12));
    }

    #[test]
    fn test_validate() {
        assert!(Config::default().validate().is_ok());

        let config = Config {
            pulse_count: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            pulse_count: 65,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            persistence: Persistence::new(16, 0),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
