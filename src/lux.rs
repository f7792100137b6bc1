//! Illuminance model.
//!
//! An empirical piecewise approximation from the sensor vendor's application
//! literature, evaluated on the two raw photodiode channels. Breakpoints and
//! coefficients must stay exactly as they are.

use crate::config::AlsGain;
use crate::timing::{reg_val_to_ms, CYCLE_MS};

/// Glass attenuation (no cover glass)
pub const GLASS_ATTENUATION: f32 = 1.0;
/// Device factor
pub const DEVICE_FACTOR: f32 = 52.0;

/// Raw ALS channel counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct AlsData {
    /// Channel 0, clear (visible + IR)
    pub ch0: u16,
    /// Channel 1, infrared
    pub ch1: u16,
}

/// ALS settings last written to the device, kept so lux can be computed
/// without reading ATIME and CONTROL back.
///
/// Only the ALS integration time and ALS gain setters (and `init`) update it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct LastKnownConfig {
    /// ATIME register value
    pub atime: u8,
    /// AGAIN control bits
    pub again: u8,
}

impl Default for LastKnownConfig {
    fn default() -> Self {
        Self {
            atime: 0xFF,
            again: AlsGain::X1.bits(),
        }
    }
}

impl LastKnownConfig {
    /// ALS integration time in milliseconds.
    pub fn atime_ms(&self) -> f32 {
        reg_val_to_ms(self.atime, CYCLE_MS)
    }

    /// Gain multiplier. Unknown control values fall back to 1x.
    pub fn again_factor(&self) -> f32 {
        match self.again {
            0b00..=0b11 => AlsGain::from_bits(self.again).factor(),
            other => {
                warn!("lux: unknown AGAIN value {:#x}, assuming 1x", other);
                1.0
            }
        }
    }

    /// Counts per lux: `(ATIME_ms * AGAIN) / (GA * DF)`.
    pub fn counts_per_lux(&self) -> f32 {
        (self.atime_ms() * self.again_factor()) / (GLASS_ATTENUATION * DEVICE_FACTOR)
    }
}

/// Lux for `data` under `settings`.
pub fn compute_lux(data: AlsData, settings: &LastKnownConfig) -> f32 {
    lux_from_counts(data, settings.counts_per_lux())
}

/// Lux from raw counts, given counts per lux.
///
/// Degenerate inputs (zero counts per lux, dark channel 0) give 0.0.
pub fn lux_from_counts(data: AlsData, counts_per_lux: f32) -> f32 {
    if counts_per_lux == 0.0 {
        return 0.0;
    }
    if data.ch0 == 0 {
        return 0.0;
    }

    let ch0 = f32::from(data.ch0);
    let ch1 = f32::from(data.ch1);
    let ratio = ch1 / ch0;

    let lux = if ratio <= 0.50 {
        0.0304 * ch0 - 0.062 * ch0 * libm::powf(ratio, 1.4)
    } else if ratio <= 0.61 {
        0.0224 * ch0 - 0.031 * ch1
    } else if ratio <= 0.80 {
        0.0128 * ch0 - 0.0153 * ch1
    } else if ratio <= 1.30 {
        0.00146 * ch0 - 0.00112 * ch1
    } else {
        0.0
    };

    lux.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lux_at(ch1: u16) -> f32 {
        compute_lux(AlsData { ch0: 1000, ch1 }, &LastKnownConfig::default())
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_ratio_half_uses_first_branch() {
        let expected = 30.4 - 62.0 * libm::powf(0.5, 1.4);
        assert!(close(lux_at(500), expected));
        assert!(close(lux_at(500), 6.9064));
    }

    #[test]
    fn test_ratio_buckets() {
        assert!(close(lux_at(610), 22.4 - 18.91));
        assert!(close(lux_at(800), 12.8 - 12.24));
        assert!(close(lux_at(1300), 1.46 - 1.456));
        assert_eq!(lux_at(1310), 0.0);
    }

    #[test]
    fn test_zero_channel_0_is_dark() {
        let data = AlsData { ch0: 0, ch1: 1234 };
        assert_eq!(compute_lux(data, &LastKnownConfig::default()), 0.0);
    }

    #[test]
    fn test_zero_counts_per_lux() {
        let data = AlsData { ch0: 1000, ch1: 100 };
        assert_eq!(lux_from_counts(data, 0.0), 0.0);
    }

    #[test]
    fn test_unknown_again_falls_back_to_1x() {
        let settings = LastKnownConfig {
            atime: 0xFF,
            again: 0x07,
        };
        assert_eq!(settings.again_factor(), 1.0);
        assert!(settings.counts_per_lux() > 0.0);
        let data = AlsData { ch0: 1000, ch1: 610 };
        assert!(close(compute_lux(data, &settings), 3.49));
    }

    #[test]
    fn test_counts_per_lux() {
        let settings = LastKnownConfig {
            atime: 0xDB,
            again: AlsGain::X8.bits(),
        };
        // 100.64 ms * 8 / 52
        assert!((settings.counts_per_lux() - 15.483).abs() < 1e-2);
    }

    #[test]
    fn test_never_negative() {
        for ch1 in (0..=2000).step_by(7) {
            assert!(lux_at(ch1) >= 0.0);
        }
    }
}
