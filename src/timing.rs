//! Conversion between milliseconds and ATIME/PTIME/WTIME register values.
//!
//! The time registers count down: `0xFF` is one cycle, `0x00` is 256.

/// Duration of one ADC cycle in milliseconds
pub const CYCLE_MS: f32 = 2.72;

/// Wait time multiplier applied when WLONG is set
pub const WAIT_LONG_FACTOR: f32 = 12.0;

/// Cycle unit for a time register.
///
/// Only the wait timer is affected by WLONG.
pub fn cycle_unit(is_wait_timer: bool, wait_long: bool) -> f32 {
    if is_wait_timer && wait_long {
        CYCLE_MS * WAIT_LONG_FACTOR
    } else {
        CYCLE_MS
    }
}

/// Register value for `ms`, clamped to [1, 256] cycles of `unit`.
pub fn ms_to_reg_val(ms: f32, unit: f32) -> u8 {
    let ms = ms.clamp(unit, 256.0 * unit);
    // truncation is floor here, the operand is never negative
    let cycles_minus_one = (ms / unit - 1.0) as u8;
    255 - cycles_minus_one
}

/// Milliseconds represented by register value `reg_val`.
pub fn reg_val_to_ms(reg_val: u8, unit: f32) -> f32 {
    (256.0 - f32::from(reg_val)) * unit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extremes() {
        assert_eq!(ms_to_reg_val(CYCLE_MS, CYCLE_MS), 0xFF);
        assert_eq!(ms_to_reg_val(256.0 * CYCLE_MS, CYCLE_MS), 0x00);
        assert_eq!(ms_to_reg_val(0.0, CYCLE_MS), 0xFF);
        assert_eq!(ms_to_reg_val(-5.0, CYCLE_MS), 0xFF);
        assert_eq!(ms_to_reg_val(1.0e6, CYCLE_MS), 0x00);
    }

    #[test]
    fn test_reg_val_to_ms() {
        assert!((reg_val_to_ms(0xFF, CYCLE_MS) - 2.72).abs() < 1e-4);
        assert!((reg_val_to_ms(0x00, CYCLE_MS) - 696.32).abs() < 1e-3);
        assert!((reg_val_to_ms(0xDB, CYCLE_MS) - 100.64).abs() < 1e-3);
    }

    #[test]
    fn test_round_trip_within_one_cycle() {
        let mut ms = 0.0f32;
        while ms <= 10_000.0 {
            let expected = ms.clamp(CYCLE_MS, 256.0 * CYCLE_MS);
            let back = reg_val_to_ms(ms_to_reg_val(ms, CYCLE_MS), CYCLE_MS);
            assert!(
                (back - expected).abs() <= CYCLE_MS + 1e-3,
                "ms={} back={}",
                ms,
                back
            );
            ms += 0.5;
        }
    }

    #[test]
    fn test_wait_long_unit() {
        assert_eq!(cycle_unit(false, true), CYCLE_MS);
        assert_eq!(cycle_unit(true, false), CYCLE_MS);
        assert!((cycle_unit(true, true) - 32.64).abs() < 1e-4);

        let unit = cycle_unit(true, true);
        assert_eq!(ms_to_reg_val(unit, unit), 0xFF);
        assert!((reg_val_to_ms(0x00, unit) - 8355.84).abs() < 1e-2);
    }
}
