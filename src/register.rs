//! Register map, bit definitions and field descriptors.
//!
//! Every address already carries the command bit (`0x80`) required by the
//! part's addressing convention, so the values here go on the wire as-is.

/// Command bit that must be set in every register address byte.
pub const COMMAND_BIT: u8 = 0x80;

/// Register addresses (command bit included).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Register {
    /// Enable states and interrupts
    Enable = 0x80,
    /// ALS ADC integration time
    Atime = 0x81,
    /// Proximity ADC integration time
    Ptime = 0x82,
    /// Wait time
    Wtime = 0x83,
    /// ALS interrupt low threshold, low byte
    Ailtl = 0x84,
    /// ALS interrupt low threshold, high byte
    Ailth = 0x85,
    /// ALS interrupt high threshold, low byte
    Aihtl = 0x86,
    /// ALS interrupt high threshold, high byte
    Aihth = 0x87,
    /// Proximity interrupt low threshold, low byte
    Piltl = 0x88,
    /// Proximity interrupt low threshold, high byte
    Pilth = 0x89,
    /// Proximity interrupt high threshold, low byte
    Pihtl = 0x8A,
    /// Proximity interrupt high threshold, high byte
    Pihth = 0x8B,
    /// Interrupt persistence filters
    Pers = 0x8C,
    /// Configuration (WLONG)
    Config = 0x8D,
    /// Proximity pulse count (count - 1)
    Ppulse = 0x8E,
    /// Gain, LED drive and diode select
    Control = 0x8F,
    /// Device ID
    Id = 0x92,
    /// Device status
    Status = 0x93,
    /// CH0 (clear) data, low byte
    Cdatal = 0x94,
    /// CH0 (clear) data, high byte
    Cdatah = 0x95,
    /// CH1 (infrared) data, low byte
    Irdatal = 0x96,
    /// CH1 (infrared) data, high byte
    Irdatah = 0x97,
    /// Proximity data, low byte
    Pdatal = 0x98,
    /// Proximity data, high byte
    Pdatah = 0x99,
    /// Proximity offset
    Poffset = 0x9E,
}

impl Register {
    /// Address byte as sent on the bus.
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

/// Special function codes.
///
/// These are not register writes. They go to the command register, which
/// shares address `0x80` with [`Register::Enable`] but decodes the written
/// byte as a command instead of storing it.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum SpecialFunction {
    /// Clear the proximity interrupt
    ClearProximityInterrupt = 0xE5,
    /// Clear the ALS interrupt
    ClearAlsInterrupt = 0xE6,
    /// Clear both interrupts
    ClearAllInterrupts = 0xE7,
}

/// Command register address used for special functions.
pub const COMMAND_REGISTER: u8 = COMMAND_BIT;

/// ENABLE register bits
pub mod enable {
    /// Power on
    pub const PON: u8 = 1 << 0;
    /// ALS enable
    pub const AEN: u8 = 1 << 1;
    /// Proximity enable
    pub const PEN: u8 = 1 << 2;
    /// Wait timer enable
    pub const WEN: u8 = 1 << 3;
    /// ALS interrupt enable
    pub const AIEN: u8 = 1 << 4;
    /// Proximity interrupt enable
    pub const PIEN: u8 = 1 << 5;
}

/// CONFIG register bits
pub mod config {
    /// Wait long: multiplies the wait time unit by 12
    pub const WLONG: u8 = 1 << 1;
}

/// STATUS register bits
pub mod status {
    /// ALS data valid
    pub const AVALID: u8 = 1 << 0;
    /// Proximity data valid
    pub const PVALID: u8 = 1 << 1;
    /// ALS interrupt pending
    pub const AINT: u8 = 1 << 4;
    /// Proximity interrupt pending
    pub const PINT: u8 = 1 << 5;
}

/// Replace the `mask` bits of `current` with those of `bits`.
///
/// This is the one read-modify-write rule every partial register update
/// goes through.
pub const fn merge(current: u8, mask: u8, bits: u8) -> u8 {
    (current & !mask) | (bits & mask)
}

/// A bit-field inside a single register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct Field {
    /// Field name, for logging
    pub name: &'static str,
    /// Register holding the field
    pub register: Register,
    /// Mask of the field in register position
    pub mask: u8,
    /// Position of the field's least significant bit
    pub shift: u8,
}

impl Field {
    /// Replace this field's bits in `current` with `value`, already in
    /// register position. Bits outside the mask are untouched.
    pub const fn insert(&self, current: u8, value: u8) -> u8 {
        merge(current, self.mask, value)
    }

    /// Field bits left in register position.
    pub const fn positioned(&self, current: u8) -> u8 {
        current & self.mask
    }

    /// Field bits shifted down to bit 0.
    pub const fn extract(&self, current: u8) -> u8 {
        (current & self.mask) >> self.shift
    }

    /// Shift a right-justified value into register position.
    pub const fn place(&self, value: u8) -> u8 {
        (value << self.shift) & self.mask
    }
}

/// ALS gain, CONTROL bits 1:0
pub const AGAIN: Field = Field {
    name: "AGAIN",
    register: Register::Control,
    mask: 0x03,
    shift: 0,
};

/// Proximity gain, CONTROL bits 3:2
pub const PGAIN: Field = Field {
    name: "PGAIN",
    register: Register::Control,
    mask: 0x0C,
    shift: 2,
};

/// Proximity diode select, CONTROL bits 5:4
pub const PDIODE: Field = Field {
    name: "PDIODE",
    register: Register::Control,
    mask: 0x30,
    shift: 4,
};

/// LED drive strength, CONTROL bits 7:6
pub const PDRIVE: Field = Field {
    name: "PDRIVE",
    register: Register::Control,
    mask: 0xC0,
    shift: 6,
};

/// ALS interrupt persistence, PERS bits 7:4
pub const APERS: Field = Field {
    name: "APERS",
    register: Register::Pers,
    mask: 0xF0,
    shift: 4,
};

/// Proximity interrupt persistence, PERS bits 3:0
pub const PPERS: Field = Field {
    name: "PPERS",
    register: Register::Pers,
    mask: 0x0F,
    shift: 0,
};

/// All multi-bit fields, in register order.
pub const FIELDS: [Field; 6] = [AGAIN, PGAIN, PDIODE, PDRIVE, PPERS, APERS];
