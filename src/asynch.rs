//! Async versions of every driver operation, enabled by the `async` feature.
//!
//! Method names carry an `_async` suffix so a bus type implementing both
//! the blocking and async traits can use either surface.

use embedded_hal_async::i2c::I2c as AsyncI2c;

use crate::register::{
    config as config_bits, enable, Field, Register, SpecialFunction, AGAIN, COMMAND_REGISTER,
    PDIODE, PDRIVE, PGAIN,
};
use crate::timing::{self, CYCLE_MS};
use crate::{
    als_from_le, block_frame, bus_fault, check_config, check_persistence, check_pulse_count,
    config_byte, feature_bits, lux, on_off, proximity_from_le, AlsData, AlsGain, Apds9930,
    Config, Error, LedDrive, Persistence, ProximityDiode, ProximityGain, Status, Thresholds,
    DEVICE_ID, I2C_ADDRESS,
};

impl<I2C: AsyncI2c> Apds9930<I2C> {
    /// Create a new APDS-9930 driver instance (async version)
    pub fn new_async(i2c: I2C) -> Self {
        Self::with_bus(i2c)
    }
}

impl<I2C> Apds9930<I2C>
where
    I2C: AsyncI2c,
{
    /// Initialize the sensor with the default configuration (async version)
    pub async fn init_async(&mut self) -> Result<(), Error<I2C::Error>> {
        self.init_with_config_async(&Config::default()).await
    }

    /// Initialize the sensor with `config` and power it on (async version)
    pub async fn init_with_config_async(
        &mut self,
        config: &Config,
    ) -> Result<(), Error<I2C::Error>> {
        if self.initialized {
            info!("APDS-9930 already initialized");
            return Ok(());
        }
        check_config(config).map_err(Error::InvalidConfig)?;

        info!("Initializing APDS-9930");

        let id = self.read_byte_async(Register::Id).await?;
        info!("Device ID: {:#x}", id);
        if id != DEVICE_ID {
            warn!(
                "Device ID {:#x} does not match expected APDS-9930 ID {:#x}",
                id, DEVICE_ID
            );
        }

        self.write_byte_async(Register::Enable, 0x00).await?;

        self.write_byte_async(Register::Atime, config.atime).await?;
        self.last_known.atime = config.atime;
        self.write_byte_async(Register::Ptime, config.ptime).await?;
        self.write_byte_async(Register::Wtime, config.wtime).await?;
        self.write_byte_async(Register::Ppulse, config.pulse_count - 1)
            .await?;
        self.write_byte_async(Register::Poffset, config.proximity_offset)
            .await?;
        self.write_byte_async(Register::Config, config_byte(config.wait_long))
            .await?;
        self.write_byte_async(Register::Control, config.control())
            .await?;
        self.last_known.again = config.als_gain.bits();

        self.set_als_interrupt_thresholds_async(config.als_thresholds)
            .await?;
        self.set_proximity_interrupt_thresholds_async(config.proximity_thresholds)
            .await?;
        self.write_byte_async(Register::Pers, config.persistence.bits())
            .await?;

        self.enable_power_async(true).await?;

        self.initialized = true;
        info!("APDS-9930 initialized");
        Ok(())
    }

    /// Read the device ID register (async version)
    pub async fn get_device_id_async(&mut self) -> Result<u8, Error<I2C::Error>> {
        if !self.initialized {
            warn!("get_device_id: sensor not initialized");
        }
        self.read_byte_async(Register::Id).await
    }

    /// Power the internal oscillator on or off (async version)
    pub async fn enable_power_async(&mut self, enable: bool) -> Result<(), Error<I2C::Error>> {
        self.modify_register_async(Register::Enable, enable::PON, on_off(enable, enable::PON))
            .await
    }

    /// Enable or disable proximity detection (async version)
    pub async fn enable_proximity_async(
        &mut self,
        enable: bool,
        enable_interrupt: bool,
    ) -> Result<(), Error<I2C::Error>> {
        let bits = feature_bits(enable::PEN, enable::PIEN, enable, enable_interrupt);
        self.modify_register_async(Register::Enable, enable::PEN | enable::PIEN, bits)
            .await
    }

    /// Enable or disable the ambient light sensor (async version)
    pub async fn enable_light_sensor_async(
        &mut self,
        enable: bool,
        enable_interrupt: bool,
    ) -> Result<(), Error<I2C::Error>> {
        let bits = feature_bits(enable::AEN, enable::AIEN, enable, enable_interrupt);
        self.modify_register_async(Register::Enable, enable::AEN | enable::AIEN, bits)
            .await
    }

    /// Enable or disable the wait timer (async version)
    pub async fn enable_wait_timer_async(
        &mut self,
        enable: bool,
    ) -> Result<(), Error<I2C::Error>> {
        self.modify_register_async(Register::Enable, enable::WEN, on_off(enable, enable::WEN))
            .await
    }

    /// Set the ALS gain (async version)
    pub async fn set_als_gain_async(&mut self, gain: AlsGain) -> Result<(), Error<I2C::Error>> {
        self.write_field_async(AGAIN, gain.bits()).await?;
        self.last_known.again = gain.bits();
        Ok(())
    }

    /// Read the ALS gain (async version)
    pub async fn get_als_gain_async(&mut self) -> Result<AlsGain, Error<I2C::Error>> {
        let control = self.read_byte_async(Register::Control).await?;
        Ok(AlsGain::from_bits(AGAIN.extract(control)))
    }

    /// Set the proximity gain (async version)
    pub async fn set_proximity_gain_async(
        &mut self,
        gain: ProximityGain,
    ) -> Result<(), Error<I2C::Error>> {
        self.write_field_async(PGAIN, gain.bits()).await
    }

    /// Read the proximity gain (async version)
    pub async fn get_proximity_gain_async(&mut self) -> Result<ProximityGain, Error<I2C::Error>> {
        self.read_field_async(PGAIN)
            .await
            .map(ProximityGain::from_bits)
    }

    /// Set the IR LED drive strength (async version)
    pub async fn set_led_drive_strength_async(
        &mut self,
        drive: LedDrive,
    ) -> Result<(), Error<I2C::Error>> {
        self.write_field_async(PDRIVE, drive.bits()).await
    }

    /// Read the IR LED drive strength (async version)
    pub async fn get_led_drive_strength_async(&mut self) -> Result<LedDrive, Error<I2C::Error>> {
        self.read_field_async(PDRIVE).await.map(LedDrive::from_bits)
    }

    /// Select the proximity diode (async version)
    pub async fn set_proximity_diode_async(
        &mut self,
        diode: ProximityDiode,
    ) -> Result<(), Error<I2C::Error>> {
        self.write_field_async(PDIODE, diode.bits()).await
    }

    /// Read the proximity diode selection (async version)
    pub async fn get_proximity_diode_async(
        &mut self,
    ) -> Result<ProximityDiode, Error<I2C::Error>> {
        self.read_field_async(PDIODE)
            .await
            .map(ProximityDiode::from_bits)
    }

    /// Set the number of proximity pulses per cycle, 1-64 (async version)
    pub async fn set_proximity_pulse_count_async(
        &mut self,
        count: u8,
    ) -> Result<(), Error<I2C::Error>> {
        check_pulse_count(count).map_err(Error::InvalidConfig)?;
        self.write_byte_async(Register::Ppulse, count - 1).await
    }

    /// Read the number of proximity pulses per cycle (async version)
    pub async fn get_proximity_pulse_count_async(&mut self) -> Result<u8, Error<I2C::Error>> {
        Ok(self
            .read_byte_async(Register::Ppulse)
            .await?
            .saturating_add(1))
    }

    /// Set the proximity offset register (async version)
    pub async fn set_proximity_offset_async(
        &mut self,
        offset: u8,
    ) -> Result<(), Error<I2C::Error>> {
        self.write_byte_async(Register::Poffset, offset).await
    }

    /// Read the proximity offset register (async version)
    pub async fn get_proximity_offset_async(&mut self) -> Result<u8, Error<I2C::Error>> {
        self.read_byte_async(Register::Poffset).await
    }

    /// Set the ALS integration time in milliseconds (async version)
    pub async fn set_als_integration_time_async(
        &mut self,
        time_ms: f32,
    ) -> Result<(), Error<I2C::Error>> {
        let atime = timing::ms_to_reg_val(time_ms, CYCLE_MS);
        self.write_byte_async(Register::Atime, atime).await?;
        self.last_known.atime = atime;
        Ok(())
    }

    /// Read the ALS integration time in milliseconds (async version)
    pub async fn get_als_integration_time_async(&mut self) -> Result<f32, Error<I2C::Error>> {
        let atime = self.read_byte_async(Register::Atime).await?;
        Ok(timing::reg_val_to_ms(atime, CYCLE_MS))
    }

    /// Set the proximity integration time in milliseconds (async version)
    pub async fn set_proximity_integration_time_async(
        &mut self,
        time_ms: f32,
    ) -> Result<(), Error<I2C::Error>> {
        self.write_byte_async(Register::Ptime, timing::ms_to_reg_val(time_ms, CYCLE_MS))
            .await
    }

    /// Read the proximity integration time in milliseconds (async version)
    pub async fn get_proximity_integration_time_async(
        &mut self,
    ) -> Result<f32, Error<I2C::Error>> {
        let ptime = self.read_byte_async(Register::Ptime).await?;
        Ok(timing::reg_val_to_ms(ptime, CYCLE_MS))
    }

    /// Set the wait time in milliseconds (async version)
    pub async fn set_wait_time_async(&mut self, time_ms: f32) -> Result<(), Error<I2C::Error>> {
        let unit = self.wait_cycle_unit_async().await?;
        self.write_byte_async(Register::Wtime, timing::ms_to_reg_val(time_ms, unit))
            .await
    }

    /// Read the wait time in milliseconds (async version)
    pub async fn get_wait_time_async(&mut self) -> Result<f32, Error<I2C::Error>> {
        let wtime = self.read_byte_async(Register::Wtime).await?;
        let unit = self.wait_cycle_unit_async().await?;
        Ok(timing::reg_val_to_ms(wtime, unit))
    }

    /// Enable or disable the 12x wait time multiplier (async version)
    pub async fn set_wait_long_enabled_async(
        &mut self,
        enable: bool,
    ) -> Result<(), Error<I2C::Error>> {
        self.modify_register_async(
            Register::Config,
            config_bits::WLONG,
            on_off(enable, config_bits::WLONG),
        )
        .await
    }

    /// Check whether the 12x wait time multiplier is set (async version)
    pub async fn is_wait_long_enabled_async(&mut self) -> Result<bool, Error<I2C::Error>> {
        Ok(self.read_byte_async(Register::Config).await? & config_bits::WLONG != 0)
    }

    /// Set the ALS interrupt thresholds (async version)
    pub async fn set_als_interrupt_thresholds_async(
        &mut self,
        thresholds: Thresholds,
    ) -> Result<(), Error<I2C::Error>> {
        self.write_block_async(Register::Ailtl, &thresholds.to_als_bytes())
            .await
    }

    /// Read the ALS interrupt thresholds (async version)
    pub async fn get_als_interrupt_thresholds_async(
        &mut self,
    ) -> Result<Thresholds, Error<I2C::Error>> {
        let mut low = [0u8; 2];
        let mut high = [0u8; 2];
        self.read_block_async(Register::Ailtl, &mut low).await?;
        self.read_block_async(Register::Aihtl, &mut high).await?;
        Ok(Thresholds::new(
            u16::from_le_bytes(low),
            u16::from_le_bytes(high),
        ))
    }

    /// Set the proximity interrupt thresholds, truncated to 10 bits (async version)
    pub async fn set_proximity_interrupt_thresholds_async(
        &mut self,
        thresholds: Thresholds,
    ) -> Result<(), Error<I2C::Error>> {
        self.write_block_async(Register::Piltl, &thresholds.to_proximity_bytes())
            .await
    }

    /// Read the proximity interrupt thresholds (async version)
    pub async fn get_proximity_interrupt_thresholds_async(
        &mut self,
    ) -> Result<Thresholds, Error<I2C::Error>> {
        let mut low = [0u8; 2];
        let mut high = [0u8; 2];
        self.read_block_async(Register::Piltl, &mut low).await?;
        self.read_block_async(Register::Pihtl, &mut high).await?;
        Ok(Thresholds::new(proximity_from_le(low), proximity_from_le(high)))
    }

    /// Set the interrupt persistence filters (async version)
    pub async fn set_interrupt_persistence_async(
        &mut self,
        persistence: Persistence,
    ) -> Result<(), Error<I2C::Error>> {
        check_persistence(persistence).map_err(Error::InvalidConfig)?;
        self.write_byte_async(Register::Pers, persistence.bits())
            .await
    }

    /// Read the interrupt persistence filters (async version)
    pub async fn get_interrupt_persistence_async(
        &mut self,
    ) -> Result<Persistence, Error<I2C::Error>> {
        Ok(Persistence::from_bits(
            self.read_byte_async(Register::Pers).await?,
        ))
    }

    /// Clear a pending ALS interrupt (async version)
    pub async fn clear_als_interrupt_async(&mut self) -> Result<(), Error<I2C::Error>> {
        self.write_special_function_async(SpecialFunction::ClearAlsInterrupt)
            .await
    }

    /// Clear a pending proximity interrupt (async version)
    pub async fn clear_proximity_interrupt_async(&mut self) -> Result<(), Error<I2C::Error>> {
        self.write_special_function_async(SpecialFunction::ClearProximityInterrupt)
            .await
    }

    /// Clear both interrupts (async version)
    pub async fn clear_all_interrupts_async(&mut self) -> Result<(), Error<I2C::Error>> {
        self.write_special_function_async(SpecialFunction::ClearAllInterrupts)
            .await
    }

    /// Read and decode the STATUS register (async version)
    pub async fn get_status_async(&mut self) -> Result<Status, Error<I2C::Error>> {
        Ok(Status::from_bits(
            self.read_byte_async(Register::Status).await?,
        ))
    }

    /// Check if an ALS interrupt is pending (async version)
    pub async fn is_als_interrupt_pending_async(&mut self) -> Result<bool, Error<I2C::Error>> {
        Ok(self.get_status_async().await?.als_interrupt)
    }

    /// Check if a proximity interrupt is pending (async version)
    pub async fn is_proximity_interrupt_pending_async(
        &mut self,
    ) -> Result<bool, Error<I2C::Error>> {
        Ok(self.get_status_async().await?.proximity_interrupt)
    }

    /// Check if the ALS channels hold valid data (async version)
    pub async fn is_als_data_valid_async(&mut self) -> Result<bool, Error<I2C::Error>> {
        Ok(self.get_status_async().await?.als_valid)
    }

    /// Check if the proximity channel holds valid data (async version)
    pub async fn is_proximity_data_valid_async(&mut self) -> Result<bool, Error<I2C::Error>> {
        Ok(self.get_status_async().await?.proximity_valid)
    }

    /// Read the raw 10-bit proximity value (async version)
    pub async fn read_proximity_value_async(&mut self) -> Result<u16, Error<I2C::Error>> {
        let mut data = [0u8; 2];
        self.read_block_async(Register::Pdatal, &mut data).await?;
        Ok(proximity_from_le(data))
    }

    /// Read both ALS channels in one transaction (async version)
    pub async fn read_als_data_async(&mut self) -> Result<AlsData, Error<I2C::Error>> {
        let mut data = [0u8; 4];
        self.read_block_async(Register::Cdatal, &mut data).await?;
        Ok(als_from_le(data))
    }

    /// Read the ALS channels and compute illuminance in lux (async version)
    pub async fn read_lux_async(&mut self) -> Result<f32, Error<I2C::Error>> {
        let data = self.read_als_data_async().await?;
        Ok(lux::compute_lux(data, &self.last_known))
    }

    async fn wait_cycle_unit_async(&mut self) -> Result<f32, Error<I2C::Error>> {
        match self.is_wait_long_enabled_async().await {
            Ok(wait_long) => Ok(timing::cycle_unit(true, wait_long)),
            Err(_) if !self.initialized => {
                warn!("WLONG unreadable before init, assuming 1x wait unit");
                Ok(CYCLE_MS)
            }
            Err(e) => Err(e),
        }
    }

    async fn modify_register_async(
        &mut self,
        register: Register,
        mask: u8,
        bits: u8,
    ) -> Result<(), Error<I2C::Error>> {
        let current = self.read_byte_async(register).await?;
        self.write_byte_async(register, crate::register::merge(current, mask, bits))
            .await
    }

    async fn write_field_async(
        &mut self,
        field: Field,
        positioned: u8,
    ) -> Result<(), Error<I2C::Error>> {
        let current = self.read_byte_async(field.register).await?;
        trace!("{} <- {:#x}", field.name, positioned);
        self.write_byte_async(field.register, field.insert(current, positioned))
            .await
    }

    async fn read_field_async(&mut self, field: Field) -> Result<u8, Error<I2C::Error>> {
        Ok(field.positioned(self.read_byte_async(field.register).await?))
    }

    async fn write_byte_async(
        &mut self,
        register: Register,
        value: u8,
    ) -> Result<(), Error<I2C::Error>> {
        self.write_frame_async(register.addr(), value).await
    }

    async fn write_special_function_async(
        &mut self,
        function: SpecialFunction,
    ) -> Result<(), Error<I2C::Error>> {
        self.write_frame_async(COMMAND_REGISTER, function as u8)
            .await
    }

    async fn write_frame_async(&mut self, address: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write(I2C_ADDRESS, &[address, value])
            .await
            .map_err(|e| bus_fault("write", address, e))
    }

    async fn write_block_async(
        &mut self,
        register: Register,
        data: &[u8],
    ) -> Result<(), Error<I2C::Error>> {
        let Some((buf, len)) = block_frame(register, data).map_err(Error::BlockTooLong)? else {
            return Ok(());
        };
        self.i2c
            .write(I2C_ADDRESS, &buf[..len])
            .await
            .map_err(|e| bus_fault("block write", register.addr(), e))
    }

    async fn read_byte_async(&mut self, register: Register) -> Result<u8, Error<I2C::Error>> {
        let mut buffer = [0u8; 1];
        self.read_block_async(register, &mut buffer).await?;
        Ok(buffer[0])
    }

    async fn read_block_async(
        &mut self,
        register: Register,
        data: &mut [u8],
    ) -> Result<(), Error<I2C::Error>> {
        if data.is_empty() {
            return Ok(());
        }
        self.i2c
            .write_read(I2C_ADDRESS, &[register.addr()], data)
            .await
            .map_err(|e| bus_fault("read", register.addr(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
    extern crate std;
    use std::vec;

    #[test]
    fn test_async_init_and_lux() {
        let expectations = [
            I2cTransaction::write_read(I2C_ADDRESS, vec![0x92], vec![0x39]),
            I2cTransaction::write(I2C_ADDRESS, vec![0x80, 0x00]),
            I2cTransaction::write(I2C_ADDRESS, vec![0x81, 0xFF]),
            I2cTransaction::write(I2C_ADDRESS, vec![0x82, 0xFF]),
            I2cTransaction::write(I2C_ADDRESS, vec![0x83, 0xFF]),
            I2cTransaction::write(I2C_ADDRESS, vec![0x8E, 0x07]),
            I2cTransaction::write(I2C_ADDRESS, vec![0x9E, 0x00]),
            I2cTransaction::write(I2C_ADDRESS, vec![0x8D, 0x00]),
            I2cTransaction::write(I2C_ADDRESS, vec![0x8F, 0x28]),
            I2cTransaction::write(I2C_ADDRESS, vec![0x84, 0xFF, 0xFF, 0x00, 0x00]),
            I2cTransaction::write(I2C_ADDRESS, vec![0x88, 0x00, 0x00, 0xFF, 0x03]),
            I2cTransaction::write(I2C_ADDRESS, vec![0x8C, 0x22]),
            I2cTransaction::write_read(I2C_ADDRESS, vec![0x80], vec![0x00]),
            I2cTransaction::write(I2C_ADDRESS, vec![0x80, 0x01]),
            // ch0 = 1000, ch1 = 800
            I2cTransaction::write_read(I2C_ADDRESS, vec![0x94], vec![0xE8, 0x03, 0x20, 0x03]),
        ];
        let i2c = I2cMock::new(&expectations);
        let mut sensor = Apds9930::new_async(i2c);

        block_on(async {
            sensor.init_async().await.unwrap();
            // second call touches nothing
            sensor.init_async().await.unwrap();
            let lux = sensor.read_lux_async().await.unwrap();
            assert!((lux - 0.56).abs() < 1e-3);
        });

        let mut i2c = sensor.destroy();
        i2c.done();
    }

    #[test]
    fn test_async_disable_proximity_clears_interrupt() {
        let expectations = [
            I2cTransaction::write_read(I2C_ADDRESS, vec![0x80], vec![0x25]),
            I2cTransaction::write(I2C_ADDRESS, vec![0x80, 0x01]),
        ];
        let i2c = I2cMock::new(&expectations);
        let mut sensor = Apds9930::new_async(i2c);

        block_on(async {
            sensor.enable_proximity_async(false, true).await.unwrap();
        });

        let mut i2c = sensor.destroy();
        i2c.done();
    }

    #[test]
    fn test_async_pulse_count_rejected_without_bus_access() {
        let expectations = [];
        let i2c = I2cMock::new(&expectations);
        let mut sensor = Apds9930::new_async(i2c);

        block_on(async {
            assert!(matches!(
                sensor.set_proximity_pulse_count_async(65).await,
                Err(Error::InvalidConfig(_))
            ));
        });

        let mut i2c = sensor.destroy();
        i2c.done();
    }

    #[test]
    fn test_async_bus_fault() {
        let expectations = [
            I2cTransaction::write_read(I2C_ADDRESS, vec![0x98], vec![0x00, 0x00])
                .with_error(ErrorKind::Other),
        ];
        let i2c = I2cMock::new(&expectations);
        let mut sensor = Apds9930::new_async(i2c);

        block_on(async {
            assert_eq!(
                sensor.read_proximity_value_async().await,
                Err(Error::I2c(ErrorKind::Other))
            );
        });

        let mut i2c = sensor.destroy();
        i2c.done();
    }
}
