// src/controller/sync_controller/commands.rs

use super::SyncController;
use crate::common::{
    command::Command,
    error::Tpg261Error,
    hal_traits::{GaugeSerial, GaugeTimer},
    response::{parse_code, parse_value, split_exact, split_fields, MAX_FIELDS},
    status::{collect_faults, decode_status, FaultList, StatusCode, StatusFamily},
    types::{GaugeId, PressureUnit},
};
use log::{debug, warn};

/// Read buffer for one response line. The longest reply (`RES` diagnostics)
/// is well below this.
const LINE_BUFFER_LEN: usize = 64;

impl<IF> SyncController<IF>
where
    IF: GaugeSerial + GaugeTimer,
{
    /// Runs the controller self-test (`RES`).
    ///
    /// Every non-zero diagnostic code is reported in one
    /// [`Tpg261Error::DeviceFault`], in the order the device listed them.
    pub fn reset(&mut self) -> Result<(), Tpg261Error<IF::Error>> {
        let mut buffer = [0u8; LINE_BUFFER_LEN];
        let payload = self.execute_transaction(&Command::Reset, &mut buffer)?;

        let fields = split_fields(payload).map_err(Tpg261Error::MalformedResponse)?;
        let codes = fields
            .iter()
            .map(|field| parse_code(field))
            .collect::<Result<heapless::Vec<StatusCode, MAX_FIELDS>, _>>()
            .map_err(Tpg261Error::MalformedResponse)?;

        let faults =
            collect_faults(StatusFamily::Reset, codes).map_err(Tpg261Error::unknown_status)?;
        if !faults.is_empty() {
            warn!("Reset reported: {}", faults);
            return Err(Tpg261Error::DeviceFault {
                family: StatusFamily::Reset,
                faults,
            });
        }
        Ok(())
    }

    /// Reads the pressure of `gauge` (`PRx`), in the unit currently
    /// configured on the device.
    pub fn read_pressure(&mut self, gauge: GaugeId) -> Result<f64, Tpg261Error<IF::Error>> {
        let mut buffer = [0u8; LINE_BUFFER_LEN];
        let payload = self.execute_transaction(&Command::ReadPressure { gauge }, &mut buffer)?;

        let fields = split_exact(payload, 2).map_err(Tpg261Error::MalformedResponse)?;
        let status = parse_code(fields[0]).map_err(Tpg261Error::MalformedResponse)?;

        match decode_status(StatusFamily::Pressure, status) {
            Ok(None) => {}
            Ok(Some(description)) => {
                return Err(Tpg261Error::DeviceFault {
                    family: StatusFamily::Pressure,
                    faults: FaultList::single(description),
                })
            }
            Err(unknown) => return Err(Tpg261Error::unknown_status(unknown)),
        }

        let value = parse_value(fields[1]).map_err(Tpg261Error::MalformedResponse)?;
        debug!("Gauge {} pressure {:e}", gauge, value);
        Ok(value)
    }

    /// Queries the pressure unit (`UNI`).
    pub fn get_pressure_unit(&mut self) -> Result<PressureUnit, Tpg261Error<IF::Error>> {
        let mut buffer = [0u8; LINE_BUFFER_LEN];
        let payload = self.execute_transaction(&Command::QueryUnit, &mut buffer)?;
        Self::decode_unit(payload)
    }

    /// Sets the pressure unit (`UNI,n`) and verifies the unit the device
    /// reports back.
    ///
    /// Fails with [`Tpg261Error::UnitMismatch`] if the device did not apply it.
    pub fn set_pressure_unit(&mut self, unit: PressureUnit) -> Result<(), Tpg261Error<IF::Error>> {
        let mut buffer = [0u8; LINE_BUFFER_LEN];
        let payload = self.execute_transaction(&Command::SetUnit { unit }, &mut buffer)?;

        let confirmed = Self::decode_unit(payload)?;
        if confirmed != unit {
            warn!("Unit change to {} ignored, device reports {}", unit, confirmed);
            return Err(Tpg261Error::UnitMismatch {
                requested: unit,
                confirmed,
            });
        }
        Ok(())
    }

    /// Like [`set_pressure_unit`](Self::set_pressure_unit), taking a
    /// case-insensitive name (`bar`, `torr`, `pa`, `pascal`).
    pub fn set_pressure_unit_by_name(&mut self, name: &str) -> Result<(), Tpg261Error<IF::Error>> {
        let unit = name.parse::<PressureUnit>().map_err(|_| Tpg261Error::InvalidUnit)?;
        self.set_pressure_unit(unit)
    }

    // The unit code is the first field of the reply.
    fn decode_unit(payload: &str) -> Result<PressureUnit, Tpg261Error<IF::Error>> {
        let fields = split_fields(payload).map_err(Tpg261Error::MalformedResponse)?;
        let code = parse_code(fields[0]).map_err(Tpg261Error::MalformedResponse)?;
        u8::try_from(code)
            .ok()
            .and_then(PressureUnit::from_code)
            .ok_or(Tpg261Error::UnknownStatusCode {
                code,
                family: StatusFamily::Unit,
            })
    }
}
