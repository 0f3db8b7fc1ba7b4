// src/controller/sync_controller/io_helpers.rs

use super::SyncController; // Access SyncController definition
use crate::common::{
    error::Tpg261Error,
    frame::{CR, LF},
    hal_traits::{GaugeSerial, GaugeTimer},
    response::ResponseParseError,
    timing,
};
use nb::Result as NbResult;

// Implementation block for I/O related helpers
impl<IF> SyncController<IF>
where
    IF: GaugeSerial + GaugeTimer,
{
    /// Executes a non-blocking I/O operation (`f`) repeatedly until it stops
    /// returning `WouldBlock`.
    ///
    /// Returns `Err(nb::Error::WouldBlock)` once `deadline` has passed.
    pub(super) fn execute_blocking_io_until<FN, T>(
        &mut self,
        deadline: IF::Instant,
        mut f: FN,
    ) -> NbResult<T, IF::Error>
    where
        FN: FnMut(&mut IF) -> NbResult<T, IF::Error>,
    {
        loop {
            match f(&mut self.interface) {
                Err(nb::Error::WouldBlock) => {
                    if self.interface.now() >= deadline {
                        return Err(nb::Error::WouldBlock);
                    }
                    self.interface.delay_us(timing::POLL_INTERVAL_US);
                }
                other => return other,
            }
        }
    }

    /// Writes `bytes` and waits for the channel to drain them.
    pub(super) fn send_bytes(&mut self, bytes: &[u8]) -> Result<(), Tpg261Error<IF::Error>> {
        let deadline = self.interface.now() + self.config.write_timeout(bytes.len());
        for &byte in bytes {
            self.execute_blocking_io_until(deadline, |iface| iface.write_byte(byte))
                .map_err(write_error)?;
        }

        let deadline = self.interface.now() + timing::FLUSH_TIMEOUT;
        self.execute_blocking_io_until(deadline, |iface| iface.flush())
            .map_err(write_error)?;
        Ok(())
    }

    /// Reads one response line, up to and including <CR><LF>, into `buffer`.
    ///
    /// The read timeout from the config bounds the whole line.
    pub(super) fn read_response_line<'buf>(
        &mut self,
        buffer: &'buf mut [u8],
    ) -> Result<&'buf [u8], Tpg261Error<IF::Error>> {
        let deadline = self.interface.now() + self.config.read_timeout;

        let mut bytes_read = 0;
        loop {
            if bytes_read >= buffer.len() {
                return Err(Tpg261Error::MalformedResponse(ResponseParseError::LineTooLong {
                    capacity: buffer.len(),
                }));
            }

            match self.execute_blocking_io_until(deadline, |iface| iface.read_byte()) {
                Ok(byte) => {
                    buffer[bytes_read] = byte;
                    bytes_read += 1;

                    if bytes_read >= 2
                        && buffer[bytes_read - 2] == CR
                        && buffer[bytes_read - 1] == LF
                    {
                        return Ok(&buffer[..bytes_read]);
                    }
                }
                Err(nb::Error::WouldBlock) => {
                    let reason = if bytes_read > 0 {
                        ResponseParseError::MissingTerminator
                    } else {
                        ResponseParseError::NoData
                    };
                    return Err(Tpg261Error::MalformedResponse(reason));
                }
                Err(nb::Error::Other(e)) => return Err(Tpg261Error::Io(e)),
            }
        }
    }
}

fn write_error<E: core::fmt::Debug>(err: nb::Error<E>) -> Tpg261Error<E> {
    match err {
        nb::Error::WouldBlock => Tpg261Error::WriteTimeout,
        nb::Error::Other(e) => Tpg261Error::Io(e),
    }
}

// --- Unit Tests for IO Helpers ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::config::SerialConfig;
    use crate::common::mock::{connected, MockCommError, MockGauge, MockInstant};
    use core::time::Duration;

    #[test]
    fn test_execute_blocking_io_until() {
        let mut controller = SyncController::new(MockGauge::new());

        // Ok path after a few WouldBlock polls
        let mut calls = 0;
        let result: NbResult<i32, MockCommError> =
            controller.execute_blocking_io_until(MockInstant(10_000), |_| {
                calls += 1;
                if calls < 4 { Err(nb::Error::WouldBlock) } else { Ok(123) }
            });
        assert_eq!(result, Ok(123));
        assert_eq!(calls, 4);

        // Deadline path
        controller.interface.current_time_us = 0;
        let result: NbResult<(), MockCommError> =
            controller.execute_blocking_io_until(MockInstant(1_000), |iface| {
                iface.current_time_us += 400;
                Err(nb::Error::WouldBlock)
            });
        assert_eq!(result, Err(nb::Error::WouldBlock));
        assert!(controller.interface.current_time_us >= 1_000);

        // IO error path
        let result: NbResult<(), MockCommError> = controller
            .execute_blocking_io_until(MockInstant(u64::MAX), |_| {
                Err(nb::Error::Other(MockCommError))
            });
        assert_eq!(result, Err(nb::Error::Other(MockCommError)));
    }

    #[test]
    fn test_read_response_line_success() {
        let mut mock = MockGauge::new();
        mock.read_queue.extend(b"0,1.0000E-02\r\n".iter().copied());
        let mut controller = SyncController::new(mock);
        let mut buffer = [0u8; 32];

        let line = controller.read_response_line(&mut buffer).unwrap();
        assert_eq!(line, b"0,1.0000E-02\r\n");
    }

    #[test]
    fn test_read_response_line_stops_at_first_terminator() {
        let mut mock = MockGauge::new();
        mock.read_queue.extend(b"\x06\r\n2\r\n".iter().copied());
        let mut controller = SyncController::new(mock);
        let mut buffer = [0u8; 32];

        assert_eq!(controller.read_response_line(&mut buffer).unwrap(), b"\x06\r\n");
        assert_eq!(controller.read_response_line(&mut buffer).unwrap(), b"2\r\n");
    }

    #[test]
    fn test_read_response_line_timeout_no_data() {
        let mut controller = SyncController::new(MockGauge::new());
        let mut buffer = [0u8; 32];
        let result = controller.read_response_line(&mut buffer);
        assert_eq!(result, Err(Tpg261Error::MalformedResponse(ResponseParseError::NoData)));
        // Gave up at the deadline, not before
        assert!(controller.interface.current_time_us >= 1_000_000);
    }

    #[test]
    fn test_read_response_line_honours_configured_timeout() {
        let config = SerialConfig::new().with_read_timeout(Duration::from_millis(50));
        let mut controller = SyncController::with_config(MockGauge::new(), config);
        let mut buffer = [0u8; 32];
        assert!(controller.read_response_line(&mut buffer).is_err());
        assert!(controller.interface.current_time_us >= 50_000);
        assert!(controller.interface.current_time_us < 1_000_000);
    }

    #[test]
    fn test_read_response_line_timeout_partial_data() {
        let mut mock = MockGauge::new();
        mock.read_queue.extend(b"0,1.00".iter().copied());
        let mut controller = SyncController::new(mock);
        let mut buffer = [0u8; 32];
        let result = controller.read_response_line(&mut buffer);
        assert_eq!(
            result,
            Err(Tpg261Error::MalformedResponse(ResponseParseError::MissingTerminator))
        );
    }

    #[test]
    fn test_read_response_line_buffer_overflow() {
        let mut mock = MockGauge::new();
        mock.read_queue.extend(b"0,1.0000E-02\r\n".iter().copied());
        let mut controller = SyncController::new(mock);
        let mut buffer = [0u8; 8];
        let result = controller.read_response_line(&mut buffer);
        assert_eq!(
            result,
            Err(Tpg261Error::MalformedResponse(ResponseParseError::LineTooLong { capacity: 8 }))
        );
    }

    #[test]
    fn test_send_bytes_success() {
        let mut controller = connected(MockGauge::new());
        assert_eq!(controller.send_bytes(b"RES\r\n"), Ok(()));
        assert_eq!(controller.interface.written.as_slice(), b"RES\r\n");
    }

    #[test]
    fn test_send_bytes_io_error() {
        let mut controller = connected(MockGauge::new());
        controller.interface.fail_writes = true;
        assert_eq!(controller.send_bytes(b"RES\r\n"), Err(Tpg261Error::Io(MockCommError)));
        assert!(controller.interface.written.is_empty());
    }

    #[test]
    fn test_write_error_mapping() {
        assert_eq!(write_error::<MockCommError>(nb::Error::WouldBlock), Tpg261Error::WriteTimeout);
        assert_eq!(
            write_error(nb::Error::Other(MockCommError)),
            Tpg261Error::Io(MockCommError)
        );
    }
}
