// src/controller/sync_controller/transaction.rs

use super::SyncController;
use crate::common::{
    command::Command,
    error::Tpg261Error,
    frame::ENQ,
    hal_traits::{GaugeSerial, GaugeTimer},
    response::{decode_line, Acknowledgement},
};
use log::{debug, trace, warn};

impl<IF> SyncController<IF>
where
    IF: GaugeSerial + GaugeTimer,
{
    /// Executes the two-phase handshake for `command` and returns the
    /// enquiry payload with its terminator stripped.
    ///
    /// There is no retry: a rejected or garbled command phase aborts before
    /// ENQ is sent.
    pub(super) fn execute_transaction<'buf>(
        &mut self,
        command: &Command,
        read_buffer: &'buf mut [u8],
    ) -> Result<&'buf str, Tpg261Error<IF::Error>> {
        if !self.is_connected() {
            return Err(Tpg261Error::NotConnected);
        }

        self.command_phase(command, read_buffer)?;
        self.enquiry_phase(read_buffer)
    }

    /// Sends the command frame and expects `<ACK><CR><LF>` back.
    fn command_phase(
        &mut self,
        command: &Command,
        read_buffer: &mut [u8],
    ) -> Result<(), Tpg261Error<IF::Error>> {
        let frame = command.format_into().map_err(|_| Tpg261Error::CommandFormat)?;

        debug!("{} sent", command);
        self.send_bytes(frame.as_bytes())?;

        let line = self.read_response_line(read_buffer)?;
        let text = decode_line(line).map_err(Tpg261Error::MalformedResponse)?;

        match Acknowledgement::classify(text) {
            Acknowledgement::Ack => Ok(()),
            Acknowledgement::Nak => {
                warn!("'{}' rejected with NAK", command);
                Err(Tpg261Error::CommandRejected {
                    command: command.to_command_string(),
                })
            }
            Acknowledgement::Unexpected => {
                warn!("'{}' answered with {:?} instead of ACK", command, text);
                Err(Tpg261Error::CommandRejected {
                    command: command.to_command_string(),
                })
            }
        }
    }

    /// Sends ENQ and reads the data line the device has pending.
    fn enquiry_phase<'buf>(
        &mut self,
        read_buffer: &'buf mut [u8],
    ) -> Result<&'buf str, Tpg261Error<IF::Error>> {
        debug!("ENQ sent");
        self.send_bytes(&[ENQ])?;

        let line = self.read_response_line(read_buffer)?;
        let text = decode_line(line).map_err(Tpg261Error::MalformedResponse)?;
        trace!("Received {:?}", text);
        Ok(text)
    }
}
