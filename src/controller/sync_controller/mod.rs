// src/controller/sync_controller/mod.rs

mod commands;
mod io_helpers;
mod transaction;

use crate::common::{
    config::SerialConfig,
    error::Tpg261Error,
    hal_traits::{GaugeSerial, GaugeTimer},
};
use log::{debug, warn};

/// Blocking protocol engine for one TPG 261 controller.
///
/// Owns the channel exclusively. The protocol is half-duplex, so every
/// operation takes `&mut self`; callers sharing one instrument across threads
/// must serialize access themselves.
///
/// The channel starts closed. Dropping a connected controller closes it.
#[derive(Debug)]
pub struct SyncController<IF>
where
    IF: GaugeSerial + GaugeTimer,
{
    interface: IF,
    config: SerialConfig,
}

impl<IF> SyncController<IF>
where
    IF: GaugeSerial + GaugeTimer,
{
    pub fn new(interface: IF) -> Self {
        Self::with_config(interface, SerialConfig::default())
    }

    pub fn with_config(interface: IF, config: SerialConfig) -> Self {
        SyncController { interface, config }
    }

    pub fn config(&self) -> &SerialConfig {
        &self.config
    }

    pub fn interface(&self) -> &IF {
        &self.interface
    }

    /// Returns whether the channel to the controller is open.
    pub fn is_connected(&self) -> bool {
        self.interface.is_open()
    }

    /// Opens the channel and discards anything left in its buffers, so the
    /// first handshake starts on a frame boundary.
    pub fn connect(&mut self) -> Result<(), Tpg261Error<IF::Error>> {
        if self.is_connected() {
            return Err(Tpg261Error::AlreadyConnected);
        }
        self.interface.open()?;
        debug!("Serial connection opened");

        if let Err(e) = self.interface.clear_buffers() {
            // An unflushed channel would feed stale bytes into the next handshake
            if let Err(close_err) = self.interface.close() {
                warn!("Failed to close connection after flush error: {:?}", close_err);
            }
            return Err(Tpg261Error::Io(e));
        }
        debug!("Flush input and output");
        Ok(())
    }

    /// Closes the channel.
    pub fn disconnect(&mut self) -> Result<(), Tpg261Error<IF::Error>> {
        if !self.is_connected() {
            return Err(Tpg261Error::NotConnected);
        }
        self.interface.close()?;
        debug!("Serial connection closed");
        Ok(())
    }
}

impl<IF> Drop for SyncController<IF>
where
    IF: GaugeSerial + GaugeTimer,
{
    fn drop(&mut self) {
        if self.is_connected() {
            if let Err(e) = self.disconnect() {
                warn!("Failed to close connection on drop: {}", e);
            }
        }
    }
}
