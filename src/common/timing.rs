// src/common/timing.rs

use core::time::Duration;

// The controller answers within a few milliseconds at any supported rate, so
// the read deadline is generous and covers the whole response line.

/// Default deadline for one complete response line.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(1);

// === Character timing (8N1) ===
// 1 start bit + 8 data bits + 1 stop bit = 10 bits per byte

/// Bit times per character on the wire.
pub const BITS_PER_CHARACTER: u32 = 10;

/// Nominal duration of one character at `baud`.
pub const fn byte_duration(baud: u32) -> Duration {
    Duration::from_micros((BITS_PER_CHARACTER as u64 * 1_000_000) / baud as u64)
}

// === Write side ===

/// Slack added on top of the nominal transmit time of a frame.
pub const WRITE_TIMEOUT_MARGIN: Duration = Duration::from_millis(20);
/// Maximum time for the channel to drain its transmit buffer.
pub const FLUSH_TIMEOUT: Duration = Duration::from_millis(100);

// === Busy-wait ===

/// Delay between polls of a channel that returned `WouldBlock`.
pub const POLL_INTERVAL_US: u32 = 100;
