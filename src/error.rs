//! Unified error type for alvik-ble.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Derives `defmt::Format` for efficient on-target logging when the
//! `defmt` feature is enabled.
//!
//! A dropped link is not an error: disconnect is a normal lifecycle
//! transition and simply restarts advertising.

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Wire
    /// Payload length does not match the characteristic's fixed layout.
    MalformedPayload { expected: usize, actual: usize },

    /// Drive heading outside the declared ±180° range.
    AngleOutOfRange(i16),

    // Hardware
    /// The motion driver could not produce a sample.
    SensorReadFailure,

    // BLE
    /// The link stack reported an error.
    Ble(BleError),

    /// Advertising payload does not fit the 31-byte legacy PDU.
    AdvertisementTooLong,
}

/// Subset of link-stack errors we propagate (keeps the enum `Copy`-friendly).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BleError {
    /// Advertising could not start or was aborted.
    AdvertiseFailed,
    /// Updating a characteristic value failed.
    SetValueFailed,
    /// Sending a notification to the connected link failed.
    NotifyFailed,
}

// Convenience conversions

impl From<BleError> for Error {
    fn from(e: BleError) -> Self {
        Error::Ble(e)
    }
}
