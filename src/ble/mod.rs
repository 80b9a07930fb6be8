//! Bluetooth Low Energy helpers that do not need the SoftDevice.
//!
//! The device runs in **Peripheral** role only:
//!
//! 1. **Advertising** - builds the legacy advertising payload (flags,
//!    service UUID, appearance, name) from [`AdvertisingConfig`].
//! 2. **Parser** - reads AD structures back out of a raw payload.
//!
//! The SoftDevice binding itself lives in the firmware binary.

pub mod adv_parser;
pub mod advertising;

pub use advertising::{AdvertisementData, AdvertisingConfig};
