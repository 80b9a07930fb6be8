//! Current-link slot.
//!
//! Written only by the lifecycle manager: set when a central connects,
//! cleared when it drops. Telemetry reads it to decide whether a value
//! update should also be notified.

use core::cell::RefCell;
use core::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use nrf_softdevice::ble::Connection;

static LINK: Mutex<CriticalSectionRawMutex, RefCell<Option<Connection>>> =
    Mutex::new(RefCell::new(None));

/// CCCD notification state of the telemetry characteristics.
pub static ACCELERATION_SUBSCRIBED: AtomicBool = AtomicBool::new(false);
pub static ANGULAR_RATE_SUBSCRIBED: AtomicBool = AtomicBool::new(false);

pub fn set(conn: Connection) {
    LINK.lock(|link| *link.borrow_mut() = Some(conn));
}

/// Forget the link and every subscription made on it.
pub fn clear() {
    LINK.lock(|link| *link.borrow_mut() = None);
    ACCELERATION_SUBSCRIBED.store(false, Ordering::Relaxed);
    ANGULAR_RATE_SUBSCRIBED.store(false, Ordering::Relaxed);
}

pub fn current() -> Option<Connection> {
    LINK.lock(|link| link.borrow().clone())
}
