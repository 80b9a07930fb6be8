//! Characteristic seams between the core tasks and the link stack.
//!
//! The tasks never touch the connection handle. They see characteristics
//! only as a source of remote writes ([`WriteSource`]) or as a value slot
//! that can push notifications ([`NotifySink`]).

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Receiver;
use heapless::Vec;

use crate::config::MAX_WRITE_LEN;
use crate::error::Error;

/// Raw bytes of one remote write. Variable length so malformed writes
/// reach the decoder instead of being rejected inside the stack.
pub type Payload = Vec<u8, MAX_WRITE_LEN>;

/// A characteristic the remote side writes to.
#[allow(async_fn_in_trait)]
pub trait WriteSource {
    /// Suspend until the next remote write arrives. No timeout.
    async fn written(&mut self) -> Payload;
}

/// Writes captured by the GATT event callback are queued on a channel;
/// handlers drain it in arrival order.
impl<M: RawMutex, const N: usize> WriteSource for Receiver<'_, M, Payload, N> {
    async fn written(&mut self) -> Payload {
        self.receive().await
    }
}

/// A characteristic the device updates and notifies.
pub trait NotifySink {
    /// Store `value` as the current characteristic value and notify the
    /// connected link if there is one and it subscribed. Without a link the
    /// value is retained silently. Never waits for the remote side.
    fn write_notify(&mut self, value: &[u8]) -> Result<(), Error>;
}
