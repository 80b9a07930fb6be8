//! Connection lifecycle - serially advertise, accept one link, wait for
//! it to drop, repeat.
//!
//! Advertising stops as soon as a central connects, so at most one link
//! exists at a time. Re-advertising after a disconnect is immediate: the
//! loop goes straight from [`Peripheral::disconnected`] back to
//! [`Peripheral::advertise`] without suspending in between.

use core::convert::Infallible;

use crate::error::Error;

/// Peripheral-role side of the link stack.
#[allow(async_fn_in_trait)]
pub trait Peripheral {
    /// Handle to a live link. Dropping it releases the link.
    type Link;

    /// Advertise until a central connects. No timeout.
    async fn advertise(&mut self) -> Result<Self::Link, Error>;

    /// Serve `link` until the remote disconnects. No timeout.
    async fn disconnected(&mut self, link: Self::Link);
}

/// Run the advertise / connect / disconnect cycle forever.
///
/// Returns only if advertising itself fails.
pub async fn run<P: Peripheral>(peripheral: &mut P) -> Result<Infallible, Error> {
    let mut sessions: u32 = 0;

    loop {
        let link = match peripheral.advertise().await {
            Ok(link) => link,
            Err(e) => {
                error!("Advertising failed: {:?}", e);
                return Err(e);
            }
        };

        sessions = sessions.wrapping_add(1);
        info!("Link #{} up", sessions);

        peripheral.disconnected(link).await;
        info!("Link #{} down - advertising again", sessions);
    }
}
