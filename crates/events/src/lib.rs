//! `mizan-events` — cross-component change notification.
//!
//! Views and services that care about "the selected institution changed" or
//! "settings were saved" subscribe here instead of listening for ambient
//! global events. The bus is an explicit, injected dependency so listeners
//! stay decoupled from publishers without any global mutable state.

pub mod bus;
pub mod memory;
pub mod notice;

pub use bus::{NoticeBus, Subscription};
pub use memory::{InMemoryBusError, InMemoryNoticeBus};
pub use notice::Notice;

/// The bus handle services share within one client session.
pub type SharedBus = std::sync::Arc<InMemoryNoticeBus<Notice>>;

/// Publish a notice, logging (never failing) when the bus is unusable.
///
/// By the time a notice is published the state change already happened, so a
/// bus failure must not turn a successful operation into an error.
pub fn publish_or_log(bus: &SharedBus, notice: Notice) {
    if let Err(err) = bus.publish(notice.clone()) {
        tracing::warn!(?err, ?notice, "failed to publish change notice");
    }
}
