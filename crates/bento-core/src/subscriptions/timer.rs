use crate::subscription::{Subscription, SubscriptionId};
use futures::StreamExt;
use std::time::{Duration, Instant};
use tokio::time::MissedTickBehavior;
use tokio_stream::wrappers::IntervalStream;

/// Marker type for timer subscription ids.
pub struct Every;

/// A repeating timer that emits the current [`Instant`] every `interval`.
///
/// `key` distinguishes timers: two widgets spinning at once need different
/// keys or they will share one timer.
///
/// ```rust,ignore
/// every(Duration::from_millis(80), "users-spinner").map(|_| Message::Tick)
/// ```
pub fn every(interval: Duration, key: &str) -> Subscription<Instant> {
    Subscription::lazy(SubscriptionId::with_str::<Every>(key), move || {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        IntervalStream::new(ticker)
            .map(|tick| tick.into_std())
            .boxed()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timers_with_same_key_share_an_id() {
        let a = every(Duration::from_millis(10), "spin");
        let b = every(Duration::from_millis(50), "spin");
        let c = every(Duration::from_millis(10), "other");
        assert_eq!(a.id(), b.id());
        assert_ne!(a.id(), c.id());
    }
}
