use crate::event::TerminalEvent;
use crate::subscription::{Subscription, SubscriptionId};
use crossterm::event::EventStream;
use futures::StreamExt;
use std::sync::Arc;

/// Marker type giving terminal input its singleton [`SubscriptionId`].
pub struct TerminalEvents;

/// Subscribe to terminal input, mapping each event to a message or dropping it.
///
/// Only one terminal subscription is ever live: the id is a singleton, so the
/// mapping closure captured by the first call stays in effect until the
/// subscription is dropped from the declared set. Route by reading state in
/// `update`, not by capturing it here.
///
/// ```rust,ignore
/// fn subscriptions(&self) -> Vec<Subscription<Msg>> {
///     vec![terminal_events(|event| match event {
///         TerminalEvent::Key(key) => Some(Msg::Key(key)),
///         TerminalEvent::Paste(text) => Some(Msg::Paste(text)),
///         _ => None,
///     })]
/// }
/// ```
pub fn terminal_events<Msg: Send + 'static>(
    map: impl Fn(TerminalEvent) -> Option<Msg> + Send + Sync + 'static,
) -> Subscription<Msg> {
    let map = Arc::new(map);
    Subscription::lazy(SubscriptionId::of::<TerminalEvents>(), move || {
        EventStream::new()
            .filter_map(move |result| {
                let map = map.clone();
                async move {
                    result
                        .ok()
                        .and_then(TerminalEvent::from_crossterm)
                        .and_then(|event| map(event))
                }
            })
            .boxed()
    })
}
