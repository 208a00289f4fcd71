//! Host-to-UI notifications and the listener hub that fans them out.

use std::fmt;
use std::sync::{Arc, Mutex, Weak};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// An unsolicited broadcast from the host. Disjoint from [`crate::Command`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Notification {
    CookiesCleared,
    ReloadRequested,
}

impl Notification {
    pub const ALL: [Notification; 2] = [Notification::CookiesCleared, Notification::ReloadRequested];

    pub fn name(self) -> &'static str {
        match self {
            Notification::CookiesCleared => "cookies-cleared",
            Notification::ReloadRequested => "reload-requested",
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

type Listener = Arc<dyn Fn() + Send + Sync>;

struct Entry {
    id: u64,
    notification: Notification,
    listener: Listener,
}

#[derive(Default)]
struct HubInner {
    next_id: u64,
    entries: Vec<Entry>,
}

/// Ordered set of notification listeners.
///
/// Listeners for the same notification run in registration order. A
/// broadcast only reaches listeners registered before it; nothing is replayed.
#[derive(Clone, Default)]
pub struct NotificationHub {
    inner: Arc<Mutex<HubInner>>,
}

impl NotificationHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for `notification`.
    ///
    /// The listener stays registered until the returned [`Subscription`] is
    /// released or dropped, or forever if it is detached. A poisoned hub
    /// registers nothing and hands back an inert subscription.
    pub fn subscribe<F>(&self, notification: Notification, listener: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let registered = self.inner.lock().map(|mut inner| {
            let id = inner.next_id;
            inner.next_id += 1;
            inner.entries.push(Entry {
                id,
                notification,
                listener: Arc::new(listener),
            });
            id
        });
        match registered {
            Ok(id) => {
                debug!(%notification, id, "listener subscribed");
                Subscription {
                    hub: Arc::downgrade(&self.inner),
                    id,
                    active: true,
                }
            }
            Err(_) => {
                warn!(%notification, "listener not registered: hub lock poisoned");
                Subscription {
                    hub: Weak::new(),
                    id: 0,
                    active: false,
                }
            }
        }
    }

    /// Invoke every listener currently registered for `notification`.
    /// Returns how many ran.
    pub fn broadcast(&self, notification: Notification) -> usize {
        // Snapshot first so listeners may (un)subscribe while running.
        let listeners: Vec<Listener> = match self.inner.lock() {
            Ok(inner) => inner
                .entries
                .iter()
                .filter(|e| e.notification == notification)
                .map(|e| Arc::clone(&e.listener))
                .collect(),
            Err(_) => return 0,
        };

        for listener in &listeners {
            listener();
        }
        debug!(%notification, delivered = listeners.len(), "notification broadcast");
        listeners.len()
    }

}

impl fmt::Debug for NotificationHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.inner.lock().map_or(0, |inner| inner.entries.len());
        f.debug_struct("NotificationHub")
            .field("listeners", &count)
            .finish()
    }
}

/// Handle to a registered listener. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes the listener; call `detach` to keep it"]
#[derive(Debug)]
pub struct Subscription {
    hub: Weak<Mutex<HubInner>>,
    id: u64,
    active: bool,
}

impl Subscription {
    /// Remove the listener now.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    /// Keep the listener registered for the lifetime of the hub.
    pub fn detach(mut self) {
        self.active = false;
    }

    fn release(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        if let Some(inner) = self.hub.upgrade() {
            if let Ok(mut inner) = inner.lock() {
                inner.entries.retain(|e| e.id != self.id);
            }
        }
        debug!(id = self.id, "listener released");
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn recorder() -> (Arc<Mutex<Vec<&'static str>>>, NotificationHub) {
        (Arc::new(Mutex::new(Vec::new())), NotificationHub::new())
    }

    #[test]
    fn wire_names() {
        assert_eq!(Notification::CookiesCleared.name(), "cookies-cleared");
        assert_eq!(Notification::ReloadRequested.name(), "reload-requested");
        let json = serde_json::to_string(&Notification::ReloadRequested).unwrap();
        assert_eq!(json, "\"reload-requested\"");
    }

    #[test]
    fn listeners_run_in_registration_order() {
        let (log, hub) = recorder();
        for tag in ["first", "second", "third"] {
            let log = Arc::clone(&log);
            hub.subscribe(Notification::CookiesCleared, move || {
                log.lock().unwrap().push(tag);
            })
            .detach();
        }

        assert_eq!(hub.broadcast(Notification::CookiesCleared), 3);
        assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn broadcast_only_reaches_matching_notification() {
        let hits = Arc::new(AtomicUsize::new(0));
        let hub = NotificationHub::new();
        let h = Arc::clone(&hits);
        let _sub = hub.subscribe(Notification::ReloadRequested, move || {
            h.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(hub.broadcast(Notification::CookiesCleared), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(hub.broadcast(Notification::ReloadRequested), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unsubscribe_and_drop_release_listener() {
        let hits = Arc::new(AtomicUsize::new(0));
        let hub = NotificationHub::new();

        let h = Arc::clone(&hits);
        let sub = hub.subscribe(Notification::CookiesCleared, move || {
            h.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(hub.broadcast(Notification::CookiesCleared), 1);
        sub.unsubscribe();
        assert_eq!(hub.broadcast(Notification::CookiesCleared), 0);

        {
            let h = Arc::clone(&hits);
            let _scoped = hub.subscribe(Notification::CookiesCleared, move || {
                h.fetch_add(1, Ordering::SeqCst);
            });
        }
        assert_eq!(hub.broadcast(Notification::CookiesCleared), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn late_subscribers_get_nothing_replayed() {
        let hits = Arc::new(AtomicUsize::new(0));
        let hub = NotificationHub::new();
        hub.broadcast(Notification::CookiesCleared);

        let h = Arc::clone(&hits);
        let _sub = hub.subscribe(Notification::CookiesCleared, move || {
            h.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn listener_may_subscribe_during_broadcast() {
        let hub = NotificationHub::new();
        let inner_hub = hub.clone();
        hub.subscribe(Notification::ReloadRequested, move || {
            inner_hub
                .subscribe(Notification::ReloadRequested, || {})
                .detach();
        })
        .detach();

        assert_eq!(hub.broadcast(Notification::ReloadRequested), 1);
        assert_eq!(hub.broadcast(Notification::ReloadRequested), 2);
    }

    #[test]
    fn subscribe_on_poisoned_hub_is_inert() {
        let hub = NotificationHub::new();
        let kept = hub.subscribe(Notification::CookiesCleared, || {});

        let poisoner = hub.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.inner.lock().unwrap();
            panic!("poison the hub");
        })
        .join();

        let sub = hub.subscribe(Notification::CookiesCleared, || {});
        assert!(!sub.active);
        assert!(sub.hub.upgrade().is_none());
        drop(sub);

        // The inert handle must not release the listener registered first.
        let entries = match hub.inner.lock() {
            Ok(inner) => inner.entries.len(),
            Err(poisoned) => poisoned.into_inner().entries.len(),
        };
        assert_eq!(entries, 1);
        kept.detach();
    }

    #[test]
    fn subscription_outliving_hub_is_harmless() {
        let hub = NotificationHub::new();
        let sub = hub.subscribe(Notification::CookiesCleared, || {});
        drop(hub);
        sub.unsubscribe();
    }
}
