//! Process-wide observable state shared across views
//!
//! Replaces ad hoc broadcast events with an explicit store: the cart badge and
//! the navbar user display subscribe here instead of being called directly by
//! whichever page mutated the cart or profile.

use tokio::sync::watch;

use crate::session::UserSnapshot;

/// Shared observable store for the cart count and the user snapshot
#[derive(Debug)]
pub struct SharedStore {
    cart_count: watch::Sender<usize>,
    user: watch::Sender<Option<UserSnapshot>>,
}

impl Default for SharedStore {
    fn default() -> Self {
        Self {
            cart_count: watch::channel(0).0,
            user: watch::channel(None).0,
        }
    }
}

impl SharedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a new cart count to all subscribers
    pub fn set_cart_count(&self, count: usize) {
        self.cart_count.send_replace(count);
    }

    pub fn cart_count(&self) -> usize {
        *self.cart_count.borrow()
    }

    /// Subscribe to cart count changes
    pub fn subscribe_cart(&self) -> watch::Receiver<usize> {
        self.cart_count.subscribe()
    }

    /// Publish a new user snapshot to all subscribers
    pub fn set_user_snapshot(&self, user: Option<UserSnapshot>) {
        self.user.send_replace(user);
    }

    pub fn user_snapshot(&self) -> Option<UserSnapshot> {
        self.user.borrow().clone()
    }

    /// Subscribe to user snapshot changes
    pub fn subscribe_user(&self) -> watch::Receiver<Option<UserSnapshot>> {
        self.user.subscribe()
    }
}
