//! Commerce store: the stateful core behind the storefront UI.
//!
//! One owned state object, constructed at process start and handed to
//! consumers by reference. Mutations are synchronous and total, so a burst of
//! UI events applies strictly in call order with no lost updates. After every
//! cart or wishlist change the durable subset is written through the injected
//! [`SnapshotSink`].

pub mod persist;

pub use persist::{load_snapshot, KeyValue, KvSink, MemoryKv, Snapshot, SnapshotSink, STORAGE_KEY};

use crate::domain::cart::Cart;
use crate::domain::catalog::Product;
use crate::domain::profile::UserProfile;

#[derive(Debug)]
pub struct CommerceStore<S: SnapshotSink = ()> {
    user: Option<UserProfile>,
    auth_ready: bool,
    cart: Cart,
    wishlist: Vec<String>,
    search_query: String,
    sink: S,
}

impl CommerceStore<()> {
    /// In-memory store with no persistence, mostly for tests and previews.
    pub fn in_memory() -> Self {
        Self::hydrate((), Snapshot::default())
    }
}

impl<S: SnapshotSink> CommerceStore<S> {
    /// Seeds cart and wishlist from a previously persisted snapshot.
    pub fn hydrate(sink: S, snapshot: Snapshot) -> Self {
        tracing::debug!(
            cart_lines = snapshot.cart.len(),
            wishlist = snapshot.wishlist.len(),
            "hydrating commerce store"
        );
        Self {
            user: None,
            auth_ready: false,
            cart: Cart::from_lines(snapshot.cart),
            wishlist: snapshot.wishlist,
            search_query: String::new(),
            sink,
        }
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn auth_ready(&self) -> bool {
        self.auth_ready
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn wishlist(&self) -> &[String] {
        &self.wishlist
    }

    pub fn in_wishlist(&self, product_id: &str) -> bool {
        self.wishlist.iter().any(|id| id == product_id)
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Wholesale identity replacement; last call wins. Not persisted.
    pub fn set_user(&mut self, user: Option<UserProfile>) {
        self.user = user;
    }

    /// Records that the initial auth check resolved. Gates admin UI only,
    /// never store mutations.
    pub fn set_auth_ready(&mut self, ready: bool) {
        self.auth_ready = ready;
    }

    pub fn add_to_cart(&mut self, product: &Product, selected_color: Option<&str>) {
        self.cart.add(product, selected_color);
        self.flush();
    }

    pub fn remove_from_cart(&mut self, product_id: &str, selected_color: Option<&str>) {
        self.cart.remove(product_id, selected_color);
        self.flush();
    }

    pub fn update_quantity(&mut self, product_id: &str, delta: i64, selected_color: Option<&str>) {
        self.cart.update_quantity(product_id, delta, selected_color);
        self.flush();
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.flush();
    }

    /// Flips membership: present ids are removed, absent ids appended.
    pub fn toggle_wishlist(&mut self, product_id: &str) {
        if let Some(pos) = self.wishlist.iter().position(|id| id == product_id) {
            self.wishlist.remove(pos);
        } else {
            self.wishlist.push(product_id.to_string());
        }
        self.flush();
    }

    /// Transient filter text, replaced verbatim. Never persisted.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    fn flush(&mut self) {
        let snapshot = Snapshot {
            cart: self.cart.lines().to_vec(),
            wishlist: self.wishlist.clone(),
        };
        self.sink.persist(&snapshot);
    }
}
