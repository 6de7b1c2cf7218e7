//! Storefront Core
//!
//! Client-side commerce state for a retail storefront.
//!
//! ## Features
//! - Product catalog model with discount-derived pricing
//! - Cart with (product, color-variant) line identity and merge semantics
//! - Wishlist membership and transient search state
//! - Durable `{cart, wishlist}` snapshot with restart rehydration
//! - Admin-gated catalog editing against remote storage collaborators
//!
//! State lives in one owned [`CommerceStore`], constructed at process start
//! and passed to consumers by reference. Remote collaborators (auth,
//! relational storage, binary storage, local key-value storage) are traits,
//! mocked in tests.

pub mod domain;
pub mod error;
pub mod flow;
pub mod store;

pub use domain::{is_admin, Cart, CartLine, Category, Product, UserProfile, ADMIN_EMAILS};
pub use error::{error_message, BackendError, Result, StorefrontError};
pub use flow::{BlobStorage, ImageUpload, NewProduct, ProductForm, ProductRepository, MAX_IMAGES};
pub use store::{load_snapshot, CommerceStore, KeyValue, KvSink, Snapshot, SnapshotSink};
