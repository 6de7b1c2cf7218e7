//! Domain model
pub mod cart;
pub mod catalog;
pub mod profile;

pub use cart::{Cart, CartLine};
pub use catalog::{placeholder_image, Category, Product};
pub use profile::{is_admin, UserProfile, ADMIN_EMAILS};
