//! Catalog editing flow.
//!
//! Assembles a complete product payload from operator input plus an ordered
//! image list, then inserts or updates the record through the remote
//! collaborators. Validation runs entirely client-side, before any remote
//! call; the whole flow sits behind the admin gate.

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::catalog::{Category, Product};
use crate::domain::profile::{is_admin, UserProfile};
use crate::error::{BackendError, Result, StorefrontError};

/// Total images per product, retained plus newly added.
pub const MAX_IMAGES: usize = 5;

/// Relational storage collaborator for product records.
#[async_trait]
pub trait ProductRepository {
    async fn insert(&self, product: NewProduct) -> std::result::Result<Product, BackendError>;
    async fn update(
        &self,
        id: &str,
        product: NewProduct,
    ) -> std::result::Result<Product, BackendError>;
    async fn fetch(&self, id: &str) -> std::result::Result<Product, BackendError>;
    async fn delete(&self, id: &str) -> std::result::Result<(), BackendError>;
    async fn list(&self) -> std::result::Result<Vec<Product>, BackendError>;
}

/// Binary object storage collaborator. One call per new image; returns the
/// durable public URL.
#[async_trait]
pub trait BlobStorage {
    async fn upload(
        &self,
        name: &str,
        bytes: Vec<u8>,
    ) -> std::result::Result<String, BackendError>;
}

/// A new image picked by the operator, not yet uploaded.
#[derive(Clone, Debug)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Raw operator input for the create/edit form. Price, discount and colors
/// arrive as free text and are normalized on submit.
#[derive(Clone, Debug, Default)]
pub struct ProductForm {
    pub name: String,
    pub price: String,
    pub category: Option<Category>,
    pub description: String,
    pub discount: String,
    pub colors: String,
    /// Stored references kept in place, in display order.
    pub existing_images: Vec<String>,
    pub new_images: Vec<ImageUpload>,
}

impl ProductForm {
    fn total_images(&self) -> usize {
        self.existing_images.len() + self.new_images.len()
    }
}

/// Fully normalized payload handed to the repository.
#[derive(Clone, Debug, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub category: Category,
    pub description: String,
    pub image_urls: Vec<String>,
    /// Blank input normalizes to 0, never to an absent value.
    pub discount: Decimal,
    pub colors: Vec<String>,
}

/// Splits free-text color input into an ordered list of trimmed, non-empty
/// labels. Case is preserved for display.
pub fn normalize_colors(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_price(input: &str) -> Result<Decimal> {
    let price: Decimal = input
        .trim()
        .parse()
        .map_err(|_| StorefrontError::InvalidPrice)?;
    if price < Decimal::ZERO {
        return Err(StorefrontError::InvalidPrice);
    }
    Ok(price)
}

fn parse_discount(input: &str) -> Result<Decimal> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Decimal::ZERO);
    }
    let discount: Decimal = input.parse().map_err(|_| StorefrontError::InvalidDiscount)?;
    if discount < Decimal::ZERO || discount > Decimal::from(100) {
        return Err(StorefrontError::InvalidDiscount);
    }
    Ok(discount)
}

fn blob_name(file_name: &str) -> String {
    let ext = file_name
        .rsplit_once('.')
        .map_or("bin", |(_, ext)| ext);
    format!("{}.{ext}", Uuid::new_v4())
}

fn check_gate(user: Option<&UserProfile>) -> Result<()> {
    if is_admin(user) {
        Ok(())
    } else {
        Err(StorefrontError::Unauthorized)
    }
}

/// Client-side validation. Runs before any upload; a violation aborts the
/// submit with zero remote calls.
fn validate(form: &ProductForm) -> Result<(Decimal, Decimal, Category)> {
    if form.total_images() == 0 {
        return Err(StorefrontError::MissingImages);
    }
    if form.total_images() > MAX_IMAGES {
        return Err(StorefrontError::TooManyImages {
            total: form.total_images(),
            max: MAX_IMAGES,
        });
    }
    let price = parse_price(&form.price)?;
    let discount = parse_discount(&form.discount)?;
    let category = form.category.ok_or(StorefrontError::MissingCategory)?;
    Ok((price, discount, category))
}

/// Creates or updates a catalog record. `edit_id` selects update-by-id;
/// otherwise a new record is inserted. New images are uploaded in order and
/// their URLs appended after the retained ones.
pub async fn submit(
    repo: &impl ProductRepository,
    blobs: &impl BlobStorage,
    user: Option<&UserProfile>,
    form: ProductForm,
    edit_id: Option<&str>,
) -> Result<Product> {
    check_gate(user)?;
    let (price, discount, category) = validate(&form)?;

    let mut image_urls = form.existing_images;
    for image in form.new_images {
        let url = blobs.upload(&blob_name(&image.file_name), image.bytes).await?;
        image_urls.push(url);
    }

    let payload = NewProduct {
        name: form.name,
        price,
        category,
        description: form.description,
        image_urls,
        discount,
        colors: normalize_colors(&form.colors),
    };

    let saved = match edit_id {
        Some(id) => repo.update(id, payload).await?,
        None => repo.insert(payload).await?,
    };
    tracing::debug!(product_id = %saved.id, "catalog record saved");
    Ok(saved)
}

/// Reads a record back into form shape for the edit screen. Reverses the
/// submit normalization: zero discount shows blank, colors re-join with ", ".
pub async fn load_for_edit(
    repo: &impl ProductRepository,
    user: Option<&UserProfile>,
    id: &str,
) -> Result<ProductForm> {
    check_gate(user)?;
    let product = repo.fetch(id).await?;
    let discount = match product.discount {
        Some(d) if d > Decimal::ZERO => d.to_string(),
        _ => String::new(),
    };
    Ok(ProductForm {
        name: product.name,
        price: product.price.to_string(),
        category: Some(product.category),
        description: product.description,
        discount,
        colors: product.colors.unwrap_or_default().join(", "),
        existing_images: product.image_urls,
        new_images: Vec::new(),
    })
}

/// Deletes a record. Same gate as the rest of the flow.
pub async fn delete_product(
    repo: &impl ProductRepository,
    user: Option<&UserProfile>,
    id: &str,
) -> Result<()> {
    check_gate(user)?;
    repo.delete(id).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::tests::user;
    use chrono::Utc;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn admin() -> UserProfile {
        user("gibsoncollections1@gmail.com")
    }

    #[derive(Default)]
    struct FakeRepo {
        records: Mutex<Vec<Product>>,
        fail_with: Option<serde_json::Value>,
    }

    impl FakeRepo {
        fn saved(payload: NewProduct, id: &str) -> Product {
            Product {
                id: id.to_string(),
                created_at: Utc::now(),
                name: payload.name,
                price: payload.price,
                category: payload.category,
                description: payload.description,
                image_urls: payload.image_urls,
                discount: Some(payload.discount),
                colors: Some(payload.colors),
            }
        }

        fn check(&self) -> std::result::Result<(), BackendError> {
            match &self.fail_with {
                Some(err) => Err(BackendError(err.clone())),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl ProductRepository for FakeRepo {
        async fn insert(&self, p: NewProduct) -> std::result::Result<Product, BackendError> {
            self.check()?;
            let product = Self::saved(p, "generated-id");
            self.records.lock().unwrap().push(product.clone());
            Ok(product)
        }

        async fn update(
            &self,
            id: &str,
            p: NewProduct,
        ) -> std::result::Result<Product, BackendError> {
            self.check()?;
            Ok(Self::saved(p, id))
        }

        async fn fetch(&self, id: &str) -> std::result::Result<Product, BackendError> {
            self.check()?;
            self.records
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.id == id)
                .cloned()
                .ok_or_else(|| BackendError::from_message("row not found"))
        }

        async fn delete(&self, _id: &str) -> std::result::Result<(), BackendError> {
            self.check()
        }

        async fn list(&self) -> std::result::Result<Vec<Product>, BackendError> {
            self.check()?;
            Ok(self.records.lock().unwrap().clone())
        }
    }

    #[derive(Default)]
    struct FakeBlobs {
        upload_calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl BlobStorage for FakeBlobs {
        async fn upload(
            &self,
            name: &str,
            _bytes: Vec<u8>,
        ) -> std::result::Result<String, BackendError> {
            self.upload_calls.fetch_add(1, Ordering::Relaxed);
            if self.fail {
                return Err(BackendError(json!({"error": {"message": "bucket missing"}})));
            }
            Ok(format!("https://cdn.example.com/{name}"))
        }
    }

    fn image(name: &str) -> ImageUpload {
        ImageUpload {
            file_name: name.to_string(),
            bytes: vec![0u8; 4],
        }
    }

    fn valid_form() -> ProductForm {
        ProductForm {
            name: "Leather Handbag".to_string(),
            price: "12500".to_string(),
            category: Some(Category::Handbags),
            description: "Soft leather".to_string(),
            discount: "".to_string(),
            colors: " Red, Navy Green ,, Blue ".to_string(),
            existing_images: vec![],
            new_images: vec![image("front.jpg")],
        }
    }

    #[test]
    fn test_normalize_colors() {
        assert_eq!(
            normalize_colors(" Red, Navy Green ,, Blue "),
            ["Red", "Navy Green", "Blue"]
        );
        assert!(normalize_colors("").is_empty());
        assert!(normalize_colors(" , ,").is_empty());
    }

    #[tokio::test]
    async fn test_submit_inserts_normalized_payload() {
        let repo = FakeRepo::default();
        let blobs = FakeBlobs::default();
        let saved = submit(&repo, &blobs, Some(&admin()), valid_form(), None)
            .await
            .unwrap();

        assert_eq!(saved.price, Decimal::new(12500, 0));
        assert_eq!(saved.discount, Some(Decimal::ZERO));
        assert_eq!(
            saved.colors.as_deref().unwrap(),
            ["Red", "Navy Green", "Blue"]
        );
        assert_eq!(saved.image_urls.len(), 1);
        assert!(saved.image_urls[0].starts_with("https://cdn.example.com/"));
        assert!(saved.image_urls[0].ends_with(".jpg"));
        assert_eq!(blobs.upload_calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn test_submit_keeps_existing_images_first() {
        let repo = FakeRepo::default();
        let blobs = FakeBlobs::default();
        let mut form = valid_form();
        form.existing_images = vec!["https://cdn.example.com/kept.jpg".to_string()];
        let saved = submit(&repo, &blobs, Some(&admin()), form, Some("p1"))
            .await
            .unwrap();
        assert_eq!(saved.id, "p1");
        assert_eq!(saved.image_urls[0], "https://cdn.example.com/kept.jpg");
        assert_eq!(saved.image_urls.len(), 2);
    }

    #[tokio::test]
    async fn test_image_cap_rejected_before_any_upload() {
        let repo = FakeRepo::default();
        let blobs = FakeBlobs::default();
        let mut form = valid_form();
        form.existing_images = (0..3).map(|i| format!("https://cdn/{i}.jpg")).collect();
        form.new_images = vec![image("a.jpg"), image("b.jpg"), image("c.jpg")];

        let err = submit(&repo, &blobs, Some(&admin()), form, None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StorefrontError::TooManyImages { total: 6, max: 5 }
        ));
        assert_eq!(blobs.upload_calls.load(Ordering::Relaxed), 0);
        assert!(repo.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_no_images_rejected() {
        let mut form = valid_form();
        form.new_images.clear();
        let err = submit(&FakeRepo::default(), &FakeBlobs::default(), Some(&admin()), form, None)
            .await
            .unwrap_err();
        assert!(matches!(err, StorefrontError::MissingImages));
    }

    #[tokio::test]
    async fn test_invalid_price_rejected() {
        for bad in ["", "abc", "-5"] {
            let mut form = valid_form();
            form.price = bad.to_string();
            let err = submit(&FakeRepo::default(), &FakeBlobs::default(), Some(&admin()), form, None)
                .await
                .unwrap_err();
            assert!(matches!(err, StorefrontError::InvalidPrice), "input {bad:?}");
        }
    }

    #[tokio::test]
    async fn test_discount_out_of_range_rejected() {
        for bad in ["101", "-1", "x"] {
            let mut form = valid_form();
            form.discount = bad.to_string();
            let err = submit(&FakeRepo::default(), &FakeBlobs::default(), Some(&admin()), form, None)
                .await
                .unwrap_err();
            assert!(matches!(err, StorefrontError::InvalidDiscount), "input {bad:?}");
        }
    }

    #[tokio::test]
    async fn test_gate_blocks_before_any_remote_call() {
        let repo = FakeRepo::default();
        let blobs = FakeBlobs::default();
        for shopper in [None, Some(user("shopper@example.com"))] {
            let err = submit(&repo, &blobs, shopper.as_ref(), valid_form(), None)
                .await
                .unwrap_err();
            assert!(matches!(err, StorefrontError::Unauthorized));
        }
        assert_eq!(blobs.upload_calls.load(Ordering::Relaxed), 0);
        assert!(repo.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upload_failure_surfaces_readable_message() {
        let blobs = FakeBlobs { fail: true, ..Default::default() };
        let err = submit(&FakeRepo::default(), &blobs, Some(&admin()), valid_form(), None)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "bucket missing");
    }

    #[tokio::test]
    async fn test_load_for_edit_round_trips_form_fields() {
        let repo = FakeRepo::default();
        let blobs = FakeBlobs::default();
        let mut form = valid_form();
        form.discount = "15".to_string();
        let saved = submit(&repo, &blobs, Some(&admin()), form, None)
            .await
            .unwrap();

        let edit = load_for_edit(&repo, Some(&admin()), &saved.id).await.unwrap();
        assert_eq!(edit.name, "Leather Handbag");
        assert_eq!(edit.price, "12500");
        assert_eq!(edit.discount, "15");
        assert_eq!(edit.colors, "Red, Navy Green, Blue");
        assert_eq!(edit.existing_images, saved.image_urls);
        assert!(edit.new_images.is_empty());
    }

    #[tokio::test]
    async fn test_load_for_edit_blanks_zero_discount() {
        let repo = FakeRepo::default();
        let saved = submit(&repo, &FakeBlobs::default(), Some(&admin()), valid_form(), None)
            .await
            .unwrap();
        let edit = load_for_edit(&repo, Some(&admin()), &saved.id).await.unwrap();
        assert_eq!(edit.discount, "");
    }

    #[tokio::test]
    async fn test_delete_requires_admin() {
        let repo = FakeRepo::default();
        let err = delete_product(&repo, None, "p1").await.unwrap_err();
        assert!(matches!(err, StorefrontError::Unauthorized));
        delete_product(&repo, Some(&admin()), "p1").await.unwrap();
    }
}
