//! Product catalog model and derived pricing.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed catalog taxonomy. Storage keeps the display string, so serde
/// round-trips through [`Category::as_str`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    // Baby care
    #[serde(rename = "Diapers")]
    Diapers,
    #[serde(rename = "Wipes")]
    Wipes,
    #[serde(rename = "Baby Lotions & Creams")]
    BabyLotionsAndCreams,
    #[serde(rename = "Baby Soaps & Wash")]
    BabySoapsAndWash,
    #[serde(rename = "Feeding Essentials")]
    FeedingEssentials,
    #[serde(rename = "Baby Clothing")]
    BabyClothing,
    // Bags
    #[serde(rename = "Diaper Bags")]
    DiaperBags,
    #[serde(rename = "Handbags")]
    Handbags,
    #[serde(rename = "School Bags")]
    SchoolBags,
    #[serde(rename = "Lunch Bags")]
    LunchBags,
    #[serde(rename = "Backpacks")]
    Backpacks,
    #[serde(rename = "Wallets & Purses")]
    WalletsAndPurses,
    // Shoes
    #[serde(rename = "Ladies Shoes")]
    LadiesShoes,
    #[serde(rename = "Kids Shoes")]
    KidsShoes,
    #[serde(rename = "Sneakers")]
    Sneakers,
    #[serde(rename = "Sandals & Slippers")]
    SandalsAndSlippers,
    // Accessories
    #[serde(rename = "Jewelry")]
    Jewelry,
    #[serde(rename = "Watches")]
    Watches,
    #[serde(rename = "Sunglasses")]
    Sunglasses,
    #[serde(rename = "Hair Accessories")]
    HairAccessories,
    #[serde(rename = "Belts")]
    Belts,
    #[serde(rename = "Perfumes")]
    Perfumes,
}

impl Category {
    pub const ALL: [Category; 22] = [
        Self::Diapers,
        Self::Wipes,
        Self::BabyLotionsAndCreams,
        Self::BabySoapsAndWash,
        Self::FeedingEssentials,
        Self::BabyClothing,
        Self::DiaperBags,
        Self::Handbags,
        Self::SchoolBags,
        Self::LunchBags,
        Self::Backpacks,
        Self::WalletsAndPurses,
        Self::LadiesShoes,
        Self::KidsShoes,
        Self::Sneakers,
        Self::SandalsAndSlippers,
        Self::Jewelry,
        Self::Watches,
        Self::Sunglasses,
        Self::HairAccessories,
        Self::Belts,
        Self::Perfumes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Diapers => "Diapers",
            Self::Wipes => "Wipes",
            Self::BabyLotionsAndCreams => "Baby Lotions & Creams",
            Self::BabySoapsAndWash => "Baby Soaps & Wash",
            Self::FeedingEssentials => "Feeding Essentials",
            Self::BabyClothing => "Baby Clothing",
            Self::DiaperBags => "Diaper Bags",
            Self::Handbags => "Handbags",
            Self::SchoolBags => "School Bags",
            Self::LunchBags => "Lunch Bags",
            Self::Backpacks => "Backpacks",
            Self::WalletsAndPurses => "Wallets & Purses",
            Self::LadiesShoes => "Ladies Shoes",
            Self::KidsShoes => "Kids Shoes",
            Self::Sneakers => "Sneakers",
            Self::SandalsAndSlippers => "Sandals & Slippers",
            Self::Jewelry => "Jewelry",
            Self::Watches => "Watches",
            Self::Sunglasses => "Sunglasses",
            Self::HairAccessories => "Hair Accessories",
            Self::Belts => "Belts",
            Self::Perfumes => "Perfumes",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Catalog entity. Canonical fields are written only by the editing flow;
/// the commerce store copies them into cart lines and never mutates them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub price: Decimal,
    pub category: Category,
    pub description: String,
    /// Display order is significant; the first entry is the cover image.
    pub image_urls: Vec<String>,
    /// Discount percentage, 0-100. `None` and 0 both mean no discount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<Decimal>,
    /// Color variant labels, order preserved, compared by exact string value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
}

impl Product {
    pub fn has_discount(&self) -> bool {
        self.discount.is_some_and(|d| d > Decimal::ZERO)
    }

    /// Price after discount, at full precision. Rounding happens only at
    /// display time, never before storing or comparing.
    pub fn effective_price(&self) -> Decimal {
        match self.discount {
            Some(d) if d > Decimal::ZERO => {
                self.price * (Decimal::ONE - d / Decimal::from(100))
            }
            _ => self.price,
        }
    }

    /// Effective price rounded to whole currency units, for display.
    pub fn display_price(&self) -> Decimal {
        self.effective_price().round()
    }

    /// Cover image, or a deterministic placeholder so repeated renders of the
    /// same product stay visually stable.
    pub fn primary_image(&self) -> String {
        self.image_urls
            .first()
            .cloned()
            .unwrap_or_else(|| placeholder_image(&self.id))
    }
}

pub fn placeholder_image(product_id: &str) -> String {
    format!("https://picsum.photos/seed/{product_id}/300/300")
}
