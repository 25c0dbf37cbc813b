use chrono::{DateTime, Utc};
use product_validate::product::ProductForm;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// id and created_at are store-assigned.
#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub emoji: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub old_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub new_price: Decimal,
    pub discount: i32,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn savings(&self) -> Decimal {
        self.old_price - self.new_price
    }
}

#[derive(Debug)]
pub struct NewProduct {
    pub name: String,
    pub emoji: String,
    pub old_price: Decimal,
    pub new_price: Decimal,
    pub discount: i32,
}

impl NewProduct {
    pub fn from_form(form: ProductForm) -> Option<Self> {
        Some(Self {
            name: form.name?.trim().to_string(),
            emoji: form.emoji?.trim().to_string(),
            old_price: form.old_price?,
            new_price: form.new_price?,
            discount: form.discount?,
        })
    }
}

#[derive(Debug, Default)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub emoji: Option<String>,
    pub old_price: Option<Decimal>,
    pub new_price: Option<Decimal>,
    pub discount: Option<i32>,
}

impl ProductChanges {
    pub fn from_form(form: ProductForm) -> Self {
        Self {
            name: form.name.map(|name| name.trim().to_string()),
            emoji: form.emoji.map(|emoji| emoji.trim().to_string()),
            old_price: form.old_price,
            new_price: form.new_price,
            discount: form.discount,
        }
    }
}

// Read view for list and get; savings is computed, never persisted.
#[derive(Serialize, Deserialize, Debug)]
pub struct ProductWithSavings {
    #[serde(flatten)]
    pub product: Product,
    #[serde(with = "rust_decimal::serde::float")]
    pub savings: Decimal,
}

impl From<Product> for ProductWithSavings {
    fn from(product: Product) -> Self {
        let savings = product.savings();
        Self { product, savings }
    }
}
