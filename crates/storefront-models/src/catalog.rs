//! Catalog entities and DTOs.
//!
//! Prices travel as decimal currency units over the API and are stored as
//! integer cents.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::ids::{CategoryId, ProductId};

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank")
            .with_message(Cow::Borrowed("name must not be blank")))
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(
        length(min = 1, max = 150, message = "name must be 1 to 150 characters"),
        custom(function = "not_blank")
    )]
    #[schema(example = "Beverages")]
    pub name: String,
}

fn default_visible() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProductDto {
    #[validate(
        length(min = 1, max = 150, message = "name must be 1 to 150 characters"),
        custom(function = "not_blank")
    )]
    pub name: String,
    #[validate(range(exclusive_min = 0.0, message = "weight must be positive"))]
    pub weight: f32,
    #[validate(range(exclusive_min = 0.0, message = "volume must be positive"))]
    pub volume: f32,
    #[validate(length(max = 255, message = "description must be at most 255 characters"))]
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub photos: Vec<String>,
    /// Price in currency units, e.g. `12.99`.
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Name of an existing category.
    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,
}

/// A product ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub weight: f32,
    pub volume: f32,
    pub description: String,
    pub photos: Vec<String>,
    pub price_cents: i64,
    pub visible: bool,
    pub category: String,
}

impl From<CreateProductDto> for NewProduct {
    fn from(dto: CreateProductDto) -> Self {
        Self {
            name: dto.name,
            weight: dto.weight,
            volume: dto.volume,
            description: dto.description,
            photos: dto.photos,
            price_cents: (dto.price * 100.0).round() as i64,
            visible: dto.visible,
            category: dto.category,
        }
    }
}

/// A product row joined with its category name.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ProductRow {
    pub id: ProductId,
    pub name: String,
    pub weight: f32,
    pub volume: f32,
    pub description: String,
    pub photos: Vec<String>,
    pub price_cents: i64,
    pub visible: bool,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub weight: f32,
    pub volume: f32,
    pub description: String,
    pub photos: Vec<String>,
    pub price: f64,
    pub visible: bool,
    pub category: String,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            weight: row.weight,
            volume: row.volume,
            description: row.description,
            photos: row.photos,
            price: row.price_cents as f64 / 100.0,
            visible: row.visible,
            category: row.category,
        }
    }
}

/// Payload and response of `PUT /product/change`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct VisibilityDto {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub visible: bool,
}

/// Query of `GET /catalog/search`. At least one filter must be non-empty.
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Case-insensitive substring of the product name
    pub product: Option<String>,
    /// Exact category name
    pub category: Option<String>,
}

impl SearchParams {
    /// Trimmed product term, `None` when blank.
    pub fn product_term(&self) -> Option<&str> {
        self.product.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn category_name(&self) -> Option<&str> {
        self.category.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.product_term().is_none() && self.category_name().is_none()
    }
}
