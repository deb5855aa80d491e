//! Product data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::resource::{Resource, ResourceId, ResourceKind};

/// Validated product form payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    /// Display name, 3 to 100 characters.
    pub name: String,
    /// Free text, 10 to 500 characters.
    pub description: String,
    /// Unit price in dollars, within `0.01..=999999.99`.
    pub price: f64,
}

/// Catalogue product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: ResourceId,
    name: String,
    description: String,
    price: f64,
    created_at: DateTime<Utc>,
}

impl Product {
    /// Build a product from its parts.
    pub fn new(
        id: ResourceId,
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            price,
            created_at,
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Free text description.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Unit price in dollars.
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Price formatted for display, e.g. `$99.99`.
    pub fn display_price(&self) -> String {
        format!("${:.2}", self.price)
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Resource for Product {
    type Draft = ProductDraft;

    const KIND: ResourceKind = ResourceKind::Product;

    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn from_draft(id: ResourceId, draft: ProductDraft, created_at: DateTime<Utc>) -> Self {
        let ProductDraft {
            name,
            description,
            price,
        } = draft;
        Self::new(id, name, description, price, created_at)
    }

    fn merge(&mut self, draft: ProductDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.price = draft.price;
    }

    fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(99.99, "$99.99")]
    #[case(149.99, "$149.99")]
    #[case(5.0, "$5.00")]
    fn display_price_uses_two_decimals(#[case] price: f64, #[case] expected: &str) {
        let product = Product::new(
            ResourceId::new("1"),
            "Lamp",
            "A reading lamp",
            price,
            DateTime::<Utc>::UNIX_EPOCH,
        );
        assert_eq!(product.display_price(), expected);
    }

    #[rstest]
    fn draft_round_trips_through_entity() {
        let draft = ProductDraft {
            name: "Lamp".to_owned(),
            description: "A reading lamp".to_owned(),
            price: 12.5,
        };
        let product = Product::from_draft(
            ResourceId::new("9"),
            draft.clone(),
            DateTime::<Utc>::UNIX_EPOCH,
        );
        assert_eq!(product.to_draft(), draft);
        assert_eq!(product.id().as_ref(), "9");
    }
}
