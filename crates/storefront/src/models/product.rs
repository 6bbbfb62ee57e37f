//! Products and their optional customizations.

use serde::{Deserialize, Serialize};

use handcraft_core::{CustomizationId, Price, ProductCategory, ProductId, Rating};

use super::Artisan;

/// A paid option a shopper may add to a product (engraving, gift wrap, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customization {
    pub id: CustomizationId,
    pub name: String,
    /// Amount added to the product price when selected.
    pub price: Price,
    pub description: String,
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category: ProductCategory,
    pub image: String,
    pub materials: Vec<String>,
    pub is_handmade: bool,
    pub is_eco_friendly: bool,
    pub rating: Rating,
    pub review_count: u32,
    pub artisan: Artisan,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub customizations: Vec<Customization>,
    pub available: bool,
}

impl Product {
    /// Look up one of this product's customizations by id.
    #[must_use]
    pub fn customization(&self, id: &CustomizationId) -> Option<&Customization> {
        self.customizations.iter().find(|c| &c.id == id)
    }

    /// Price of a single unit with the given customizations selected.
    ///
    /// Ids that this product does not offer contribute nothing.
    #[must_use]
    pub fn unit_price(&self, selected: &[CustomizationId]) -> Price {
        self.price
            + selected
                .iter()
                .filter_map(|id| self.customization(id))
                .map(|c| c.price)
                .sum::<Price>()
    }

    /// Return the first selected id this product does not offer, if any.
    #[must_use]
    pub fn first_unknown_customization<'a>(
        &self,
        selected: &'a [CustomizationId],
    ) -> Option<&'a CustomizationId> {
        selected.iter().find(|id| self.customization(id).is_none())
    }
}


#[cfg(test)]
mod tests {
    use handcraft_core::{CustomizationId, Price};

    use super::fixtures;

    #[test]
    fn test_unit_price_adds_selected_deltas() {
        let mut mug = fixtures::product("p-1", "Mug", 2000);
        mug.customizations = vec![
            fixtures::customization("glaze", 300),
            fixtures::customization("gift-wrap", 150),
        ];

        assert_eq!(mug.unit_price(&[]), Price::from_cents(2000));
        assert_eq!(
            mug.unit_price(&[CustomizationId::new("glaze"), CustomizationId::new("gift-wrap")]),
            Price::from_cents(2450)
        );
        // Unknown ids are ignored.
        assert_eq!(
            mug.unit_price(&[CustomizationId::new("engraving")]),
            Price::from_cents(2000)
        );
    }

    #[test]
    fn test_first_unknown_customization() {
        let mut mug = fixtures::product("p-1", "Mug", 2000);
        mug.customizations = vec![fixtures::customization("glaze", 300)];

        let selected = [CustomizationId::new("glaze"), CustomizationId::new("lid")];
        assert_eq!(
            mug.first_unknown_customization(&selected),
            Some(&CustomizationId::new("lid"))
        );
        assert_eq!(mug.first_unknown_customization(&selected[..1]), None);
    }
}
