use serde::{Deserialize, Serialize};
use url::Url;

const FEED_CONDITION: &str = "new";
const FEED_CATEGORY: &str = "Geral";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductImage {
    pub url: String,
    #[serde(default)]
    pub principal: bool,
}

/// Catalog entry, read-only from this service's perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub brand: String,
    pub price: f64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

impl Product {
    fn principal_image(&self) -> Option<&ProductImage> {
        self.images.iter().find(|img| img.principal)
    }
}

/// One entry of the Google Shopping feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub link: String,
    pub image_link: String,
    pub brand: String,
    pub price: String,
    pub availability: String,
    pub condition: String,
    pub product_category: String,
}

impl FeedItem {
    /// Maps a catalog product onto a feed entry. `base` must be the public
    /// base URL with a trailing slash so relative joins resolve under it.
    pub fn from_product(product: &Product, base: &Url) -> Self {
        let link = base
            .join(&format!("produto/{}", product.id))
            .map(|u| u.to_string())
            .unwrap_or_default();

        let image_link = product
            .principal_image()
            .and_then(|img| base.join(img.url.trim_start_matches('/')).ok())
            .map(|u| u.to_string())
            .unwrap_or_default();

        let availability = if product.stock > 0 {
            "in stock"
        } else {
            "out of stock"
        };

        Self {
            id: product.id,
            title: product.name.clone(),
            description: product.description.clone(),
            link,
            image_link,
            brand: product.brand.clone(),
            price: format!("{:.2} BRL", product.price),
            availability: availability.to_string(),
            condition: FEED_CONDITION.to_string(),
            product_category: FEED_CATEGORY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            id: 7,
            name: "Camiseta".to_string(),
            description: "Camiseta básica".to_string(),
            brand: "Loja".to_string(),
            price: 49.9,
            stock: 3,
            images: vec![
                ProductImage {
                    url: "/uploads/camiseta-frente.jpg".to_string(),
                    principal: false,
                },
                ProductImage {
                    url: "/uploads/camiseta.jpg".to_string(),
                    principal: true,
                },
            ],
        }
    }

    fn base() -> Url {
        Url::parse("https://loja.example.com/").unwrap()
    }

    #[test]
    fn test_feed_item_links_are_absolute() {
        let item = FeedItem::from_product(&product(), &base());

        assert_eq!(item.link, "https://loja.example.com/produto/7");
        assert_eq!(
            item.image_link,
            "https://loja.example.com/uploads/camiseta.jpg"
        );
    }

    #[test]
    fn test_price_has_two_decimals_and_currency() {
        let mut p = product();
        p.price = 5.0;
        assert_eq!(FeedItem::from_product(&p, &base()).price, "5.00 BRL");

        p.price = 49.9;
        assert_eq!(FeedItem::from_product(&p, &base()).price, "49.90 BRL");
    }

    #[test]
    fn test_no_principal_image_yields_empty_image_link() {
        let mut p = product();
        for img in &mut p.images {
            img.principal = false;
        }
        assert_eq!(FeedItem::from_product(&p, &base()).image_link, "");
    }

    #[test]
    fn test_availability_follows_stock() {
        let mut p = product();
        assert_eq!(FeedItem::from_product(&p, &base()).availability, "in stock");

        p.stock = 0;
        assert_eq!(
            FeedItem::from_product(&p, &base()).availability,
            "out of stock"
        );
    }

    #[test]
    fn test_absolute_catalog_image_is_kept() {
        let mut p = product();
        p.images = vec![ProductImage {
            url: "https://cdn.example.com/x.jpg".to_string(),
            principal: true,
        }];
        assert_eq!(
            FeedItem::from_product(&p, &base()).image_link,
            "https://cdn.example.com/x.jpg"
        );
    }
}
