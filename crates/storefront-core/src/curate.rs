//! Product selections for the home and detail pages.
//!
//! All helpers are stable: products that tie keep their catalog order.

use crate::types::{Product, ProductId};

/// Rating threshold for the home page "Featured" strip.
pub const FEATURED_MIN_RATING: f64 = 4.5;

pub const FEATURED_LIMIT: usize = 10;
pub const TOP_DEALS_LIMIT: usize = 4;
pub const RELATED_LIMIT: usize = 8;

/// Products rated at least `min_rating`, in catalog order.
pub fn featured(products: &[Product], min_rating: f64, limit: usize) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.rating >= min_rating)
        .take(limit)
        .cloned()
        .collect()
}

/// Discounted products, highest discount first.
pub fn top_deals(products: &[Product], limit: usize) -> Vec<Product> {
    let mut deals: Vec<&Product> = products.iter().filter(|p| p.has_discount()).collect();
    deals.sort_by(|a, b| b.discount_percentage.cmp(&a.discount_percentage));
    deals.into_iter().take(limit).cloned().collect()
}

/// Other products from the same listing, excluding the one being viewed.
pub fn related(products: &[Product], exclude: ProductId, limit: usize) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.id != exclude)
        .take(limit)
        .cloned()
        .collect()
}
