//! Integration tests for the product listing loaded from disk.

#![allow(clippy::unwrap_used)]

use powerhit_core::{CurrencyCode, ProductId};
use powerhit_integration_tests::TempDir;
use powerhit_storefront::catalog::{CatalogError, CategoryFilter, ProductListing};
use powerhit_storefront::views::ProductGridTemplate;
use rust_decimal::Decimal;

fn visible_ids(listing: &ProductListing) -> Vec<String> {
    listing.visible_products().map(|p| p.id.to_string()).collect()
}

#[test]
fn test_load_from_file() {
    let dir = TempDir::new();
    let listing = ProductListing::load(&dir.write_catalog()).unwrap();

    assert_eq!(listing.products().len(), 5);
    assert_eq!(listing.categories(), ["bats", "balls", "protection"]);
    assert_eq!(
        listing.product(&ProductId::from(2)).unwrap().price,
        Decimal::new(895, 1)
    );
    assert_eq!(
        listing.product(&ProductId::from("helmet-pro")).unwrap().name,
        "Pro Helmet"
    );
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new();
    let err = ProductListing::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
}

#[test]
fn test_malformed_file() {
    let dir = TempDir::new();
    let path = dir.path().join("catalog.json");
    std::fs::write(&path, r#"[{"id": 1, "name": "Bat"}]"#).unwrap();
    assert!(matches!(
        ProductListing::load(&path).unwrap_err(),
        CatalogError::Parse(_)
    ));
}

#[test]
fn test_filter_is_exact_and_search_is_not() {
    let mut listing = powerhit_integration_tests::catalog();

    listing.filter(CategoryFilter::parse("Bats"));
    assert!(visible_ids(&listing).is_empty());

    listing.search("BATS");
    assert_eq!(visible_ids(&listing), ["1", "2"]);

    listing.search("");
    assert_eq!(visible_ids(&listing).len(), 5);
}

#[test]
fn test_grid_renders_visible_products() {
    let mut listing = powerhit_integration_tests::catalog();
    listing.filter(CategoryFilter::parse("protection"));

    let template = ProductGridTemplate::from_listing(&listing, CurrencyCode::GBP);
    assert_eq!(template.active, "protection");
    let prices: Vec<_> = template.products.iter().map(|p| p.price.as_str()).collect();
    assert_eq!(prices, ["£34.99", "£75.00"]);
}
