//! `powerhit products` commands.

use std::io::Write;

use powerhit_core::Money;
use powerhit_storefront::catalog::{CategoryFilter, ProductListing};
use powerhit_storefront::config::StorefrontConfig;

use super::CommandError;

/// List products, narrowed by category or search query.
///
/// Like the page, whichever narrowing is applied last decides visibility,
/// so a search replaces a category filter rather than refining it.
///
/// # Errors
///
/// Fails if the catalog cannot be loaded or output cannot be written.
pub fn list(
    config: &StorefrontConfig,
    out: &mut impl Write,
    category: Option<&str>,
    search: Option<&str>,
) -> Result<(), CommandError> {
    let mut listing = ProductListing::load(&config.catalog_path)?;
    if let Some(category) = category {
        listing.filter(CategoryFilter::parse(category));
    }
    if let Some(query) = search {
        listing.search(query);
    }

    let mut shown = 0_usize;
    for product in listing.visible_products() {
        shown += 1;
        writeln!(
            out,
            "[{}] {} ({})  {}",
            product.id,
            product.name,
            product.category,
            Money::new(product.price, config.currency)
        )?;
    }
    if shown == 0 {
        writeln!(out, "No products found")?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::test_support::Sandbox;

    fn run(category: Option<&str>, search: Option<&str>) -> String {
        let sandbox = Sandbox::new();
        let mut buf = Vec::new();
        list(&sandbox.config, &mut buf, category, search).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_list_all() {
        assert_eq!(run(None, None).lines().count(), 3);
    }

    #[test]
    fn test_list_by_category() {
        assert_eq!(
            run(Some("balls"), None),
            "[2] Leather Ball (balls)  $20.00\n"
        );
    }

    #[test]
    fn test_list_by_search() {
        let text = run(None, Some("BAT"));
        assert!(text.contains("English Willow Bat"));
        assert!(text.contains("Batting Gloves"));
        assert!(!text.contains("Leather Ball"));
    }

    #[test]
    fn test_list_no_match() {
        assert_eq!(run(None, Some("helmet")), "No products found\n");
    }

    #[test]
    fn test_missing_catalog() {
        let sandbox = Sandbox::new();
        let config = StorefrontConfig {
            catalog_path: sandbox.root.join("nope.json"),
            ..sandbox.config.clone()
        };
        let mut buf = Vec::new();
        assert!(list(&config, &mut buf, None, None).is_err());
    }
}
