//! Catalog Manager
//!
//! Owns the product and category collections. Categories are interned
//! names: a product's free-text category is routed through one
//! controlled mutation path (`ensure_category`), which keeps the
//! no-duplicate invariant enforceable in one place. Deleting a
//! category cascades to every product referencing it.

use shared::models::{Product, ProductCreate};
use shared::util::new_id;

use crate::core::{CoreError, CoreResult};
use crate::store::Store;
use crate::utils::validation::{MAX_NAME_LEN, validate_non_negative, validate_required_text};

pub struct CatalogManager {
    store: Store,
    products: Vec<Product>,
    categories: Vec<String>,
}

impl CatalogManager {
    /// Load the catalog from the store.
    pub fn load(store: Store) -> CoreResult<Self> {
        let products = store.get_products()?;
        let categories = store.get_categories()?;
        Ok(Self {
            store,
            products,
            categories,
        })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Insert a new product at the head of the list. A non-empty
    /// category absent from the category list is auto-created.
    pub fn add_product(&mut self, create: ProductCreate) -> CoreResult<&Product> {
        validate_required_text(&create.name, "product name", MAX_NAME_LEN)?;
        validate_non_negative(create.price, "product price")?;

        let product = Product {
            id: new_id(),
            name: create.name.trim().to_string(),
            price: create.price,
            category: create.category.trim().to_string(),
            image_ref: create.image_ref,
        };

        let mut products = self.products.clone();
        products.insert(0, product);
        self.persist_with_category(products, None)?;

        tracing::info!(id = %self.products[0].id, name = %self.products[0].name, "product added");
        Ok(&self.products[0])
    }

    /// Replace a product by id. Unknown id is an explicit error.
    pub fn update_product(&mut self, product: Product) -> CoreResult<()> {
        validate_required_text(&product.name, "product name", MAX_NAME_LEN)?;
        validate_non_negative(product.price, "product price")?;

        let Some(idx) = self.products.iter().position(|p| p.id == product.id) else {
            return Err(CoreError::not_found(format!("product {}", product.id)));
        };

        let mut products = self.products.clone();
        products[idx] = Product {
            category: product.category.trim().to_string(),
            ..product
        };
        self.persist_with_category(products, Some(idx))?;
        Ok(())
    }

    /// Remove a product by id.
    pub fn delete_product(&mut self, id: &str) -> CoreResult<()> {
        let Some(idx) = self.products.iter().position(|p| p.id == id) else {
            return Err(CoreError::not_found(format!("product {id}")));
        };
        let mut products = self.products.clone();
        products.remove(idx);
        self.store.put_products(&products)?;
        self.products = products;
        Ok(())
    }

    /// Append a category. Empty names are rejected; adding an existing
    /// name is a no-op, keeping the list duplicate-free.
    pub fn add_category(&mut self, name: &str) -> CoreResult<()> {
        validate_required_text(name, "category name", MAX_NAME_LEN)?;
        let trimmed = name.trim();
        if self.categories.iter().any(|c| c == trimmed) {
            return Ok(());
        }
        let mut categories = self.categories.clone();
        categories.push(trimmed.to_string());
        self.store.put_categories(&categories)?;
        self.categories = categories;
        Ok(())
    }

    /// Remove a category and every product referencing it, in one
    /// committed transaction. Returns the number of products removed.
    pub fn delete_category(&mut self, name: &str) -> CoreResult<usize> {
        let Some(idx) = self.categories.iter().position(|c| c == name) else {
            return Err(CoreError::not_found(format!("category '{name}'")));
        };

        let mut categories = self.categories.clone();
        categories.remove(idx);
        let products: Vec<Product> = self
            .products
            .iter()
            .filter(|p| p.category != name)
            .cloned()
            .collect();
        let removed = self.products.len() - products.len();

        self.store.put_products_with_categories(&products, &categories)?;
        self.products = products;
        self.categories = categories;

        tracing::info!(category = %name, cascaded = removed, "category deleted");
        Ok(removed)
    }

    /// Persist a new products list; when the product at `changed_idx`
    /// (or the head, for inserts) names an unseen category, the
    /// category list is extended in the same transaction.
    fn persist_with_category(
        &mut self,
        products: Vec<Product>,
        changed_idx: Option<usize>,
    ) -> CoreResult<()> {
        let category = &products[changed_idx.unwrap_or(0)].category;
        if !category.is_empty() && !self.categories.iter().any(|c| c == category) {
            let mut categories = self.categories.clone();
            categories.push(category.clone());
            self.store.put_products_with_categories(&products, &categories)?;
            self.categories = categories;
        } else {
            self.store.put_products(&products)?;
        }
        self.products = products;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CapacityPolicy;

    fn manager() -> CatalogManager {
        let store = Store::open_in_memory(CapacityPolicy::default()).unwrap();
        CatalogManager::load(store).unwrap()
    }

    fn create(name: &str, price: f64, category: &str) -> ProductCreate {
        ProductCreate {
            name: name.to_string(),
            price,
            category: category.to_string(),
            image_ref: String::new(),
        }
    }

    #[test]
    fn add_product_inserts_at_head_and_creates_category() {
        let mut catalog = manager();
        catalog.add_product(create("Espresso", 120.0, "Drinks")).unwrap();
        catalog.add_product(create("Adobo", 250.0, "Mains")).unwrap();

        assert_eq!(catalog.products()[0].name, "Adobo");
        assert_eq!(catalog.products()[1].name, "Espresso");
        assert_eq!(catalog.categories(), ["Drinks", "Mains"]);
    }

    #[test]
    fn duplicate_category_is_not_recreated() {
        let mut catalog = manager();
        catalog.add_product(create("Espresso", 120.0, "Drinks")).unwrap();
        catalog.add_product(create("Latte", 150.0, "Drinks")).unwrap();
        catalog.add_category("Drinks").unwrap();

        assert_eq!(catalog.categories(), ["Drinks"]);
    }

    #[test]
    fn add_product_rejects_bad_input() {
        let mut catalog = manager();
        assert!(matches!(
            catalog.add_product(create("  ", 10.0, "Drinks")),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            catalog.add_product(create("Espresso", -1.0, "Drinks")),
            Err(CoreError::Validation(_))
        ));
        assert!(catalog.products().is_empty());
    }

    #[test]
    fn update_unknown_product_is_not_found() {
        let mut catalog = manager();
        let ghost = Product {
            id: "missing".to_string(),
            name: "Ghost".to_string(),
            price: 1.0,
            category: String::new(),
            image_ref: String::new(),
        };
        assert!(matches!(
            catalog.update_product(ghost),
            Err(CoreError::NotFound(_))
        ));
    }

    #[test]
    fn update_product_can_introduce_category() {
        let mut catalog = manager();
        catalog.add_product(create("Espresso", 120.0, "Drinks")).unwrap();
        let mut product = catalog.products()[0].clone();
        product.category = "Coffee".to_string();
        catalog.update_product(product).unwrap();

        assert_eq!(catalog.categories(), ["Drinks", "Coffee"]);
        assert_eq!(catalog.products()[0].category, "Coffee");
    }

    #[test]
    fn delete_category_cascades_to_its_products_only() {
        let mut catalog = manager();
        catalog.add_product(create("Espresso", 120.0, "Drinks")).unwrap();
        catalog.add_product(create("Latte", 150.0, "Drinks")).unwrap();
        catalog.add_product(create("Adobo", 250.0, "Mains")).unwrap();

        let removed = catalog.delete_category("Drinks").unwrap();
        assert_eq!(removed, 2);
        assert_eq!(catalog.categories(), ["Mains"]);
        assert_eq!(catalog.products().len(), 1);
        assert_eq!(catalog.products()[0].name, "Adobo");
    }

    #[test]
    fn delete_unknown_category_is_not_found() {
        let mut catalog = manager();
        assert!(matches!(
            catalog.delete_category("Nope"),
            Err(CoreError::NotFound(_))
        ));
    }

    #[test]
    fn catalog_survives_reload() {
        let store = Store::open_in_memory(CapacityPolicy::default()).unwrap();
        let mut catalog = CatalogManager::load(store.clone()).unwrap();
        catalog.add_product(create("Espresso", 120.0, "Drinks")).unwrap();

        let reloaded = CatalogManager::load(store).unwrap();
        assert_eq!(reloaded.products().len(), 1);
        assert_eq!(reloaded.categories(), ["Drinks"]);
    }
}
