use chrono::{NaiveDate, NaiveDateTime, Utc};

use stocktrack_alerts::{Alert, InventoryReport, InventoryStats, derive_alerts, generate_report, inventory_stats};
use stocktrack_core::{Entity, ProductId};
use stocktrack_products::{Product, ProductDraft, ProductPatch, demo_products, search_products};

use crate::error::{StoreError, StoreResult};
use crate::storage::KeyValueStorage;

/// Key the product list is persisted under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "stockInteligente_products";

/// Repository over the product collection.
///
/// Every operation is a full read-modify-write of the collection. Two stores
/// sharing one backend are last-write-wins: an interleaved external edit is
/// overwritten, not merged.
///
/// If the key has never been written, the first access seeds the demo
/// products. Absence of the key is the only seeding signal, so an explicitly
/// saved empty list stays empty.
#[derive(Debug)]
pub struct InventoryStore<S>
where
    S: KeyValueStorage,
{
    storage: S,
    key: String,
}

impl<S> InventoryStore<S>
where
    S: KeyValueStorage,
{
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn load(&self) -> StoreResult<Vec<Product>> {
        let Some(raw) = self.storage.get(&self.key)? else {
            let seeded = demo_products();
            tracing::debug!(key = %self.key, count = seeded.len(), "seeding demo products");
            self.save_products(&seeded)?;
            return Ok(seeded);
        };

        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
            key: self.key.clone(),
            source,
        })
    }

    /// The full collection in insertion order.
    pub fn get_products(&self) -> StoreResult<Vec<Product>> {
        let products = self.load()?;
        tracing::debug!(count = products.len(), "loaded products");
        Ok(products)
    }

    /// Overwrite the persisted collection. No validation at this layer.
    pub fn save_products(&self, products: &[Product]) -> StoreResult<()> {
        let encoded = serde_json::to_string(products).map_err(StoreError::Encode)?;
        self.storage.set(&self.key, &encoded)?;
        Ok(())
    }

    /// Append a new product built from `draft`; returns its fresh id.
    pub fn add_product(&self, draft: ProductDraft) -> StoreResult<ProductId> {
        let mut products = self.load()?;
        let id = next_id(&products, now_millis());
        let product = Product::from_draft(id, draft);

        tracing::info!(product_id = %id, name = product.name(), "product added");
        products.push(product);
        self.save_products(&products)?;
        Ok(id)
    }

    /// Merge `patch` over the product with `id`. Returns false if there is none.
    pub fn update_product(&self, id: ProductId, patch: ProductPatch) -> StoreResult<bool> {
        let mut products = self.load()?;
        let Some(product) = products.iter_mut().find(|p| p.has_id(id)) else {
            tracing::debug!(product_id = %id, "update skipped: product not found");
            return Ok(false);
        };

        product.apply_patch(patch);
        tracing::info!(product_id = %id, "product updated");
        self.save_products(&products)?;
        Ok(true)
    }

    /// Set the stock level of one product, clamping negatives to zero.
    pub fn update_product_stock(&self, id: ProductId, new_quantity: i64) -> StoreResult<bool> {
        let mut products = self.load()?;
        let Some(product) = products.iter_mut().find(|p| p.has_id(id)) else {
            tracing::debug!(product_id = %id, "stock update skipped: product not found");
            return Ok(false);
        };

        product.set_quantity(new_quantity);
        tracing::info!(product_id = %id, quantity = product.quantity(), "stock updated");
        self.save_products(&products)?;
        Ok(true)
    }

    /// Remove every product with `id`. Always returns true; a miss is a no-op.
    pub fn delete_product_by_id(&self, id: ProductId) -> StoreResult<bool> {
        let mut products = self.load()?;
        let before = products.len();
        products.retain(|p| !p.has_id(id));

        tracing::info!(product_id = %id, removed = before - products.len(), "product delete");
        self.save_products(&products)?;
        Ok(true)
    }

    /// First product whose barcode equals `barcode` exactly.
    pub fn find_product_by_barcode(&self, barcode: &str) -> StoreResult<Option<Product>> {
        Ok(self.load()?.into_iter().find(|p| p.barcode() == barcode))
    }

    pub fn get_product(&self, id: ProductId) -> StoreResult<Option<Product>> {
        Ok(self.load()?.into_iter().find(|p| p.has_id(id)))
    }

    pub fn search_products(&self, term: &str) -> StoreResult<Vec<Product>> {
        Ok(search_products(&self.load()?, term))
    }

    /// Append a batch, assigning each product a fresh id. Persists once.
    pub fn import_products(&self, drafts: Vec<ProductDraft>) -> StoreResult<usize> {
        if drafts.is_empty() {
            return Ok(0);
        }

        let mut products = self.load()?;
        let mut id = next_id(&products, now_millis());
        let imported = drafts.len();
        for draft in drafts {
            products.push(Product::from_draft(id, draft));
            id = id.successor();
        }

        tracing::info!(count = imported, "products imported");
        self.save_products(&products)?;
        Ok(imported)
    }

    /// Forget the persisted collection. The next access seeds the demo data again.
    pub fn clear_all(&self) -> StoreResult<()> {
        self.storage.remove(&self.key)?;
        tracing::info!(key = %self.key, "inventory cleared");
        Ok(())
    }

    pub fn get_alerts(&self, today: NaiveDate) -> StoreResult<Vec<Alert>> {
        Ok(derive_alerts(&self.load()?, today))
    }

    pub fn get_inventory_stats(&self, today: NaiveDate) -> StoreResult<InventoryStats> {
        Ok(inventory_stats(&self.load()?, today))
    }

    pub fn generate_report(&self, generated_at: NaiveDateTime) -> StoreResult<InventoryReport> {
        Ok(generate_report(&self.load()?, generated_at))
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Wall-clock id, bumped past the largest existing id when needed.
fn next_id(products: &[Product], now_millis: i64) -> ProductId {
    let candidate = ProductId::new(now_millis);
    match products.iter().map(Product::id_typed).max() {
        Some(max) if max >= candidate => max.successor(),
        _ => candidate,
    }
}
