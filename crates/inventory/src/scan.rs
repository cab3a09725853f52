//! Entry point for "a textual code was observed".
//!
//! Camera decoders and manual entry both end up here: the code is matched
//! against the store first and, when no product carries it, described by the
//! barcode utilities so the caller can offer to register it.

use std::time::{Duration, Instant};

use stocktrack_barcode::{BarcodeFormat, ScanDebouncer, country_from_barcode, is_valid_ean13, validate_barcode_format};
use stocktrack_products::Product;

use crate::error::StoreResult;
use crate::storage::KeyValueStorage;
use crate::store::InventoryStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanResolution {
    /// Nothing but whitespace was observed.
    Ignored,
    /// A stored product carries this barcode.
    Known(Product),
    /// No product carries this barcode.
    Unknown {
        code: String,
        format: BarcodeFormat,
        /// Only meaningful for EAN-13 codes; false for every other format.
        valid_checksum: bool,
        country: &'static str,
    },
}

/// Resolve one observed code against the store.
pub fn resolve_scan<S>(store: &InventoryStore<S>, raw: &str) -> StoreResult<ScanResolution>
where
    S: KeyValueStorage,
{
    let code = raw.trim();
    if code.is_empty() {
        return Ok(ScanResolution::Ignored);
    }

    if let Some(product) = store.find_product_by_barcode(code)? {
        tracing::debug!(code, product_id = %product.id_typed(), "scan matched product");
        return Ok(ScanResolution::Known(product));
    }

    let format = validate_barcode_format(code).format;
    let resolution = ScanResolution::Unknown {
        code: code.to_string(),
        format,
        valid_checksum: format == BarcodeFormat::Ean13 && is_valid_ean13(code),
        country: country_from_barcode(code),
    };
    tracing::debug!(code, %format, "scan did not match any product");
    Ok(resolution)
}

/// Continuous scanning: drops repeats of the same code within the cooldown
/// before resolving.
#[derive(Debug, Clone, Default)]
pub struct ScanSession {
    debouncer: ScanDebouncer,
}

impl ScanSession {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            debouncer: ScanDebouncer::new(cooldown),
        }
    }

    /// `Ok(None)` when the scan was suppressed as a repeat.
    pub fn observe<S>(
        &mut self,
        store: &InventoryStore<S>,
        raw: &str,
        now: Instant,
    ) -> StoreResult<Option<ScanResolution>>
    where
        S: KeyValueStorage,
    {
        if !self.debouncer.observe(raw.trim(), now) {
            return Ok(None);
        }
        resolve_scan(store, raw).map(Some)
    }
}
