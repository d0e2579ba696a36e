mod docs;
mod error;
mod fonts;
mod model;
mod pdf;

pub mod numbering;
pub mod words;

pub use error::Error;
pub use model::{
    Annexure, Assets, Charges, Currency, DocumentRecord, Invoice, LineItem, Party,
    PurchaseOrder, RenderConfig, VgmCertificate,
};

use std::time::Instant;

/// Render a fully-resolved record to PDF bytes.
pub fn render_document(
    record: &DocumentRecord,
    assets: &Assets,
    config: &RenderConfig,
) -> Result<Vec<u8>, Error> {
    let t0 = Instant::now();

    let bytes = pdf::render(record, assets, config)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: {} {} rendered in {:.1}ms (output {} bytes)",
        record.kind(),
        record.number(),
        t_total.as_secs_f64() * 1000.0,
        bytes.len(),
    );

    Ok(bytes)
}

/// Deserialize a JSON record and render it.
pub fn render_json(json: &[u8], assets: &Assets, config: &RenderConfig) -> Result<Vec<u8>, Error> {
    let record: DocumentRecord = serde_json::from_slice(json)?;
    render_document(&record, assets, config)
}
