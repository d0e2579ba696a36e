mod common;

use tradedoc_pdf::{Assets, DocumentRecord, RenderConfig};

fn render(record: DocumentRecord) -> Vec<u8> {
    common::init_logging();
    tradedoc_pdf::render_document(&record, &Assets::default(), &RenderConfig::default())
        .expect("render should succeed")
}

#[test]
fn long_invoice_spans_multiple_pages() {
    let pdf = render(DocumentRecord::Invoice(common::invoice(90)));
    assert!(common::page_count(&pdf) >= 2, "90 items must not fit one page");
}

#[test]
fn page_count_grows_monotonically_with_items() {
    let short = common::page_count(&render(DocumentRecord::Invoice(common::invoice(5))));
    let long = common::page_count(&render(DocumentRecord::Invoice(common::invoice(150))));
    assert!(short < long);
}

#[test]
fn long_annexure_switches_to_compact_and_still_paginates() {
    // Too many rows for one page even compact; the renderer must still
    // produce a complete multi-page document.
    let pdf = render(DocumentRecord::Annexure(common::annexure(120)));
    assert!(common::page_count(&pdf) >= 2);
}

#[test]
fn short_annexure_stays_on_one_page() {
    let pdf = render(DocumentRecord::Annexure(common::annexure(3)));
    assert_eq!(common::page_count(&pdf), 1);
}

#[test]
fn long_purchase_order_notes_flow_across_pages() {
    let mut po = common::purchase_order(60);
    po.notes = (1..=20)
        .map(|i| format!("Condition {i}: inspection and packing as per the approved plan."))
        .collect();
    let pdf = render(DocumentRecord::PurchaseOrder(po));
    assert!(common::page_count(&pdf) >= 2);
}
