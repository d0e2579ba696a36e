use std::sync::Once;

use tradedoc_pdf::{
    Annexure, Charges, Currency, DocumentRecord, Invoice, LineItem, Party, PurchaseOrder,
    VgmCertificate,
};

static INIT: Once = Once::new();

pub fn init_logging() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

pub fn party(name: &str) -> Party {
    Party {
        name: name.into(),
        address: "12 Harbour Road\nPort City 400001".into(),
        country: Some("India".into()),
        ..Party::default()
    }
}

pub fn items(count: usize) -> Vec<LineItem> {
    (0..count)
        .map(|i| LineItem {
            description: format!("Forged steel flange, DN{} PN16, machined and zinc plated", 50 + i),
            hs_code: Some("7307.91".into()),
            quantity: 10.0 + i as f64,
            unit: "PCS".into(),
            rate: 42.50,
        })
        .collect()
}

pub fn invoice(item_count: usize) -> Invoice {
    Invoice {
        number: "EXP/24-25/17".into(),
        date: "2024-06-05".into(),
        exporter: Some(party("Acme Exports Pvt Ltd")),
        consignee: Some(party("Nordsee Handel GmbH")),
        buyer: None,
        bank: Some(party("State Bank, Fort Branch")),
        port_of_loading: Some("Nhava Sheva".into()),
        port_of_discharge: Some("Hamburg".into()),
        final_destination: Some("Hamburg".into()),
        country_of_origin: Some("India".into()),
        payment_terms: Some("30 days from B/L date".into()),
        delivery_terms: Some("FOB Nhava Sheva".into()),
        currency: Currency::usd(),
        items: items(item_count),
        charges: Charges {
            freight: 120.0,
            insurance: 35.0,
            ..Charges::default()
        },
        declaration: None,
    }
}

pub fn purchase_order(item_count: usize) -> PurchaseOrder {
    PurchaseOrder {
        number: "PO/24-25/003".into(),
        date: "2024-07-01".into(),
        buyer: Some(party("Acme Exports Pvt Ltd")),
        supplier: Some(party("Shakti Forge Industries")),
        ship_to: None,
        delivery_date: Some("2024-08-15".into()),
        payment_terms: Some("50% advance, balance on delivery".into()),
        currency: Currency::inr(),
        items: items(item_count),
        charges: Charges::default(),
        notes: vec![
            "Material test certificates to accompany each lot.".into(),
            "Tolerances per IS 2062 unless stated otherwise.".into(),
        ],
    }
}

pub fn annexure(item_count: usize) -> Annexure {
    Annexure {
        invoice_number: "EXP/24-25/17".into(),
        invoice_date: "2024-06-05".into(),
        exporter: Some(party("Acme Exports Pvt Ltd")),
        manufacturer: Some(party("Shakti Forge Industries")),
        iec_code: Some("0512034567".into()),
        examination_place: Some("Factory premises, Rajkot".into()),
        examination_date: Some("2024-06-04".into()),
        currency: Currency::usd(),
        items: items(item_count),
        packages: 14,
        net_weight_kg: 1240.0,
        gross_weight_kg: 1310.0,
        seal_number: Some("SL-88213".into()),
    }
}

pub fn vgm() -> VgmCertificate {
    VgmCertificate {
        booking_number: "BKG-445120".into(),
        date: "2024-06-06".into(),
        shipper: Some(party("Acme Exports Pvt Ltd")),
        container_number: "MSKU 281700-3".into(),
        container_size: "40'".into(),
        cargo_weight_kg: 18400.0,
        tare_weight_kg: 3750.0,
        method: "Method 1".into(),
        weighbridge: Some("Port Trust Weighbridge No. 2".into()),
        weighing_date: Some("2024-06-06".into()),
        authorized_person: "R. Mehta".into(),
        designation: Some("Logistics Manager".into()),
    }
}

pub fn record_invoice(item_count: usize) -> DocumentRecord {
    DocumentRecord::Invoice(invoice(item_count))
}

/// Counts page objects in the raw PDF bytes. Content streams are compressed
/// but the page dictionaries are not, so `/Type /Page` is visible.
pub fn page_count(pdf: &[u8]) -> usize {
    let needle = b"/Type /Page";
    pdf.windows(needle.len())
        .enumerate()
        .filter(|(i, w)| {
            // Skip the /Type /Pages tree node.
            *w == needle && pdf.get(i + needle.len()) != Some(&b's')
        })
        .count()
}
