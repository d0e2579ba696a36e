//! Document assemblers: one per template, each a fixed sequence of title,
//! metadata boxes, line-item table, totals, amount-in-words, declaration and
//! signature block composed from the shared layout primitives.

mod annexure;
mod invoice;
mod purchase_order;
mod vgm;

use chrono::NaiveDate;

use crate::error::Error;
use crate::model::{Charges, DocumentRecord, LineItem, Party, RenderConfig};
use crate::pdf::cursor::{Block, FlowCursor, PlacedImage};
use crate::pdf::layout::{Align, TextStyle};

pub(crate) fn title(record: &DocumentRecord) -> &'static str {
    match record {
        DocumentRecord::Invoice(_) => "COMMERCIAL INVOICE",
        DocumentRecord::PurchaseOrder(_) => "PURCHASE ORDER",
        DocumentRecord::Annexure(_) => "ANNEXURE A - EXPORT EXAMINATION",
        DocumentRecord::Vgm(_) => "VERIFIED GROSS MASS (VGM) CERTIFICATE",
    }
}

/// Required-entity check, run before any drawing so a missing party never
/// produces a partially-labeled document.
pub(crate) fn validate(record: &DocumentRecord) -> Result<(), Error> {
    match record {
        DocumentRecord::Invoice(inv) => {
            require(&inv.exporter, "exporter")?;
            require(&inv.consignee, "consignee")?;
        }
        DocumentRecord::PurchaseOrder(po) => {
            require(&po.buyer, "buyer")?;
            require(&po.supplier, "supplier")?;
        }
        DocumentRecord::Annexure(ann) => {
            require(&ann.exporter, "exporter")?;
            require(&ann.manufacturer, "manufacturer")?;
        }
        DocumentRecord::Vgm(vgm) => {
            require(&vgm.shipper, "shipper")?;
        }
    }
    Ok(())
}

pub(crate) fn assemble(
    flow: &mut FlowCursor,
    record: &DocumentRecord,
    signature: Option<&PlacedImage>,
    config: &RenderConfig,
) -> Result<(), Error> {
    match record {
        DocumentRecord::Invoice(inv) => invoice::assemble(flow, inv, signature, config),
        DocumentRecord::PurchaseOrder(po) => purchase_order::assemble(flow, po, signature, config),
        DocumentRecord::Annexure(ann) => annexure::assemble(flow, ann, signature, config),
        DocumentRecord::Vgm(vgm) => vgm::assemble(flow, vgm, signature, config),
    }
}

pub(crate) fn require<'a>(
    party: &'a Option<Party>,
    name: &'static str,
) -> Result<&'a Party, Error> {
    party.as_ref().ok_or(Error::MissingEntity(name))
}

/// Computed money lines shared by the invoice and purchase-order templates.
/// The grand total is rounded to whole currency units; the residual
/// cents/paisa land in the rounding line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Totals {
    pub(crate) subtotal: f64,
    pub(crate) discount: f64,
    pub(crate) freight: f64,
    pub(crate) insurance: f64,
    pub(crate) tax: f64,
    pub(crate) rounding: f64,
    pub(crate) grand_total: f64,
}

pub(crate) fn compute_totals(items: &[LineItem], charges: &Charges) -> Totals {
    let subtotal: f64 = items.iter().map(|i| i.amount()).sum();
    let taxable = subtotal - charges.discount;
    let tax = taxable * charges.tax_percent / 100.0;
    let raw = taxable + charges.freight + charges.insurance + tax;
    let grand_total = raw.round();
    Totals {
        subtotal,
        discount: charges.discount,
        freight: charges.freight,
        insurance: charges.insurance,
        tax,
        rounding: grand_total - raw,
        grand_total,
    }
}

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y", "%d.%m.%Y"];

pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value.trim(), fmt).ok())
}

/// Display form of a record date. Lenient mode substitutes today's date for
/// unparseable input (logged); strict mode makes it fatal.
pub(crate) fn resolve_date(
    value: &str,
    field: &'static str,
    config: &RenderConfig,
) -> Result<String, Error> {
    match parse_date(value) {
        Some(date) => Ok(date.format("%d.%m.%Y").to_string()),
        None if config.strict => Err(Error::MalformedField {
            field,
            value: value.to_string(),
        }),
        None => {
            log::warn!("{field}: unparseable date {value:?}, falling back to today");
            Ok(chrono::Local::now().date_naive().format("%d.%m.%Y").to_string())
        }
    }
}

/// "1,234,567.89" — invoice-column money formatting.
pub(crate) fn fmt_money(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}{grouped}.{frac:02}")
}

/// Quantities print without trailing zero noise: 12 not 12.00, 12.5 not 12.50.
pub(crate) fn fmt_qty(value: f64) -> String {
    let s = format!("{value:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_string()
}

const SIGNATURE_GAP: f32 = 30.0;

/// Right-aligned signature block: "For <party>", the signature image when
/// available, and the signatory line. Rendered atomically.
pub(crate) fn signature_block(
    flow: &mut FlowCursor,
    for_name: &str,
    signatory_line: &str,
    signature: Option<&PlacedImage>,
) -> Result<(), Error> {
    let line_style = TextStyle::bold(9.0).align(Align::Right);
    let img_h = signature.map_or(SIGNATURE_GAP, |img| img.display_height + 6.0);
    let total_h = line_style.line_height() * 2.0 + img_h + 10.0;
    flow.ensure_room(total_h, "signature block")?;

    flow.advance(10.0);
    flow.push(Block::text(format!("For {for_name}"), line_style))?;

    if let Some(img) = signature {
        let geom = flow.geometry();
        let x = geom.margin_left + geom.content_width() - img.display_width;
        let y_bottom = flow.y() - img.display_height;
        let (w, h, name) = (img.display_width, img.display_height, img.pdf_name.clone());
        let content = flow.content();
        content.save_state();
        content.transform([w, 0.0, 0.0, h, x, y_bottom]);
        content.x_object(pdf_writer::Name(name.as_bytes()));
        content.restore_state();
        flow.advance(h + 6.0);
    } else {
        flow.advance(SIGNATURE_GAP);
    }

    flow.push(Block::text(signatory_line, line_style))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Charges, LineItem};

    fn item(qty: f64, rate: f64) -> LineItem {
        LineItem {
            description: "widget".into(),
            hs_code: None,
            quantity: qty,
            unit: "PCS".into(),
            rate,
        }
    }

    #[test]
    fn totals_round_trip() {
        let items = vec![item(3.0, 100.0), item(2.0, 50.25)];
        let charges = Charges {
            discount: 10.0,
            freight: 25.0,
            insurance: 5.0,
            tax_percent: 0.0,
        };
        let t = compute_totals(&items, &charges);
        assert_eq!(t.subtotal, 400.50);
        // 400.50 − 10 + 25 + 5 = 420.50 → rounds to 421, residual +0.50
        assert_eq!(t.grand_total, 421.0);
        assert!((t.rounding - 0.5).abs() < 1e-9);
    }

    #[test]
    fn rounding_line_absorbs_residual_exactly() {
        let items = vec![item(1.0, 99.49)];
        let t = compute_totals(&items, &Charges::default());
        assert_eq!(t.grand_total, 99.0);
        let reconstructed =
            t.subtotal - t.discount + t.freight + t.insurance + t.tax + t.rounding;
        assert!((reconstructed - t.grand_total).abs() < 1e-9);
    }

    #[test]
    fn tax_applies_after_discount() {
        let items = vec![item(1.0, 1000.0)];
        let charges = Charges {
            discount: 100.0,
            tax_percent: 18.0,
            ..Charges::default()
        };
        let t = compute_totals(&items, &charges);
        assert!((t.tax - 162.0).abs() < 1e-9);
        assert_eq!(t.grand_total, 1062.0);
    }

    #[test]
    fn date_formats_accepted() {
        assert_eq!(
            resolve_date("2024-06-05", "date", &RenderConfig::default()).unwrap(),
            "05.06.2024"
        );
        assert_eq!(
            resolve_date("05/06/2024", "date", &RenderConfig::default()).unwrap(),
            "05.06.2024"
        );
    }

    #[test]
    fn strict_mode_rejects_malformed_dates() {
        let strict = RenderConfig { strict: true };
        assert!(matches!(
            resolve_date("yesterday-ish", "date", &strict),
            Err(Error::MalformedField { field: "date", .. })
        ));
        // Lenient mode recovers with some valid date.
        assert!(resolve_date("yesterday-ish", "date", &RenderConfig::default()).is_ok());
    }

    #[test]
    fn money_grouping() {
        assert_eq!(fmt_money(1234567.891), "1,234,567.89");
        assert_eq!(fmt_money(0.5), "0.50");
        assert_eq!(fmt_money(999.0), "999.00");
    }

    #[test]
    fn quantity_trimming() {
        assert_eq!(fmt_qty(12.0), "12");
        assert_eq!(fmt_qty(12.5), "12.5");
        assert_eq!(fmt_qty(12.25), "12.25");
    }
}
