use crate::error::Error;
use crate::model::{Invoice, RenderConfig};
use crate::pdf::cursor::{Block, FlowCursor, PlacedImage};
use crate::pdf::layout::{Align, TextStyle};
use crate::pdf::table::{Column, TableSpec};
use crate::pdf::boxed::LabeledBox;
use crate::words::amount_in_words;

use super::{compute_totals, fmt_money, fmt_qty, require, resolve_date, signature_block};

const DEFAULT_DECLARATION: &str = "We declare that this invoice shows the actual price of \
the goods described and that all particulars are true and correct.";

pub(crate) fn assemble(
    flow: &mut FlowCursor,
    inv: &Invoice,
    signature: Option<&PlacedImage>,
    config: &RenderConfig,
) -> Result<(), Error> {
    let exporter = require(&inv.exporter, "exporter")?;
    let consignee = require(&inv.consignee, "consignee")?;
    let date = resolve_date(&inv.date, "invoice date", config)?;

    flow.push(Block::BoxRow(vec![
        LabeledBox::new("Invoice No.", &inv.number),
        LabeledBox::new("Date", date),
    ]))?;
    flow.push(Block::BoxRow(vec![
        LabeledBox::new("Exporter", exporter.display()),
        LabeledBox::new("Consignee", consignee.display()),
    ]))?;

    let mut parties = Vec::new();
    if let Some(buyer) = &inv.buyer {
        parties.push(LabeledBox::new("Buyer (if other than consignee)", buyer.display()));
    }
    if let Some(bank) = &inv.bank {
        parties.push(LabeledBox::new("Bank Details", bank.display()));
    }
    if !parties.is_empty() {
        flow.push(Block::BoxRow(parties))?;
    }

    let dash = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".into());
    flow.push(Block::BoxRow(vec![
        LabeledBox::new("Port of Loading", dash(&inv.port_of_loading)),
        LabeledBox::new("Port of Discharge", dash(&inv.port_of_discharge)),
        LabeledBox::new("Final Destination", dash(&inv.final_destination)),
        LabeledBox::new("Country of Origin", dash(&inv.country_of_origin)),
    ]))?;
    flow.push(Block::BoxRow(vec![
        LabeledBox::new("Payment Terms", dash(&inv.payment_terms)),
        LabeledBox::new("Delivery Terms", dash(&inv.delivery_terms)),
    ]))?;
    flow.push(Block::Spacer(8.0))?;

    let table = items_table(flow.geometry().content_width(), inv)?;
    flow.push(Block::Table(table))?;
    flow.push(Block::Spacer(6.0))?;

    let totals = compute_totals(&inv.items, &inv.charges);
    push_totals(flow, &totals, &inv.currency.code)?;
    flow.push(Block::Spacer(6.0))?;

    flow.push(Block::LabeledBox(LabeledBox::new(
        "Amount Chargeable (in words)",
        amount_in_words(totals.grand_total, &inv.currency),
    )))?;
    flow.push(Block::Spacer(8.0))?;

    let declaration = inv.declaration.as_deref().unwrap_or(DEFAULT_DECLARATION);
    flow.push(Block::LabeledBox(LabeledBox::new("Declaration", declaration)))?;

    signature_block(flow, &exporter.name, "Authorised Signatory", signature)
}

fn items_table(width: f32, inv: &Invoice) -> Result<TableSpec, Error> {
    let mut table = TableSpec::new(
        width,
        vec![
            Column::fixed("Sr.", 26.0, Align::Center),
            Column::fixed("HS Code", 58.0, Align::Left),
            Column::auto("Description of Goods", Align::Left),
            Column::fixed("Qty", 46.0, Align::Right),
            Column::fixed("Unit", 34.0, Align::Left),
            Column::fixed("Rate", 60.0, Align::Right),
            Column::fixed(format!("Amount ({})", inv.currency.code), 78.0, Align::Right),
        ],
    )?;
    for (i, item) in inv.items.iter().enumerate() {
        table.push_row(vec![
            (i + 1).to_string(),
            item.hs_code.clone().unwrap_or_else(|| "-".into()),
            item.description.clone(),
            fmt_qty(item.quantity),
            item.unit.clone(),
            fmt_money(item.rate),
            fmt_money(item.amount()),
        ]);
    }
    Ok(table)
}

pub(super) fn push_totals(
    flow: &mut FlowCursor,
    totals: &super::Totals,
    code: &str,
) -> Result<(), Error> {
    let style = TextStyle::regular(9.0).align(Align::Right);
    let line = |flow: &mut FlowCursor, label: &str, value: f64| {
        flow.push(Block::text(format!("{label}: {}", fmt_money(value)), style))
    };

    line(flow, "Subtotal", totals.subtotal)?;
    if totals.discount != 0.0 {
        line(flow, "Less: Discount", totals.discount)?;
    }
    if totals.freight != 0.0 {
        line(flow, "Add: Freight", totals.freight)?;
    }
    if totals.insurance != 0.0 {
        line(flow, "Add: Insurance", totals.insurance)?;
    }
    if totals.tax != 0.0 {
        line(flow, "Add: Tax", totals.tax)?;
    }
    if totals.rounding.abs() >= 0.005 {
        line(flow, "Rounding", totals.rounding)?;
    }
    flow.push(Block::text(
        format!("TOTAL ({code}): {}", fmt_money(totals.grand_total)),
        TextStyle::bold(10.0).align(Align::Right),
    ))
}
