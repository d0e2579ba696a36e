use crate::error::Error;
use crate::model::{PurchaseOrder, RenderConfig};
use crate::pdf::boxed::LabeledBox;
use crate::pdf::cursor::{Block, FlowCursor, PlacedImage};
use crate::pdf::layout::{Align, TextStyle};
use crate::pdf::table::{Column, TableSpec};
use crate::words::amount_in_words;

use super::{compute_totals, fmt_money, fmt_qty, require, resolve_date, signature_block};

pub(crate) fn assemble(
    flow: &mut FlowCursor,
    po: &PurchaseOrder,
    signature: Option<&PlacedImage>,
    config: &RenderConfig,
) -> Result<(), Error> {
    let buyer = require(&po.buyer, "buyer")?;
    let supplier = require(&po.supplier, "supplier")?;
    let date = resolve_date(&po.date, "order date", config)?;
    let delivery = match &po.delivery_date {
        Some(d) => resolve_date(d, "delivery date", config)?,
        None => "-".into(),
    };

    flow.push(Block::BoxRow(vec![
        LabeledBox::new("PO No.", &po.number),
        LabeledBox::new("Date", date),
    ]))?;
    flow.push(Block::BoxRow(vec![
        LabeledBox::new("Buyer", buyer.display()),
        LabeledBox::new("Supplier", supplier.display()),
    ]))?;
    flow.push(Block::BoxRow(vec![
        LabeledBox::new(
            "Ship To",
            po.ship_to
                .as_ref()
                .map(|p| p.display())
                .unwrap_or_else(|| buyer.display()),
        ),
        LabeledBox::new("Delivery Date", delivery),
        LabeledBox::new(
            "Payment Terms",
            po.payment_terms.clone().unwrap_or_else(|| "-".into()),
        ),
    ]))?;
    flow.push(Block::Spacer(8.0))?;

    let width = flow.geometry().content_width();
    let mut table = TableSpec::new(
        width,
        vec![
            Column::fixed("Sr.", 26.0, Align::Center),
            Column::auto("Description of Goods", Align::Left),
            Column::fixed("Qty", 46.0, Align::Right),
            Column::fixed("Unit", 34.0, Align::Left),
            Column::fixed("Rate", 60.0, Align::Right),
            Column::fixed(format!("Amount ({})", po.currency.code), 78.0, Align::Right),
        ],
    )?;
    for (i, item) in po.items.iter().enumerate() {
        table.push_row(vec![
            (i + 1).to_string(),
            item.description.clone(),
            fmt_qty(item.quantity),
            item.unit.clone(),
            fmt_money(item.rate),
            fmt_money(item.amount()),
        ]);
    }
    flow.push(Block::Table(table))?;
    flow.push(Block::Spacer(6.0))?;

    let totals = compute_totals(&po.items, &po.charges);
    super::invoice::push_totals(flow, &totals, &po.currency.code)?;
    flow.push(Block::Spacer(6.0))?;

    flow.push(Block::LabeledBox(LabeledBox::new(
        "Amount (in words)",
        amount_in_words(totals.grand_total, &po.currency),
    )))?;

    if !po.notes.is_empty() {
        flow.push(Block::Spacer(8.0))?;
        flow.push(Block::Rule)?;
        flow.push(Block::text("Terms & Conditions", TextStyle::bold(9.0)))?;
        for (i, note) in po.notes.iter().enumerate() {
            flow.push(Block::text(
                format!("{}. {note}", i + 1),
                TextStyle::regular(8.5),
            ))?;
        }
    }

    signature_block(flow, &buyer.name, "Authorised Signatory", signature)
}
