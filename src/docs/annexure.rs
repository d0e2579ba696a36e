//! Customs examination annexure. Spacing is picked in two passes: a dry run
//! at generous spacing on a throwaway cursor, then the real pass compact if
//! the dry run spilled past one page.

use crate::error::Error;
use crate::model::{Annexure, RenderConfig};
use crate::pdf::boxed::LabeledBox;
use crate::pdf::cursor::{Block, FlowCursor, PlacedImage};
use crate::pdf::layout::{Align, TextStyle};
use crate::pdf::table::{CellPadding, Column, TableSpec};
use crate::words::amount_in_words;

use super::{fmt_money, fmt_qty, require, resolve_date, signature_block};

const CERTIFICATION: &str = "Certified that the goods described above have been packed and \
sealed in our presence and that the particulars shown are in accordance with the invoice \
and packing list.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Density {
    Generous,
    Compact,
}

impl Density {
    fn cell_padding(self) -> CellPadding {
        match self {
            Density::Generous => CellPadding { x: 5.0, y: 6.0 },
            Density::Compact => CellPadding { x: 3.0, y: 1.5 },
        }
    }

    fn spacer(self) -> f32 {
        match self {
            Density::Generous => 10.0,
            Density::Compact => 4.0,
        }
    }
}

/// Compact once the generous dry run spills past one page, even when compact
/// spacing will not pull it back to one either.
pub(crate) fn choose_density(generous_page_count: usize) -> Density {
    if generous_page_count > 1 {
        Density::Compact
    } else {
        Density::Generous
    }
}

pub(crate) fn assemble(
    flow: &mut FlowCursor,
    ann: &Annexure,
    signature: Option<&PlacedImage>,
    config: &RenderConfig,
) -> Result<(), Error> {
    // Dry run on a throwaway cursor. Identical geometry and decorations, so
    // its page count matches what the generous layout would really produce.
    let mut probe = FlowCursor::new(flow.geometry(), flow.fonts(), flow.decor().clone());
    build(&mut probe, ann, signature, Density::Generous, config)?;
    let density = choose_density(probe.page_count());
    log::debug!(
        "annexure dry run: {} page(s) at generous spacing, using {density:?}",
        probe.page_count()
    );

    build(flow, ann, signature, density, config)
}

fn build(
    flow: &mut FlowCursor,
    ann: &Annexure,
    signature: Option<&PlacedImage>,
    density: Density,
    config: &RenderConfig,
) -> Result<(), Error> {
    let exporter = require(&ann.exporter, "exporter")?;
    let manufacturer = require(&ann.manufacturer, "manufacturer")?;
    let invoice_date = resolve_date(&ann.invoice_date, "invoice date", config)?;
    let examination_date = match &ann.examination_date {
        Some(d) => resolve_date(d, "examination date", config)?,
        None => "-".into(),
    };
    let dash = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".into());

    flow.push(Block::BoxRow(vec![
        LabeledBox::new("Exporter", exporter.display()),
        LabeledBox::new("Manufacturer", manufacturer.display()),
    ]))?;
    flow.push(Block::BoxRow(vec![
        LabeledBox::new("Invoice No.", &ann.invoice_number),
        LabeledBox::new("Invoice Date", invoice_date),
        LabeledBox::new("IEC Code", dash(&ann.iec_code)),
    ]))?;
    flow.push(Block::BoxRow(vec![
        LabeledBox::new("Place of Examination", dash(&ann.examination_place)),
        LabeledBox::new("Date of Examination", examination_date),
        LabeledBox::new("Seal No.", dash(&ann.seal_number)),
    ]))?;
    flow.push(Block::Spacer(density.spacer()))?;

    let width = flow.geometry().content_width();
    let mut table = TableSpec::new(
        width,
        vec![
            Column::fixed("Sr.", 26.0, Align::Center),
            Column::auto("Description of Goods", Align::Left),
            Column::fixed("Qty", 46.0, Align::Right),
            Column::fixed("Unit", 34.0, Align::Left),
            Column::fixed("Rate", 60.0, Align::Right),
            Column::fixed(format!("Value ({})", ann.currency.code), 78.0, Align::Right),
        ],
    )?;
    table.padding = density.cell_padding();
    let mut total = 0.0;
    for (i, item) in ann.items.iter().enumerate() {
        total += item.amount();
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
    flow.push(Block::text(
        format!("Total FOB Value ({}): {}", ann.currency.code, fmt_money(total)),
        TextStyle::bold(9.0).align(Align::Right),
    ))?;
    flow.push(Block::Spacer(density.spacer()))?;

    flow.push(Block::LabeledBox(LabeledBox::new(
        "Value (in words)",
        amount_in_words(total, &ann.currency),
    )))?;
    flow.push(Block::BoxRow(vec![
        LabeledBox::new("No. of Packages", ann.packages.to_string()),
        LabeledBox::new("Net Weight (kg)", fmt_qty(ann.net_weight_kg)),
        LabeledBox::new("Gross Weight (kg)", fmt_qty(ann.gross_weight_kg)),
    ]))?;
    flow.push(Block::Spacer(density.spacer()))?;

    flow.push(Block::text(CERTIFICATION, TextStyle::oblique(8.5)))?;
    signature_block(flow, &exporter.name, "Authorised Signatory", signature)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_page_keeps_generous_spacing() {
        assert_eq!(choose_density(1), Density::Generous);
    }

    #[test]
    fn spill_switches_to_compact_even_when_compact_cannot_recover() {
        assert_eq!(choose_density(2), Density::Compact);
        assert_eq!(choose_density(7), Density::Compact);
    }
}
