use crate::error::Error;
use crate::model::{RenderConfig, VgmCertificate};
use crate::pdf::boxed::LabeledBox;
use crate::pdf::cursor::{Block, FlowCursor, PlacedImage};
use crate::pdf::layout::Align;
use crate::pdf::table::{Column, TableSpec};

use super::{fmt_qty, require, resolve_date, signature_block};

const DECLARATION: &str = "We hereby declare that the verified gross mass stated above has \
been obtained in accordance with SOLAS regulation VI/2 and is, to the best of our knowledge \
and belief, true and correct.";

pub(crate) fn assemble(
    flow: &mut FlowCursor,
    vgm: &VgmCertificate,
    signature: Option<&PlacedImage>,
    config: &RenderConfig,
) -> Result<(), Error> {
    let shipper = require(&vgm.shipper, "shipper")?;
    let date = resolve_date(&vgm.date, "certificate date", config)?;
    let weighing_date = match &vgm.weighing_date {
        Some(d) => resolve_date(d, "weighing date", config)?,
        None => "-".into(),
    };

    flow.push(Block::BoxRow(vec![
        LabeledBox::new("Shipper", shipper.display()),
        LabeledBox::new("Booking No.", &vgm.booking_number),
        LabeledBox::new("Date", date),
    ]))?;
    flow.push(Block::BoxRow(vec![
        LabeledBox::new("Container No.", &vgm.container_number),
        LabeledBox::new("Container Size", &vgm.container_size),
        LabeledBox::new("Weighing Method", &vgm.method),
    ]))?;
    flow.push(Block::BoxRow(vec![
        LabeledBox::new(
            "Weighbridge / Weighing Facility",
            vgm.weighbridge.clone().unwrap_or_else(|| "-".into()),
        ),
        LabeledBox::new("Date of Weighing", weighing_date),
    ]))?;
    flow.push(Block::Spacer(10.0))?;

    let width = flow.geometry().content_width();
    let mut table = TableSpec::new(
        width,
        vec![
            Column::auto("Particulars", Align::Left),
            Column::fixed("Weight (kg)", 120.0, Align::Right),
        ],
    )?;
    table.font_size = 9.0;
    table.push_row(vec![
        "Weight of cargo, packing and dunnage".into(),
        fmt_qty(vgm.cargo_weight_kg),
    ]);
    table.push_row(vec![
        "Tare weight of container".into(),
        fmt_qty(vgm.tare_weight_kg),
    ]);
    table.push_row(vec![
        "VERIFIED GROSS MASS (VGM)".into(),
        fmt_qty(vgm.verified_gross_mass_kg()),
    ]);
    flow.push(Block::Table(table))?;
    flow.push(Block::Spacer(10.0))?;

    flow.push(Block::LabeledBox(LabeledBox::new("Declaration", DECLARATION)))?;

    let signatory = match &vgm.designation {
        Some(designation) => format!("{}, {designation}", vgm.authorized_person),
        None => vgm.authorized_person.clone(),
    };
    signature_block(flow, &shipper.name, &signatory, signature)
}
