pub(crate) mod boxed;
pub(crate) mod cursor;
pub(crate) mod layout;
pub(crate) mod table;

use pdf_writer::{Filter, Name, Pdf, Rect, Ref};

use crate::error::Error;
use crate::fonts::Fonts;
use crate::model::{Assets, DocumentRecord, RenderConfig};

use cursor::{FlowCursor, PageDecor, PageGeometry, PlacedImage};

/// Letterhead never exceeds this height; wider images scale down to fit the
/// content width first.
const LETTERHEAD_MAX_HEIGHT: f32 = 90.0;
const SIGNATURE_WIDTH: f32 = 110.0;

/// Render one resolved record to PDF bytes. Pure per invocation: every call
/// builds its own writer, fonts and cursor, so concurrent renders are
/// independent.
pub(crate) fn render(
    record: &DocumentRecord,
    assets: &Assets,
    config: &RenderConfig,
) -> Result<Vec<u8>, Error> {
    crate::docs::validate(record)?;

    let t0 = std::time::Instant::now();
    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();

    let fonts = Fonts::register(&mut pdf, &mut alloc);

    // Asset embedding. A decode failure degrades to rendering without the
    // decoration; it never aborts the document.
    let mut image_xobjects: Vec<(String, Ref)> = Vec::new();
    let content_width = PageGeometry::a4().content_width();

    let letterhead = assets.letterhead.as_deref().and_then(|bytes| {
        embed_image(&mut pdf, &mut alloc, &mut image_xobjects, bytes, "letterhead").map(
            |(name, px_w, px_h)| {
                let scale =
                    (content_width / px_w as f32).min(LETTERHEAD_MAX_HEIGHT / px_h as f32);
                PlacedImage {
                    pdf_name: name,
                    display_width: px_w as f32 * scale,
                    display_height: px_h as f32 * scale,
                }
            },
        )
    });
    let signature = assets.signature.as_deref().and_then(|bytes| {
        embed_image(&mut pdf, &mut alloc, &mut image_xobjects, bytes, "signature").map(
            |(name, px_w, px_h)| PlacedImage {
                pdf_name: name,
                display_width: SIGNATURE_WIDTH,
                display_height: px_h as f32 * SIGNATURE_WIDTH / px_w as f32,
            },
        )
    });

    let t_assets = t0.elapsed();

    let decor = PageDecor {
        letterhead,
        title: Some(crate::docs::title(record).to_string()),
    };
    let mut flow = FlowCursor::new(PageGeometry::a4(), &fonts, decor);
    crate::docs::assemble(&mut flow, record, signature.as_ref(), config)?;
    let pages = flow.finish();

    let t_layout = t0.elapsed();

    // Page tree assembly: ids are allocated only now that the count is known.
    let n = pages.len();
    let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

    for (i, content) in pages.into_iter().enumerate() {
        let raw = content.finish();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
        pdf.stream(content_ids[i], &compressed)
            .filter(Filter::FlateDecode);
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(n as i32);

    let geom = PageGeometry::a4();
    for i in 0..n {
        let mut page = pdf.page(page_ids[i]);
        page.media_box(Rect::new(0.0, 0.0, geom.page_width, geom.page_height))
            .parent(pages_id)
            .contents(content_ids[i]);
        let mut resources = page.resources();
        {
            let mut font_dict = resources.fonts();
            for (name, font_ref) in fonts.pairs() {
                font_dict.pair(Name(name.as_bytes()), font_ref);
            }
        }
        if !image_xobjects.is_empty() {
            let mut xobjects = resources.x_objects();
            for (name, xobj_ref) in &image_xobjects {
                xobjects.pair(Name(name.as_bytes()), *xobj_ref);
            }
        }
    }

    let t_total = t0.elapsed();
    log::info!(
        "Render phases: assets={:.1}ms, layout={:.1}ms, assembly={:.1}ms ({} pages)",
        t_assets.as_secs_f64() * 1000.0,
        (t_layout - t_assets).as_secs_f64() * 1000.0,
        (t_total - t_layout).as_secs_f64() * 1000.0,
        n,
    );

    Ok(pdf.finish())
}

/// Embed raw image bytes as an XObject: JPEG passes through with DctDecode,
/// PNG is re-encoded as Flate RGB with an optional alpha SMask. Returns the
/// resource name and pixel dimensions, or `None` when the bytes don't
/// decode (logged, recovered).
fn embed_image(
    pdf: &mut Pdf,
    alloc: &mut impl FnMut() -> Ref,
    image_xobjects: &mut Vec<(String, Ref)>,
    bytes: &[u8],
    what: &str,
) -> Option<(String, u32, u32)> {
    let format = match image::guess_format(bytes) {
        Ok(f) => f,
        Err(e) => {
            log::warn!("{what}: unrecognized image data ({e}); rendering without it");
            return None;
        }
    };

    let pdf_name = format!("Im{}", image_xobjects.len() + 1);
    let xobj_ref = alloc();

    match format {
        image::ImageFormat::Jpeg => {
            let cursor = std::io::Cursor::new(bytes);
            let reader = image::ImageReader::with_format(
                std::io::BufReader::new(cursor),
                image::ImageFormat::Jpeg,
            );
            let (w, h) = match reader.into_dimensions() {
                Ok(dims) => dims,
                Err(e) => {
                    log::warn!("{what}: JPEG does not parse ({e}); rendering without it");
                    return None;
                }
            };
            let mut xobj = pdf.image_xobject(xobj_ref, bytes);
            xobj.filter(Filter::DctDecode);
            xobj.width(w as i32);
            xobj.height(h as i32);
            xobj.color_space().device_rgb();
            xobj.bits_per_component(8);
            image_xobjects.push((pdf_name.clone(), xobj_ref));
            Some((pdf_name, w, h))
        }
        image::ImageFormat::Png => {
            let cursor = std::io::Cursor::new(bytes);
            let reader = image::ImageReader::with_format(
                std::io::BufReader::new(cursor),
                image::ImageFormat::Png,
            );
            let decoded = match reader.decode() {
                Ok(img) => img,
                Err(e) => {
                    log::warn!("{what}: PNG does not decode ({e}); rendering without it");
                    return None;
                }
            };
            let rgba: image::RgbaImage = decoded.to_rgba8();
            let (w, h) = (rgba.width(), rgba.height());
            let has_alpha = rgba.pixels().any(|p| p.0[3] < 255);

            let rgb_data: Vec<u8> = rgba.pixels().flat_map(|p| [p.0[0], p.0[1], p.0[2]]).collect();
            let compressed_rgb = miniz_oxide::deflate::compress_to_vec_zlib(&rgb_data, 6);

            let smask_ref = if has_alpha {
                let alpha_data: Vec<u8> = rgba.pixels().map(|p| p.0[3]).collect();
                let compressed_alpha =
                    miniz_oxide::deflate::compress_to_vec_zlib(&alpha_data, 6);
                let mask_ref = alloc();
                let mut mask = pdf.image_xobject(mask_ref, &compressed_alpha);
                mask.filter(Filter::FlateDecode);
                mask.width(w as i32);
                mask.height(h as i32);
                mask.color_space().device_gray();
                mask.bits_per_component(8);
                Some(mask_ref)
            } else {
                None
            };

            let mut xobj = pdf.image_xobject(xobj_ref, &compressed_rgb);
            xobj.filter(Filter::FlateDecode);
            xobj.width(w as i32);
            xobj.height(h as i32);
            xobj.color_space().device_rgb();
            xobj.bits_per_component(8);
            if let Some(mask_ref) = smask_ref {
                xobj.s_mask(mask_ref);
            }
            image_xobjects.push((pdf_name.clone(), xobj_ref));
            Some((pdf_name, w, h))
        }
        other => {
            log::warn!("{what}: unsupported image format {other:?}; rendering without it");
            None
        }
    }
}
