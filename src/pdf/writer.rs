use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};

use crate::assets::{AssetKind, Assets, ImageAsset, PixelData};
use crate::core::{Invoice, InvoiceError};

use super::layout::{DocumentLayout, Element};
use super::text::{Font, encode_win_ansi};

/// Serialize a laid-out document.
pub(crate) fn write_pdf(
    layout: &DocumentLayout,
    assets: &Assets,
    invoice: &Invoice,
) -> Result<Vec<u8>, InvoiceError> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for font in [Font::Regular, Font::Bold] {
        let id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font.resource(), Object::Reference(id));
    }

    let mut xobjects = Dictionary::new();
    let mut has_images = false;
    for kind in [AssetKind::Logo, AssetKind::Signature] {
        if let Some(asset) = assets.get(kind) {
            let id = add_image(&mut doc, asset);
            xobjects.set(image_resource(kind), Object::Reference(id));
            has_images = true;
        }
    }

    let mut resources = dictionary! { "Font" => fonts };
    if has_images {
        resources.set("XObject", xobjects);
    }
    let resources_id = doc.add_object(resources);

    let media_box: Vec<Object> = vec![
        0.into(),
        0.into(),
        layout.page_width.into(),
        layout.page_height.into(),
    ];

    let mut kids = Vec::with_capacity(layout.pages.len());
    for page in &layout.pages {
        let content: Content<Vec<Operation>> = Content {
            operations: page.elements.iter().flat_map(operations).collect(),
        };
        let bytes = content
            .encode()
            .map_err(|e| InvoiceError::Render(format!("failed to encode page content: {e}")))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, bytes));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => media_box.clone(),
            "Contents" => Object::Reference(content_id),
            "Resources" => Object::Reference(resources_id),
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(encode_win_ansi(&format!("Invoice {}", invoice.invoice_number))),
        "Author" => Object::string_literal(encode_win_ansi(&invoice.seller.name)),
        "Producer" => Object::string_literal("gstbill"),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc.trailer.set("Info", Object::Reference(info_id));

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| InvoiceError::Render(format!("failed to save PDF: {e}")))?;
    Ok(output)
}

fn image_resource(kind: AssetKind) -> &'static str {
    match kind {
        AssetKind::Logo => "Im1",
        AssetKind::Signature => "Im2",
    }
}

fn add_image(doc: &mut Document, asset: &ImageAsset) -> ObjectId {
    let width = i64::from(asset.width());
    let height = i64::from(asset.height());
    let stream = match asset.pixels() {
        PixelData::Jpeg { components } => {
            let color_space = match components {
                1 => "DeviceGray",
                4 => "DeviceCMYK",
                _ => "DeviceRGB",
            };
            Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => width,
                    "Height" => height,
                    "ColorSpace" => color_space,
                    "BitsPerComponent" => 8,
                    "Filter" => "DCTDecode",
                },
                asset.encoded().to_vec(),
            )
        }
        PixelData::Rgb { rgb, alpha } => {
            let mut dict = dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width,
                "Height" => height,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
            };
            if let Some(alpha) = alpha {
                let mask_id = doc.add_object(Stream::new(
                    dictionary! {
                        "Type" => "XObject",
                        "Subtype" => "Image",
                        "Width" => width,
                        "Height" => height,
                        "ColorSpace" => "DeviceGray",
                        "BitsPerComponent" => 8,
                    },
                    alpha.to_vec(),
                ));
                dict.set("SMask", Object::Reference(mask_id));
            }
            Stream::new(dict, rgb.to_vec())
        }
    };
    doc.add_object(stream.with_compression(false))
}

fn real(v: f32) -> Object {
    v.into()
}

fn operations(element: &Element) -> Vec<Operation> {
    match element {
        Element::Text {
            x,
            y,
            font,
            size,
            text,
        } => vec![
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![Object::Name(font.resource().as_bytes().to_vec()), real(*size)],
            ),
            Operation::new("Td", vec![real(*x), real(*y)]),
            Operation::new("Tj", vec![Object::string_literal(encode_win_ansi(text))]),
            Operation::new("ET", vec![]),
        ],
        Element::Line { from, to, width } => vec![
            Operation::new("w", vec![real(*width)]),
            Operation::new("m", vec![real(from.0), real(from.1)]),
            Operation::new("l", vec![real(to.0), real(to.1)]),
            Operation::new("S", vec![]),
        ],
        Element::Image {
            kind,
            x,
            y,
            width,
            height,
        } => vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    real(*width),
                    0.into(),
                    0.into(),
                    real(*height),
                    real(*x),
                    real(*y),
                ],
            ),
            Operation::new(
                "Do",
                vec![Object::Name(image_resource(*kind).as_bytes().to_vec())],
            ),
            Operation::new("Q", vec![]),
        ],
    }
}
