//! The fixed sequence of blocks making up a document body.

use super::style::*;
use super::wording::{discharge_paragraphs, display, format_quantity, money, party_lines};
use quitus_layout::{
    LayoutElement, LayoutEngine, LayoutError, PositionedElement, RectElement, TextAlign, allocate_box,
    fit_to_width, format_amount, measure_wrapped_height, paragraph, split_two_column, text_line,
};
use quitus_types::geometry::EPSILON;
use quitus_types::{
    BusinessProfile, Color, DischargeDetails, DocumentKind, DocumentSpec, FinancialSummary, LineItem, Party,
    Rect, non_blank,
};

fn rect_element(rect: Rect, element: RectElement) -> PositionedElement {
    PositionedElement::new(rect, LayoutElement::Rectangle(element))
}

/// Title, then the issuer's name and contact line when a profile is given.
///
/// The block keeps the same height with or without a profile so that the
/// rest of the page, stamp box included, does not move.
pub(crate) fn title_block(
    engine: &mut LayoutEngine,
    kind: &DocumentKind,
    profile: Option<&BusinessProfile>,
) -> Result<(), LayoutError> {
    let height = TITLE.line_height() + BRAND.line_height() + SMALL.line_height();
    let block = engine.place_block(height)?;

    let mut y = block.y;
    let line = |y: f32, font: quitus_layout::FontSpec| Rect::new(block.x, y, block.width, font.line_height());
    engine.push(text_line(line(y, TITLE), kind.title(), TITLE, INK, TextAlign::Center));
    y += TITLE.line_height();

    let Some(profile) = profile else {
        return Ok(());
    };
    if let Some(name) = non_blank(profile.business_name.as_deref()) {
        let name = fit_to_width(name, block.width, &BRAND);
        engine.push(text_line(line(y, BRAND), &name, BRAND, INK, TextAlign::Center));
    }
    y += BRAND.line_height();

    let contact: Vec<&str> = [
        non_blank(profile.address.as_deref()),
        non_blank(profile.phone.as_deref()),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !contact.is_empty() {
        let contact = fit_to_width(&contact.join(" • "), block.width, &SMALL);
        engine.push(text_line(line(y, SMALL), &contact, SMALL, MUTED, TextAlign::Center));
    }
    Ok(())
}

/// Document number on the left, date on the right, same baseline. Each
/// keeps to its half of the line.
pub(crate) fn reference_line(engine: &mut LayoutEngine, spec: &DocumentSpec) -> Result<(), LayoutError> {
    let half = split_two_column(engine.content_width(), COLUMN_GAP)?;
    let rect = engine.place_block(BODY.line_height())?;
    let number = fit_to_width(&format!("N° {}", display(spec.doc_number.as_deref())), half, &BODY_BOLD);
    let date = fit_to_width(&format!("Date : {}", display(spec.date.as_deref())), half, &BODY);
    engine.push(text_line(rect, &number, BODY_BOLD, INK, TextAlign::Left));
    engine.push(text_line(rect, &date, BODY, INK, TextAlign::Right));
    Ok(())
}

/// Two side-by-side boxes of equal height, always drawn.
pub(crate) fn party_boxes(
    engine: &mut LayoutEngine,
    kind: &DocumentKind,
    party1: &Party,
    party2: &Party,
) -> Result<(), LayoutError> {
    let column = split_two_column(engine.content_width(), COLUMN_GAP)?;
    let inner_width = (column - 2.0 * BOX_PADDING).max(0.0);
    let (label1, label2) = kind.party_labels();
    let boxes = [(label1, party_lines(party1)), (label2, party_lines(party2))];

    let text_height = |lines: &[String; 4]| {
        LABEL.line_height()
            + lines
                .iter()
                .map(|line| measure_wrapped_height(line, inner_width, &BODY))
                .sum::<f32>()
    };
    let height = boxes
        .iter()
        .map(|(_, lines)| text_height(lines) + 2.0 * BOX_PADDING)
        .fold(PARTY_MIN_HEIGHT, f32::max);

    let row = engine.place_block(height)?;
    for (i, (label, lines)) in boxes.iter().enumerate() {
        let x = row.x + i as f32 * (column + COLUMN_GAP);
        let (frame, _) = allocate_box(x, row.y, column, height)?;
        engine.push(rect_element(frame, RectElement::outlined(INK)));

        let content = frame.inset(BOX_PADDING);
        let mut y = content.y;
        engine.push(text_line(
            Rect::new(content.x, y, content.width, LABEL.line_height()),
            label,
            LABEL,
            MUTED,
            TextAlign::Left,
        ));
        y += LABEL.line_height();
        for line in lines {
            engine.extend(paragraph(content.x, y, content.width, line, BODY, INK));
            y += measure_wrapped_height(line, content.width, &BODY);
        }
    }
    Ok(())
}

fn column_widths(content_width: f32) -> Result<[f32; 4], LayoutError> {
    let designation = content_width - QUANTITY_WIDTH - UNIT_PRICE_WIDTH - AMOUNT_WIDTH;
    if designation <= 2.0 * CELL_PADDING {
        return Err(LayoutError::InvalidGeometry(format!(
            "content width {:.2} leaves no room for the designation column",
            content_width
        )));
    }
    Ok([designation, QUANTITY_WIDTH, UNIT_PRICE_WIDTH, AMOUNT_WIDTH])
}

const CELL_ALIGN: [TextAlign; 4] = [TextAlign::Left, TextAlign::Right, TextAlign::Right, TextAlign::Right];

/// Draws one row of four outlined cells. The first cell wraps, the others
/// hold a single line.
fn draw_row(
    engine: &mut LayoutEngine,
    row: Rect,
    widths: &[f32; 4],
    cells: &[String; 4],
    font: quitus_layout::FontSpec,
    fill: Option<Color>,
) {
    let mut x = row.x;
    for ((width, text), align) in widths.iter().zip(cells).zip(CELL_ALIGN) {
        let cell = Rect::new(x, row.y, *width, row.height);
        let frame = match fill {
            Some(color) => RectElement::filled(color, Some(INK)),
            None => RectElement::outlined(INK),
        };
        engine.push(rect_element(cell, frame));

        let inner = cell.inset(CELL_PADDING);
        if align == TextAlign::Left {
            engine.extend(paragraph(inner.x, inner.y, inner.width, text, font, INK));
        } else if !text.is_empty() {
            let line = Rect::new(inner.x, inner.y, inner.width, font.line_height());
            engine.push(text_line(line, text, font, INK, align));
        }
        x += width;
    }
}

fn table_header(engine: &mut LayoutEngine, widths: &[f32; 4]) -> Result<(), LayoutError> {
    let row = engine.place_block(TABLE_HEADER_HEIGHT)?;
    let titles = ["Désignation", "Qté", "P.U.", "Montant"].map(String::from);
    draw_row(engine, row, widths, &titles, LABEL, Some(HEADER_FILL));
    Ok(())
}

/// Itemized table. Row heights follow the wrapped designation; when a row
/// does not fit, it moves to a new page below a repeated header.
pub(crate) fn item_table(engine: &mut LayoutEngine, items: &[LineItem]) -> Result<(), LayoutError> {
    let widths = column_widths(engine.content_width())?;
    let designation_width = widths[0] - 2.0 * CELL_PADDING;

    let rows: Vec<([String; 4], f32)> = if items.is_empty() {
        vec![(
            [PLACEHOLDER.to_string(), String::new(), String::new(), String::new()],
            TABLE_MIN_ROW_HEIGHT,
        )]
    } else {
        items
            .iter()
            .map(|item| {
                let designation = display(Some(item.designation.as_str())).to_string();
                let height = (measure_wrapped_height(&designation, designation_width, &BODY) + 2.0 * CELL_PADDING)
                    .max(TABLE_MIN_ROW_HEIGHT);
                let cells = [
                    designation,
                    format_quantity(item.quantity),
                    format_amount(item.unit_price),
                    format_amount(item.amount()),
                ];
                (cells, height)
            })
            .collect()
    };

    // A row must fit on a fresh page together with the repeated header.
    let page_height = engine.page_content_height();
    if let Some((_, tallest)) = rows.iter().max_by(|a, b| a.1.total_cmp(&b.1)) {
        if TABLE_HEADER_HEIGHT + tallest > page_height + EPSILON {
            return Err(LayoutError::ElementTooLarge(TABLE_HEADER_HEIGHT + tallest, page_height));
        }
    }

    // Keep the header with the first row.
    if !engine.fits(TABLE_HEADER_HEIGHT + rows[0].1) {
        engine.new_page();
    }
    table_header(engine, &widths)?;

    for (cells, height) in &rows {
        if !engine.fits(*height) {
            engine.new_page();
            table_header(engine, &widths)?;
            log::debug!("Item table continues on page {}", engine.page_index() + 1);
        }
        let row = engine.place_block(*height)?;
        log::trace!("Table row '{}' at y={:.2} h={:.2}", cells[0], row.y, row.height);
        draw_row(engine, row, &widths, cells, BODY, None);
    }
    Ok(())
}

/// Right-aligned totals, printed as given. Absent fields are skipped.
pub(crate) fn summary_block(
    engine: &mut LayoutEngine,
    summary: &FinancialSummary,
    currency: &str,
) -> Result<(), LayoutError> {
    let rows: Vec<(&str, f64)> = [
        ("Sous-total", summary.subtotal),
        ("Remise", summary.discount),
        ("Net HT", summary.net),
        ("TVA", summary.vat),
        ("Total TTC", summary.gross),
        ("Acompte", summary.deposit),
    ]
    .into_iter()
    .filter_map(|(label, value)| value.map(|v| (label, v)))
    .collect();
    if rows.is_empty() && summary.due.is_none() {
        return Ok(());
    }

    let height = rows.len() as f32 * SUMMARY_ROW_HEIGHT + summary.due.map_or(0.0, |_| TOTAL_ROW_HEIGHT);
    let block = engine.place_block(height)?;
    let x = block.right() - SUMMARY_WIDTH;
    let mut y = block.y;

    for (label, value) in rows {
        let line = Rect::new(
            x + CELL_PADDING,
            y + (SUMMARY_ROW_HEIGHT - BODY.line_height()) / 2.0,
            SUMMARY_WIDTH - 2.0 * CELL_PADDING,
            BODY.line_height(),
        );
        engine.push(text_line(line, label, BODY, MUTED, TextAlign::Left));
        engine.push(text_line(line, &money(value, currency), BODY, INK, TextAlign::Right));
        y += SUMMARY_ROW_HEIGHT;
    }

    if let Some(due) = summary.due {
        let (row, _) = allocate_box(x, y, SUMMARY_WIDTH, TOTAL_ROW_HEIGHT)?;
        engine.push(rect_element(row, RectElement::filled(HEADER_FILL, Some(INK))));
        let line = Rect::new(
            row.x + CELL_PADDING,
            row.y + (TOTAL_ROW_HEIGHT - TOTAL.line_height()) / 2.0,
            row.width - 2.0 * CELL_PADDING,
            TOTAL.line_height(),
        );
        engine.push(text_line(line, "NET À PAYER", TOTAL, INK, TextAlign::Left));
        engine.push(text_line(line, &money(due, currency), TOTAL, INK, TextAlign::Right));
    }
    Ok(())
}

/// The two attestation paragraphs of a discharge, each kept whole.
pub(crate) fn discharge_block(
    engine: &mut LayoutEngine,
    spec: &DocumentSpec,
    details: &DischargeDetails,
    currency: &str,
) -> Result<(), LayoutError> {
    let paragraphs = discharge_paragraphs(&spec.party1, &spec.party2, details, spec.summary.due, currency);
    for (i, text) in paragraphs.iter().enumerate() {
        if i > 0 {
            engine.skip(BODY.line_height());
        }
        let width = engine.content_width();
        let block = engine.place_block(measure_wrapped_height(text, width, &BODY))?;
        engine.extend(paragraph(block.x, block.y, block.width, text, BODY, INK));
    }
    Ok(())
}

/// "Fait à <place>, le <date>", only when a place is known.
pub(crate) fn place_line(engine: &mut LayoutEngine, spec: &DocumentSpec) -> Result<(), LayoutError> {
    let Some(place) = non_blank(spec.place.as_deref()) else {
        return Ok(());
    };
    let rect = engine.place_block(BODY.line_height())?;
    let text = format!("Fait à {}, le {}", place, display(spec.date.as_deref()));
    engine.push(text_line(rect, &text, BODY, INK, TextAlign::Left));
    Ok(())
}

pub(crate) fn signature_boxes(engine: &mut LayoutEngine, kind: &DocumentKind) -> Result<(), LayoutError> {
    let column = split_two_column(engine.content_width(), COLUMN_GAP)?;
    let label_height = LABEL.line_height() + 4.0;
    let row = engine.place_block(label_height + SIGNATURE_HEIGHT)?;
    let (label1, label2) = kind.party_labels();
    for (i, label) in [label1, label2].into_iter().enumerate() {
        let x = row.x + i as f32 * (column + COLUMN_GAP);
        engine.push(text_line(
            Rect::new(x, row.y, column, LABEL.line_height()),
            &format!("SIGNATURE {}", label),
            LABEL,
            MUTED,
            TextAlign::Left,
        ));
        let (frame, _) = allocate_box(x, row.y + label_height, column, SIGNATURE_HEIGHT)?;
        engine.push(rect_element(frame, RectElement::outlined(INK)));
    }
    Ok(())
}

/// Where the stamp goes: the labeled frame and the square inside it that
/// receives the raster.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StampSlot {
    pub frame: Rect,
    pub image: Rect,
    pub page: usize,
}

/// Right-aligned square frame labeled "TAMPON", drawn whether or not a stamp
/// raster ends up inside.
pub(crate) fn stamp_box(engine: &mut LayoutEngine) -> Result<StampSlot, LayoutError> {
    let row = engine.place_block(STAMP_BOX_SIDE)?;
    let (frame, _) = allocate_box(row.right() - STAMP_BOX_SIDE, row.y, STAMP_BOX_SIDE, STAMP_BOX_SIDE)?;
    engine.push(rect_element(frame, RectElement::outlined(INK)));

    let label = Rect::new(frame.x, frame.y + 4.0, frame.width, LABEL.line_height());
    engine.push(text_line(label, "TAMPON", LABEL, MUTED, TextAlign::Center));

    let below_label = label.bottom() + 2.0;
    let image = Rect::new(
        frame.x + BOX_PADDING,
        below_label,
        frame.width - 2.0 * BOX_PADDING,
        (frame.bottom() - BOX_PADDING - below_label).max(0.0),
    )
    .centered_square();

    Ok(StampSlot {
        frame,
        image,
        page: engine.page_index(),
    })
}
