//! PDF report export.
//!
//! Page one carries the counts table with its total row. The object details
//! start on a fresh A4 page and continue over as many pages as needed, each
//! with the column header repeated.

use std::fs;
use std::path::Path;

use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Rect, Rgb,
};

use crate::data::declaration::Declaration;
use crate::error::BcobjError;
use crate::output::table::{SUMMARY_TITLE, TOTAL_LABEL};
use crate::query::summary::Summary;
use crate::Result;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 10.0;

/// Rows are not started below this distance from the top of the page
const PAGE_BREAK_AT: f32 = 270.0;

/// Height of a detail header row and of a detail row
const DETAIL_HEADER_HEIGHT: f32 = 7.0;
const DETAIL_ROW_HEIGHT: f32 = 6.0;

/// Where the detail header starts on the first details page, below its heading
const DETAILS_TOP: f32 = MARGIN + 14.0;

const MAX_NAME_CHARS: usize = 35;
const MAX_PATH_CHARS: usize = 40;

const HEADER_FILL: (u8, u8, u8) = (68, 114, 196);
const TOTAL_FILL: (u8, u8, u8) = (200, 200, 200);

/// Points to millimetres
const PT_TO_MM: f32 = 0.3528;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
}

struct Column {
    title: &'static str,
    width: f32,
    align: Align,
}

const COUNT_COLUMNS: [Column; 2] = [
    Column { title: "Object Type", width: 80.0, align: Align::Left },
    Column { title: "Count", width: 40.0, align: Align::Center },
];

const DETAIL_COLUMNS: [Column; 4] = [
    Column { title: "Type", width: 35.0, align: Align::Left },
    Column { title: "ID", width: 20.0, align: Align::Center },
    Column { title: "Name", width: 70.0, align: Align::Left },
    Column { title: "File", width: 65.0, align: Align::Left },
];

/// Shorten a name to fit its column, keeping the start.
pub fn truncate_name(name: &str) -> String {
    if name.chars().count() > MAX_NAME_CHARS {
        let head: String = name.chars().take(MAX_NAME_CHARS - 3).collect();
        format!("{head}...")
    } else {
        name.to_string()
    }
}

/// Shorten a file path to fit its column, keeping the end.
pub fn truncate_path(path: &str) -> String {
    let len = path.chars().count();
    if len > MAX_PATH_CHARS {
        let tail: String = path.chars().skip(len - (MAX_PATH_CHARS - 3)).collect();
        format!("...{tail}")
    } else {
        path.to_string()
    }
}

/// Number of detail rows placed on each details page.
///
/// A new page is started once the next row would begin below the break line.
pub fn detail_pages(rows: usize) -> Vec<usize> {
    let mut pages = Vec::new();
    let mut y = DETAILS_TOP + DETAIL_HEADER_HEIGHT;
    let mut on_page = 0;

    for _ in 0..rows {
        if y > PAGE_BREAK_AT {
            pages.push(on_page);
            on_page = 0;
            y = MARGIN + DETAIL_HEADER_HEIGHT;
        }
        on_page += 1;
        y += DETAIL_ROW_HEIGHT;
    }

    if on_page > 0 || pages.is_empty() {
        pages.push(on_page);
    }
    pages
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(Rgb::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        None,
    ))
}

fn pdf_error(e: impl std::fmt::Display) -> BcobjError {
    BcobjError::Pdf(e.to_string())
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// How a table row is drawn
struct RowStyle<'a> {
    font: &'a IndirectFontRef,
    size: f32,
    height: f32,
    fill: Option<(u8, u8, u8)>,
    text: (u8, u8, u8),
}

/// Drawing position on the current page, measured from the top edge.
struct Page {
    layer: PdfLayerReference,
    y: f32,
}

impl Page {
    fn new(layer: PdfLayerReference) -> Self {
        layer.set_outline_thickness(0.2);
        Self { layer, y: MARGIN }
    }

    fn text(&mut self, text: &str, font: &IndirectFontRef, size: f32, advance: f32) {
        self.layer.set_fill_color(rgb((0, 0, 0)));
        self.layer.use_text(
            text,
            size,
            Mm(MARGIN),
            Mm(PAGE_HEIGHT - self.y - size * PT_TO_MM),
            font,
        );
        self.y += advance;
    }

    fn row(&mut self, columns: &[Column], cells: &[&str], style: &RowStyle) {
        let top = PAGE_HEIGHT - self.y;
        let bottom = top - style.height;
        let mut x = MARGIN;

        for (column, cell) in columns.iter().zip(cells) {
            let right = x + column.width;
            if let Some(fill) = style.fill {
                self.layer.set_fill_color(rgb(fill));
                self.layer.add_rect(Rect::new(Mm(x), Mm(bottom), Mm(right), Mm(top)));
            }
            self.layer.set_outline_color(rgb((0, 0, 0)));
            self.layer.add_rect(
                Rect::new(Mm(x), Mm(bottom), Mm(right), Mm(top)).with_mode(PaintMode::Stroke),
            );

            let text_width = cell.chars().count() as f32 * style.size * 0.5 * PT_TO_MM;
            let text_x = match column.align {
                Align::Left => x + 1.0,
                Align::Center => x + ((column.width - text_width) / 2.0).max(1.0),
            };
            let baseline = bottom + (style.height - style.size * PT_TO_MM) / 2.0 + 0.5;
            self.layer.set_fill_color(rgb(style.text));
            self.layer
                .use_text(*cell, style.size, Mm(text_x), Mm(baseline), style.font);

            x = right;
        }

        self.y += style.height;
    }
}

fn header_style(fonts: &Fonts, size: f32, height: f32) -> RowStyle<'_> {
    RowStyle {
        font: &fonts.bold,
        size,
        height,
        fill: Some(HEADER_FILL),
        text: (255, 255, 255),
    }
}

fn body_style(fonts: &Fonts, size: f32, height: f32, index: usize, shade: u8) -> RowStyle<'_> {
    RowStyle {
        font: &fonts.regular,
        size,
        height,
        fill: (index % 2 == 0).then_some((shade, shade, shade)),
        text: (0, 0, 0),
    }
}

fn detail_cells(obj: &Declaration) -> [String; 4] {
    [
        obj.kind.as_str().to_string(),
        obj.id.clone(),
        truncate_name(&obj.name),
        truncate_path(&obj.source_location.to_string_lossy()),
    ]
}

fn add_page(doc: &PdfDocumentReference) -> Page {
    let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    Page::new(doc.get_page(page).get_layer(layer))
}

/// Render a summary as a PDF document in memory.
pub fn to_pdf_bytes(summary: &Summary) -> Result<Vec<u8>> {
    let (doc, page, layer) =
        PdfDocument::new(SUMMARY_TITLE, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let fonts = Fonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?,
        bold: doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?,
    };

    let mut current = Page::new(doc.get_page(page).get_layer(layer));
    current.text("Business Central Objects Summary", &fonts.bold, 18.0, 16.0);
    current.row(
        &COUNT_COLUMNS,
        &[COUNT_COLUMNS[0].title, COUNT_COLUMNS[1].title],
        &header_style(&fonts, 11.0, 8.0),
    );
    for (i, c) in summary.counts_by_type.iter().enumerate() {
        let count = c.count.to_string();
        current.row(
            &COUNT_COLUMNS,
            &[c.kind.as_str(), count.as_str()],
            &body_style(&fonts, 10.0, 7.0, i, 240),
        );
    }
    let total = summary.total_objects.to_string();
    current.row(
        &COUNT_COLUMNS,
        &[TOTAL_LABEL, total.as_str()],
        &RowStyle {
            font: &fonts.bold,
            size: 10.0,
            height: 8.0,
            fill: Some(TOTAL_FILL),
            text: (0, 0, 0),
        },
    );

    let detail_header: Vec<&str> = DETAIL_COLUMNS.iter().map(|c| c.title).collect();
    let mut objects = summary.objects.iter().enumerate();

    for (page_index, rows) in detail_pages(summary.objects.len()).into_iter().enumerate() {
        current = add_page(&doc);
        if page_index == 0 {
            current.text("Object Details", &fonts.bold, 14.0, DETAILS_TOP - MARGIN);
        }
        current.row(
            &DETAIL_COLUMNS,
            &detail_header,
            &header_style(&fonts, 9.0, DETAIL_HEADER_HEIGHT),
        );

        for (i, obj) in objects.by_ref().take(rows) {
            let cells = detail_cells(obj);
            let cells: Vec<&str> = cells.iter().map(String::as_str).collect();
            current.row(
                &DETAIL_COLUMNS,
                &cells,
                &body_style(&fonts, 8.0, DETAIL_ROW_HEIGHT, i, 245),
            );
        }
    }

    doc.save_to_bytes().map_err(pdf_error)
}

/// Write a summary to `path` as a PDF document.
pub fn write_pdf(summary: &Summary, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let data = to_pdf_bytes(summary)?;
    fs::write(path, data).map_err(|e| BcobjError::Export {
        path: path.to_path_buf(),
        source: e,
    })
}
