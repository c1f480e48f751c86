//! Génération du récapitulatif PDF.
//!
//! Page de garde avec titre et date, puis une page par exercice : paramètres
//! et résultats en clé/valeur à positions fixes, détail des heures en
//! tableau. Le tableau déborde sur des pages de suite après 28 lignes.

use std::path::Path;

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference};

use crate::error::{RecapError, Result};
use crate::export::{parameter_lines, result_lines, REPORT_TITLE};
use crate::payload::{ReportPayload, YearBlock};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
/// Décalage de la colonne valeur dans les sections clé/valeur.
const KEY_COLUMN_MM: f32 = 70.0;
const LINE_STEP_MM: f32 = 5.0;
const TOP_Y_MM: f32 = PAGE_HEIGHT_MM - 23.0;

/// Lignes du tableau des heures par page avant débordement.
pub const TABLE_ROWS_PER_PAGE: usize = 28;

/// Génère le PDF en mémoire.
pub fn generate_pdf(payload: &ReportPayload) -> Result<Vec<u8>> {
    let (doc, cover_page, cover_layer) = PdfDocument::new(
        REPORT_TITLE,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RecapError::PdfGeneration(format!("ajout de police: {e:?}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| RecapError::PdfGeneration(format!("ajout de police: {e:?}")))?;

    // page de garde
    let layer = doc.get_page(cover_page).get_layer(cover_layer);
    layer.use_text(
        REPORT_TITLE,
        15.0,
        Mm(MARGIN_MM),
        Mm(PAGE_HEIGHT_MM - 30.0),
        &bold,
    );
    layer.use_text(
        format!("Date : {}", payload.date),
        11.0,
        Mm(MARGIN_MM),
        Mm(PAGE_HEIGHT_MM - 40.0),
        &font,
    );
    layer.use_text(
        "Ce document présente un comparatif entre CA réel et CA théorique \
         (achats refacturés + heures facturées).",
        10.0,
        Mm(MARGIN_MM),
        Mm(PAGE_HEIGHT_MM - 60.0),
        &font,
    );

    year_pages(&doc, "N", &payload.year_n, &font, &bold);
    if payload.include_prior {
        if let Some(prior) = payload.year_prior.as_ref() {
            year_pages(&doc, "N-1", prior, &font, &bold);
        }
    }

    doc.save_to_bytes()
        .map_err(|e| RecapError::PdfGeneration(format!("{e:?}")))
}

/// Écrit le récapitulatif PDF dans un fichier.
pub fn write_pdf(payload: &ReportPayload, output_path: &Path) -> Result<()> {
    let bytes = generate_pdf(payload)?;
    std::fs::write(output_path, bytes)?;
    Ok(())
}

fn year_pages(
    doc: &PdfDocumentReference,
    label: &str,
    block: &YearBlock,
    font: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    let (page, layer_index) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
    let mut layer = doc.get_page(page).get_layer(layer_index);
    let x = MARGIN_MM;
    let mut y = TOP_Y_MM;

    layer.use_text(format!("Année {}", label), 14.0, Mm(x), Mm(y), bold);
    y -= 9.0;

    layer.use_text("Paramètres", 12.0, Mm(x), Mm(y), bold);
    y -= 6.0;
    for (key, value) in parameter_lines(block) {
        draw_kv(&layer, x, y, &key, &value, font, bold);
        y -= LINE_STEP_MM;
    }
    y -= 3.0;

    layer.use_text("Données & résultats", 12.0, Mm(x), Mm(y), bold);
    y -= 6.0;
    for (key, value) in result_lines(block) {
        draw_kv(&layer, x, y, &key, &value, font, bold);
        y -= LINE_STEP_MM;
    }
    y -= 2.0;

    layer.use_text("Détail heures par personne", 12.0, Mm(x), Mm(y), bold);
    y -= 7.0;
    draw_hours_header(&layer, x, y, bold);
    y -= 6.0;

    let mut rows_on_page = 0usize;
    for row in &block.result.hours_detail.rows {
        if rows_on_page >= TABLE_ROWS_PER_PAGE {
            // page de suite
            let (next_page, next_layer) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            layer = doc.get_page(next_page).get_layer(next_layer);
            y = TOP_Y_MM;
            layer.use_text(
                format!("Année {} — Détail heures (suite)", label),
                12.0,
                Mm(x),
                Mm(y),
                bold,
            );
            y -= 9.0;
            draw_hours_header(&layer, x, y, bold);
            y -= 6.0;
            rows_on_page = 0;
        }

        let person: String = row.person.chars().take(45).collect();
        layer.use_text(person, 9.0, Mm(x), Mm(y), font);
        layer.use_text(format!("{:.2}", row.hours), 9.0, Mm(x + 85.0), Mm(y), font);
        layer.use_text(
            format!("{:.2}", row.production_coefficient),
            9.0,
            Mm(x + 110.0),
            Mm(y),
            font,
        );
        layer.use_text(
            format!("{:.2}", row.billable_hours),
            9.0,
            Mm(x + 130.0),
            Mm(y),
            font,
        );
        y -= 4.5;
        rows_on_page += 1;
    }
}

fn draw_kv(
    layer: &printpdf::PdfLayerReference,
    x: f32,
    y: f32,
    key: &str,
    value: &str,
    font: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    layer.use_text(key, 10.0, Mm(x), Mm(y), font);
    layer.use_text(value, 10.0, Mm(x + KEY_COLUMN_MM), Mm(y), bold);
}

fn draw_hours_header(layer: &printpdf::PdfLayerReference, x: f32, y: f32, bold: &IndirectFontRef) {
    layer.use_text("Personne", 10.0, Mm(x), Mm(y), bold);
    layer.use_text("Heures", 10.0, Mm(x + 85.0), Mm(y), bold);
    layer.use_text("Coef", 10.0, Mm(x + 110.0), Mm(y), bold);
    layer.use_text("Heures fact.", 10.0, Mm(x + 130.0), Mm(y), bold);
}
