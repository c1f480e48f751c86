//! Génération du récapitulatif Word (.docx).
//!
//! Par exercice inclus : un tableau clé/valeur « Paramètres », un tableau
//! « Données & résultats » (onze indicateurs) et le détail des heures par
//! personne sur quatre colonnes. Saut de page entre N et N-1.

use std::io::Cursor;
use std::path::Path;

use docx_rs::{
    AlignmentType, BreakType, Docx, Paragraph, Run, Table, TableCell, TableRow,
};

use crate::error::{RecapError, Result};
use crate::export::{parameter_lines, result_lines, REPORT_TITLE};
use crate::hours::HoursTable;
use crate::payload::{ReportPayload, YearBlock};

/// Génère le document Word en mémoire.
pub fn generate_docx(payload: &ReportPayload) -> Result<Vec<u8>> {
    let mut doc = Docx::new()
        .add_paragraph(
            Paragraph::new()
                .align(AlignmentType::Center)
                .add_run(Run::new().add_text(REPORT_TITLE).bold().size(28)),
        )
        .add_paragraph(
            Paragraph::new()
                .align(AlignmentType::Center)
                .add_run(Run::new().add_text(format!("Date : {}", payload.date))),
        )
        .add_paragraph(Paragraph::new());

    doc = append_year_section(doc, "N", &payload.year_n);
    if payload.include_prior {
        if let Some(prior) = payload.year_prior.as_ref() {
            doc = doc.add_paragraph(
                Paragraph::new().add_run(Run::new().add_break(BreakType::Page)),
            );
            doc = append_year_section(doc, "N-1", prior);
        }
    }

    let mut cursor = Cursor::new(Vec::new());
    doc.build()
        .pack(&mut cursor)
        .map_err(|e| RecapError::DocxGeneration(format!("{e:?}")))?;
    Ok(cursor.into_inner())
}

/// Écrit le récapitulatif Word dans un fichier.
pub fn write_docx(payload: &ReportPayload, output_path: &Path) -> Result<()> {
    let bytes = generate_docx(payload)?;
    std::fs::write(output_path, bytes)?;
    Ok(())
}

fn heading(text: &str, half_points: usize) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text).bold().size(half_points))
}

fn text_cell(text: &str) -> TableCell {
    TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text(text)))
}

fn header_cell(text: &str) -> TableCell {
    TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text(text).bold()))
}

fn kv_table(lines: &[(String, String)]) -> Table {
    let mut rows = vec![TableRow::new(vec![
        header_cell("Indicateur"),
        header_cell("Valeur"),
    ])];
    for (key, value) in lines {
        rows.push(TableRow::new(vec![text_cell(key), text_cell(value)]));
    }
    Table::new(rows)
}

fn hours_table(detail: &HoursTable) -> Table {
    let mut rows = vec![TableRow::new(vec![
        header_cell("Personne"),
        header_cell("Heures"),
        header_cell("Coef production"),
        header_cell("Heures facturables"),
    ])];
    for row in &detail.rows {
        rows.push(TableRow::new(vec![
            text_cell(&row.person),
            text_cell(&format!("{:.2}", row.hours)),
            text_cell(&format!("{:.2}", row.production_coefficient)),
            text_cell(&format!("{:.2}", row.billable_hours)),
        ]));
    }
    Table::new(rows)
}

fn append_year_section(doc: Docx, label: &str, block: &YearBlock) -> Docx {
    doc.add_paragraph(heading(&format!("Année {}", label), 26))
        .add_paragraph(heading("Paramètres", 22))
        .add_table(kv_table(&parameter_lines(block)))
        .add_paragraph(heading("Données & résultats", 22))
        .add_table(kv_table(&result_lines(block)))
        .add_paragraph(heading("Détail heures par personne", 22))
        .add_table(hours_table(&block.result.hours_detail))
}
