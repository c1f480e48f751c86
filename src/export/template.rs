//! Trame Excel : génération du modèle à deux onglets et import.
//!
//! Le modèle contient les onglets `N` et `N-1` avec l'en-tête
//! `Personne, Heures, Coef_production` et des lignes d'exemple. L'import
//! exige l'onglet `N`, accepte l'absence de `N-1`, ignore les colonnes en
//! trop et échoue en nommant les colonnes manquantes. Aucun import partiel :
//! on parse tout, puis l'appelant applique le résultat à la session.

use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Reader, Xlsx};
use rust_xlsxwriter::{Format, Workbook};
use serde_json::Value;

use crate::error::{RecapError, Result};
use crate::hours::{RawHoursRow, RawHoursTable, REQUIRED_COLUMNS};

pub const SHEET_N: &str = "N";
pub const SHEET_PRIOR: &str = "N-1";

/// Tables extraites d'un classeur importé. `year_prior` est absent quand
/// l'onglet `N-1` ne figure pas dans le fichier.
#[derive(Debug, Clone)]
pub struct ImportedHours {
    pub year_n: RawHoursTable,
    pub year_prior: Option<RawHoursTable>,
}

fn excel_err(e: rust_xlsxwriter::XlsxError) -> RecapError {
    RecapError::ExcelGeneration(e.to_string())
}

/// Génère la trame Excel en mémoire (onglets `N` et `N-1`).
pub fn template_workbook_bytes() -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    write_template_sheet(
        &mut workbook,
        SHEET_N,
        &[("Ouvrier 1", 140.0, 0.75), ("Ouvrier 2", 152.0, 0.70)],
        &header_format,
    )?;
    write_template_sheet(
        &mut workbook,
        SHEET_PRIOR,
        &[("Ouvrier 1", 138.0, 0.72), ("Ouvrier 2", 150.0, 0.68)],
        &header_format,
    )?;

    workbook.save_to_buffer().map_err(excel_err)
}

/// Écrit la trame dans un fichier.
pub fn write_template(path: &Path) -> Result<()> {
    let bytes = template_workbook_bytes()?;
    std::fs::write(path, bytes)?;
    Ok(())
}

fn write_template_sheet(
    workbook: &mut Workbook,
    name: &str,
    rows: &[(&str, f64, f64)],
    header_format: &Format,
) -> Result<()> {
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(name).map_err(excel_err)?;

    for (col, title) in REQUIRED_COLUMNS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *title, header_format)
            .map_err(excel_err)?;
    }
    for (i, (person, hours, coef)) in rows.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_string(row, 0, *person).map_err(excel_err)?;
        worksheet.write_number(row, 1, *hours).map_err(excel_err)?;
        worksheet.write_number(row, 2, *coef).map_err(excel_err)?;
    }

    worksheet.set_column_width(0, 18).map_err(excel_err)?;
    worksheet.set_column_width(1, 10).map_err(excel_err)?;
    worksheet.set_column_width(2, 16).map_err(excel_err)?;
    Ok(())
}

/// Importe un classeur depuis un fichier.
pub fn read_hours_workbook(path: &Path) -> Result<ImportedHours> {
    let bytes = std::fs::read(path)?;
    read_hours_workbook_bytes(&bytes)
}

/// Importe un classeur depuis des octets (fichier téléversé).
///
/// Onglet `N` obligatoire, `N-1` optionnel. Échoue sans rien retourner si
/// l'onglet `N` manque ou si des colonnes requises manquent.
pub fn read_hours_workbook_bytes(bytes: &[u8]) -> Result<ImportedHours> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;

    let year_n = read_sheet(&mut workbook, SHEET_N)?.ok_or(RecapError::MissingRequiredSheet)?;
    let year_prior = read_sheet(&mut workbook, SHEET_PRIOR)?;

    Ok(ImportedHours { year_n, year_prior })
}

/// Lit un onglet ; `None` s'il n'existe pas dans le classeur.
fn read_sheet(
    workbook: &mut Xlsx<Cursor<&[u8]>>,
    sheet: &str,
) -> Result<Option<RawHoursTable>> {
    if !workbook.sheet_names().iter().any(|s| s == sheet) {
        return Ok(None);
    }
    let range = workbook.worksheet_range(sheet)?;
    let mut rows = range.rows();

    // correspondance exacte des noms de colonnes, espaces rognés
    let header = rows.next().unwrap_or(&[]);
    let mut indexes: [Option<usize>; REQUIRED_COLUMNS.len()] = [None; REQUIRED_COLUMNS.len()];
    for (col, cell) in header.iter().enumerate() {
        let name = header_text(cell);
        let name = name.trim();
        for (slot, required) in REQUIRED_COLUMNS.iter().enumerate() {
            if name == *required && indexes[slot].is_none() {
                indexes[slot] = Some(col);
            }
        }
    }

    let mut missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .zip(indexes.iter())
        .filter(|(_, idx)| idx.is_none())
        .map(|(name, _)| name.to_string())
        .collect();
    if !missing.is_empty() {
        missing.sort();
        return Err(RecapError::MissingRequiredColumns {
            sheet: sheet.to_string(),
            columns: missing,
        });
    }

    let (person_col, hours_col, coef_col) = (
        indexes[0].unwrap_or(0),
        indexes[1].unwrap_or(0),
        indexes[2].unwrap_or(0),
    );
    let table = rows
        .map(|row| RawHoursRow {
            person: cell_value(row.get(person_col)),
            hours: cell_value(row.get(hours_col)),
            production_coefficient: cell_value(row.get(coef_col)),
        })
        .collect();

    Ok(Some(table))
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Cellule Excel → valeur brute ; la coercition numérique vient ensuite.
fn cell_value(cell: Option<&Data>) -> Value {
    match cell {
        Some(Data::String(s)) => Value::String(s.clone()),
        Some(Data::Float(f)) => Value::from(*f),
        Some(Data::Int(i)) => Value::from(*i),
        Some(Data::Bool(b)) => Value::Bool(*b),
        Some(Data::DateTime(dt)) => Value::from(dt.as_f64()),
        Some(Data::DateTimeIso(s)) | Some(Data::DurationIso(s)) => Value::String(s.clone()),
        _ => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hours::normalize;

    #[test]
    fn test_template_round_trips_through_import() {
        let bytes = template_workbook_bytes().expect("génération de la trame");
        let imported = read_hours_workbook_bytes(&bytes).expect("import de la trame");

        let table_n = normalize(&imported.year_n);
        assert_eq!(table_n.rows.len(), 2);
        assert_eq!(table_n.rows[0].person, "Ouvrier 1");
        assert_eq!(table_n.rows[0].hours, 140.0);
        assert_eq!(table_n.rows[0].production_coefficient, 0.75);
        assert_eq!(table_n.rows[1].hours, 152.0);

        let prior = imported.year_prior.expect("onglet N-1 attendu dans la trame");
        let table_prior = normalize(&prior);
        assert_eq!(table_prior.rows[0].hours, 138.0);
        assert_eq!(table_prior.rows[1].production_coefficient, 0.68);
    }

    #[test]
    fn test_missing_sheet_n_is_an_error() {
        // classeur avec seulement un onglet N-1
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();
        write_template_sheet(
            &mut workbook,
            SHEET_PRIOR,
            &[("Ouvrier 1", 10.0, 1.0)],
            &header_format,
        )
        .unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let err = read_hours_workbook_bytes(&bytes).unwrap_err();
        assert!(matches!(err, RecapError::MissingRequiredSheet));
    }

    #[test]
    fn test_missing_column_names_the_column() {
        // onglet N sans colonne Coef_production
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_N).unwrap();
        worksheet.write_string(0, 0, "Personne").unwrap();
        worksheet.write_string(0, 1, "Heures").unwrap();
        worksheet.write_string(1, 0, "Ouvrier 1").unwrap();
        worksheet.write_number(1, 1, 140.0).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let err = read_hours_workbook_bytes(&bytes).unwrap_err();
        match err {
            RecapError::MissingRequiredColumns { sheet, columns } => {
                assert_eq!(sheet, "N");
                assert_eq!(columns, vec!["Coef_production".to_string()]);
            }
            other => panic!("erreur inattendue: {other:?}"),
        }
        assert!(format!(
            "{}",
            read_hours_workbook_bytes(&bytes).unwrap_err()
        )
        .contains("Coef_production"));
    }

    #[test]
    fn test_extra_columns_ignored_and_headers_trimmed() {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_N).unwrap();
        worksheet.write_string(0, 0, "Commentaire").unwrap();
        worksheet.write_string(0, 1, " Personne ").unwrap();
        worksheet.write_string(0, 2, "Heures").unwrap();
        worksheet.write_string(0, 3, "Coef_production ").unwrap();
        worksheet.write_string(1, 0, "sans objet").unwrap();
        worksheet.write_string(1, 1, "Ouvrier 1").unwrap();
        worksheet.write_number(1, 2, 140.0).unwrap();
        worksheet.write_number(1, 3, 0.75).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let imported = read_hours_workbook_bytes(&bytes).expect("import");
        assert!(imported.year_prior.is_none());
        let table = normalize(&imported.year_n);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].person, "Ouvrier 1");
        assert_eq!(table.rows[0].billable_hours, 105.0);
    }

    #[test]
    fn test_malformed_cells_pass_through_to_normalizer() {
        // du texte dans la colonne Heures : l'import n'échoue pas,
        // la normalisation neutralisera la valeur
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_N).unwrap();
        for (col, title) in REQUIRED_COLUMNS.iter().enumerate() {
            worksheet.write_string(0, col as u16, *title).unwrap();
        }
        worksheet.write_string(1, 0, "Ouvrier 1").unwrap();
        worksheet.write_string(1, 1, "quarante").unwrap();
        worksheet.write_number(1, 2, 0.75).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let imported = read_hours_workbook_bytes(&bytes).expect("import");
        let table = normalize(&imported.year_n);
        assert_eq!(table.rows[0].hours, 0.0);
        assert_eq!(table.rows[0].billable_hours, 0.0);
    }
}
