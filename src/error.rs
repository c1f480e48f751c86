use thiserror::Error;

/// Erreurs du crate.
///
/// Seul l'import Excel a des conditions d'échec nommées ; la normalisation
/// des heures et le calcul annuel ne peuvent jamais échouer (les valeurs
/// malformées sont neutralisées en zéro/vide).
#[derive(Error, Debug)]
pub enum RecapError {
    #[error("L'onglet 'N' est obligatoire")]
    MissingRequiredSheet,

    #[error("Onglet '{sheet}' : colonnes manquantes: {}", .columns.join(", "))]
    MissingRequiredColumns { sheet: String, columns: Vec<String> },

    #[error("Erreur de lecture du classeur: {0}")]
    WorkbookRead(#[from] calamine::XlsxError),

    #[error("Erreur de génération Excel: {0}")]
    ExcelGeneration(String),

    #[error("Erreur de génération PDF: {0}")]
    PdfGeneration(String),

    #[error("Erreur de génération du document Word: {0}")]
    DocxGeneration(String),

    #[error("Erreur JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Erreur IO: {0}")]
    Io(#[from] std::io::Error),
}

/// Alias Result du crate.
pub type Result<T> = std::result::Result<T, RecapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sheet_display() {
        let error = RecapError::MissingRequiredSheet;
        assert_eq!(format!("{}", error), "L'onglet 'N' est obligatoire");
    }

    #[test]
    fn test_missing_columns_display_names_columns() {
        let error = RecapError::MissingRequiredColumns {
            sheet: "N".to_string(),
            columns: vec!["Coef_production".to_string(), "Heures".to_string()],
        };
        let display = format!("{}", error);
        assert!(display.contains("Onglet 'N'"));
        assert!(display.contains("Coef_production, Heures"));
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "fichier introuvable");
        let error: RecapError = io_error.into();
        assert!(matches!(error, RecapError::Io(_)));
        assert!(format!("{}", error).contains("fichier introuvable"));
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: RecapError = json_error.into();
        assert!(matches!(error, RecapError::Json(_)));
    }
}
