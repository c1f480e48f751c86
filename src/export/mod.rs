//! Exports du récapitulatif : trame Excel, document Word, PDF.
//!
//! Les trois exporteurs consomment un [`ReportPayload`](crate::payload::ReportPayload)
//! en lecture seule et produisent des octets. Les libellés et le formatage
//! des indicateurs sont partagés ici pour que Word et PDF affichent
//! exactement les mêmes valeurs.

pub mod docx;
pub mod pdf;
pub mod template;

use crate::format::{fmt_eur, fmt_hours, fmt_pct};
use crate::payload::YearBlock;

/// Titre commun aux documents exportés.
pub const REPORT_TITLE: &str = "Récapitulatif — Rapprochement CA / Achats / Heures (Bâtiment)";

/// Section « Paramètres » d'un exercice.
pub fn parameter_lines(block: &YearBlock) -> Vec<(String, String)> {
    vec![
        (
            "Taux horaire".to_string(),
            format!("{:.2} €/h", block.hourly_rate),
        ),
        (
            "Coef refacturation achats".to_string(),
            format!("{:.2}", block.purchase_markup),
        ),
    ]
}

/// Section « Données & résultats » d'un exercice : les onze indicateurs.
pub fn result_lines(block: &YearBlock) -> Vec<(String, String)> {
    let res = &block.result;
    [
        ("Chiffre d'affaires (réel)", fmt_eur(block.revenue)),
        ("Achats", fmt_eur(block.purchases)),
        ("Marge (CA - Achats)", fmt_eur(res.margin)),
        ("Taux de marge", fmt_pct(res.margin_rate)),
        ("Heures totales", fmt_hours(res.total_hours)),
        ("Heures facturables", fmt_hours(res.total_billable_hours)),
        ("CA théorique achats", fmt_eur(res.theoretical_from_purchases)),
        ("CA théorique heures", fmt_eur(res.theoretical_from_hours)),
        ("CA théorique total", fmt_eur(res.theoretical_total)),
        ("Écart (réel - théorique)", fmt_eur(res.variance)),
        ("Écart (%)", fmt_pct(res.variance_rate)),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}
