//! Calcul annuel : marge, CA théorique et écart pour un exercice.

use serde::{Deserialize, Serialize};

use crate::hours::{normalize, HoursTable, RawHoursTable};
use crate::value::sanitize_scalar;

/// Entrées d'un exercice : quatre scalaires plus la table des heures brute.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct YearInputs {
    /// Chiffre d'affaires réel (CA).
    pub revenue: f64,
    /// Total des achats.
    pub purchases: f64,
    /// Taux horaire facturé (€/h).
    pub hourly_rate: f64,
    /// Coefficient de refacturation des achats.
    pub purchase_markup: f64,
    /// Heures par personne, telles que saisies ou importées.
    pub hours: RawHoursTable,
}

/// Résultats dérivés d'un exercice, figés une fois calculés.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearResult {
    pub margin: f64,
    pub margin_rate: f64,
    pub total_hours: f64,
    pub total_billable_hours: f64,
    pub theoretical_from_purchases: f64,
    pub theoretical_from_hours: f64,
    pub theoretical_total: f64,
    pub variance: f64,
    pub variance_rate: f64,
    /// Table normalisée conservée pour l'affichage du détail.
    pub hours_detail: HoursTable,
}

/// Division protégée : 0.0 quand le dénominateur est nul.
fn safe_div(a: f64, b: f64) -> f64 {
    if b != 0.0 {
        a / b
    } else {
        0.0
    }
}

/// Calcule tous les indicateurs d'un exercice.
///
/// Fonction pure, un seul passage sur la table des heures. Les taux dont le
/// dénominateur est le CA valent 0.0 quand le CA est nul — jamais une
/// erreur, jamais un infini.
pub fn compute_year(inputs: &YearInputs) -> YearResult {
    let revenue = sanitize_scalar(inputs.revenue);
    let purchases = sanitize_scalar(inputs.purchases);
    let hourly_rate = sanitize_scalar(inputs.hourly_rate);
    let purchase_markup = sanitize_scalar(inputs.purchase_markup);

    let margin = revenue - purchases;
    let margin_rate = safe_div(margin, revenue);

    let hours_detail = normalize(&inputs.hours);
    let total_hours = hours_detail.total_hours();
    let total_billable_hours = hours_detail.total_billable_hours();

    let theoretical_from_purchases = purchases * purchase_markup;
    let theoretical_from_hours = total_billable_hours * hourly_rate;
    let theoretical_total = theoretical_from_purchases + theoretical_from_hours;

    let variance = revenue - theoretical_total;
    let variance_rate = safe_div(variance, revenue);

    YearResult {
        margin,
        margin_rate,
        total_hours,
        total_billable_hours,
        theoretical_from_purchases,
        theoretical_from_hours,
        theoretical_total,
        variance,
        variance_rate,
        hours_detail,
    }
}
