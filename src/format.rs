//! Formatage des valeurs pour l'affichage et les exports.

use num_format::{Locale, ToFormattedString};

/// Montant en euros, arrondi à l'unité, séparateur de milliers en espace.
///
/// `300000.0` → `"300 000 €"`.
pub fn fmt_eur(x: f64) -> String {
    let rounded = x.round() as i64;
    let grouped = rounded.to_formatted_string(&Locale::en).replace(',', " ");
    format!("{} €", grouped)
}

/// Taux en pourcentage avec une décimale : `0.5` → `"50.0 %"`.
pub fn fmt_pct(x: f64) -> String {
    format!("{:.1} %", x * 100.0)
}

/// Heures avec deux décimales : `211.4` → `"211.40 h"`.
pub fn fmt_hours(x: f64) -> String {
    format!("{:.2} h", x)
}
