//! Table des heures par personne et sa normalisation.
//!
//! Une table brute (`RawHoursTable`) vient de la saisie ou d'un import Excel
//! et peut contenir n'importe quoi. `normalize` garantit une table typée à
//! quatre colonnes dans un ordre fixe : personne, heures, coef de production,
//! heures facturables.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::value::{coerce_number, coerce_text};

pub const COL_PERSON: &str = "Personne";
pub const COL_HOURS: &str = "Heures";
pub const COL_COEF: &str = "Coef_production";
pub const COL_BILLABLE: &str = "Heures_facturables";

/// Colonnes exigées dans la trame Excel (onglets N et N-1).
pub const REQUIRED_COLUMNS: [&str; 3] = [COL_PERSON, COL_HOURS, COL_COEF];

/// Ligne brute, champs de type non fiable (absent = `Null`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawHoursRow {
    pub person: Value,
    pub hours: Value,
    pub production_coefficient: Value,
}

impl RawHoursRow {
    pub fn new(person: impl Into<String>, hours: f64, production_coefficient: f64) -> Self {
        Self {
            person: Value::String(person.into()),
            hours: Value::from(hours),
            production_coefficient: Value::from(production_coefficient),
        }
    }
}

pub type RawHoursTable = Vec<RawHoursRow>;

/// Ligne normalisée. `billable_hours` est toujours recalculé, jamais saisi.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkerHoursRow {
    pub person: String,
    pub hours: f64,
    pub production_coefficient: f64,
    pub billable_hours: f64,
}

/// Table normalisée, ordre d'insertion conservé (affichage uniquement).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HoursTable {
    pub rows: Vec<WorkerHoursRow>,
}

impl HoursTable {
    pub fn total_hours(&self) -> f64 {
        self.rows.iter().map(|r| r.hours).sum()
    }

    pub fn total_billable_hours(&self) -> f64 {
        self.rows.iter().map(|r| r.billable_hours).sum()
    }
}

/// Normalise une table brute.
///
/// Ne peut pas échouer : les valeurs non numériques deviennent 0.0, les noms
/// illisibles deviennent la chaîne vide. Une table vide donne une unique
/// ligne à zéro pour que les sommes restent définies.
pub fn normalize(raw: &RawHoursTable) -> HoursTable {
    if raw.is_empty() {
        return HoursTable {
            rows: vec![WorkerHoursRow::default()],
        };
    }

    let rows = raw
        .iter()
        .map(|r| {
            let hours = coerce_number(&r.hours, 0.0);
            let production_coefficient = coerce_number(&r.production_coefficient, 0.0);
            WorkerHoursRow {
                person: coerce_text(&r.person),
                hours,
                production_coefficient,
                billable_hours: hours * production_coefficient,
            }
        })
        .collect();

    HoursTable { rows }
}

/// Table d'exemple pour l'année N (état initial de session).
pub fn sample_hours_n() -> RawHoursTable {
    vec![
        RawHoursRow::new("Ouvrier 1", 140.0, 0.75),
        RawHoursRow::new("Ouvrier 2", 140.0, 0.70),
    ]
}

/// Table d'exemple pour l'année N-1 (état initial de session).
pub fn sample_hours_prior() -> RawHoursTable {
    vec![
        RawHoursRow::new("Ouvrier 1", 140.0, 0.70),
        RawHoursRow::new("Ouvrier 2", 140.0, 0.68),
    ]
}
