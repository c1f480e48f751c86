//! Assemblage du récapitulatif exportable.
//!
//! Le payload fige une date de génération et les entrées/résultats d'un ou
//! deux exercices. Aucun recalcul : les exporteurs le lisent tel quel.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::compute::{YearInputs, YearResult};

/// Entrées scalaires et résultats d'un exercice, côte à côte.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearBlock {
    pub revenue: f64,
    pub purchases: f64,
    pub hourly_rate: f64,
    pub purchase_markup: f64,
    pub result: YearResult,
}

impl YearBlock {
    pub fn new(inputs: &YearInputs, result: YearResult) -> Self {
        Self {
            revenue: inputs.revenue,
            purchases: inputs.purchases,
            hourly_rate: inputs.hourly_rate,
            purchase_markup: inputs.purchase_markup,
            result,
        }
    }
}

/// Instantané prêt à exporter, jamais modifié après construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportPayload {
    /// Date de génération au format jour/mois/année.
    pub date: String,
    pub year_n: YearBlock,
    pub year_prior: Option<YearBlock>,
    pub include_prior: bool,
}

/// Construit le payload daté du jour (calendrier local).
pub fn build_payload(
    include_prior: bool,
    year_n: YearBlock,
    year_prior: Option<YearBlock>,
) -> ReportPayload {
    build_payload_dated(Local::now().date_naive(), include_prior, year_n, year_prior)
}

/// Variante à date explicite.
///
/// Le drapeau N-1 n'est vrai que si l'appelant l'a demandé ET qu'un bloc
/// N-1 a bien été fourni ; sinon il retombe silencieusement à faux.
pub fn build_payload_dated(
    date: NaiveDate,
    include_prior: bool,
    year_n: YearBlock,
    year_prior: Option<YearBlock>,
) -> ReportPayload {
    let include_prior = include_prior && year_prior.is_some();
    ReportPayload {
        date: date.format("%d/%m/%Y").to_string(),
        year_n,
        year_prior: if include_prior { year_prior } else { None },
        include_prior,
    }
}
