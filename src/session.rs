//! État de session explicite.
//!
//! La session possède les entrées des deux exercices et expose des mutations
//! par remplacement complet (scalaires, tables, copie N → N-1). Les calculs
//! relisent toujours une copie fraîchement normalisée, jamais un état
//! partiellement modifié.

use serde::{Deserialize, Serialize};

use crate::compute::{compute_year, YearInputs, YearResult};
use crate::export::template::ImportedHours;
use crate::hours::{sample_hours_n, sample_hours_prior, RawHoursTable};
use crate::payload::{build_payload, ReportPayload, YearBlock};

/// Exercice visé par une mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FiscalYear {
    N,
    Prior,
}

/// Session interactive : entrées N, entrées N-1 et activation du comparatif.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    year_n: YearInputs,
    year_prior: YearInputs,
    prior_enabled: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Session initiale avec les données d'exemple.
    pub fn new() -> Self {
        Self {
            year_n: YearInputs {
                revenue: 300000.0,
                purchases: 150000.0,
                hourly_rate: 55.0,
                purchase_markup: 1.15,
                hours: sample_hours_n(),
            },
            year_prior: YearInputs {
                revenue: 280000.0,
                purchases: 140000.0,
                hourly_rate: 52.0,
                purchase_markup: 1.12,
                hours: sample_hours_prior(),
            },
            prior_enabled: false,
        }
    }

    pub fn year(&self, year: FiscalYear) -> &YearInputs {
        match year {
            FiscalYear::N => &self.year_n,
            FiscalYear::Prior => &self.year_prior,
        }
    }

    fn year_mut(&mut self, year: FiscalYear) -> &mut YearInputs {
        match year {
            FiscalYear::N => &mut self.year_n,
            FiscalYear::Prior => &mut self.year_prior,
        }
    }

    pub fn prior_enabled(&self) -> bool {
        self.prior_enabled
    }

    pub fn set_prior_enabled(&mut self, enabled: bool) {
        self.prior_enabled = enabled;
    }

    // --- Mutations scalaires (remplacement simple) ---

    pub fn set_revenue(&mut self, year: FiscalYear, value: f64) {
        self.year_mut(year).revenue = value;
    }

    pub fn set_purchases(&mut self, year: FiscalYear, value: f64) {
        self.year_mut(year).purchases = value;
    }

    pub fn set_hourly_rate(&mut self, year: FiscalYear, value: f64) {
        self.year_mut(year).hourly_rate = value;
    }

    pub fn set_purchase_markup(&mut self, year: FiscalYear, value: f64) {
        self.year_mut(year).purchase_markup = value;
    }

    // --- Mutations de table (remplacement complet, jamais de fusion) ---

    pub fn replace_hours(&mut self, year: FiscalYear, table: RawHoursTable) {
        self.year_mut(year).hours = table;
    }

    /// Copie le tableau N vers N-1 : une seule affectation d'une copie
    /// profonde, remplacement atomique.
    pub fn copy_hours_to_prior(&mut self) {
        self.year_prior.hours = self.year_n.hours.clone();
    }

    /// Applique un import réussi : remplace N, et N-1 si l'onglet était
    /// présent. À n'appeler qu'avec un résultat d'import valide — un import
    /// en échec ne passe jamais par ici, la session reste donc intacte.
    pub fn apply_import(&mut self, imported: ImportedHours) {
        self.year_n.hours = imported.year_n;
        if let Some(prior) = imported.year_prior {
            self.year_prior.hours = prior;
        }
    }

    // --- Calculs ---

    pub fn compute_n(&self) -> YearResult {
        compute_year(&self.year_n)
    }

    /// Résultat N-1, `None` quand le comparatif est désactivé.
    pub fn compute_prior(&self) -> Option<YearResult> {
        self.prior_enabled.then(|| compute_year(&self.year_prior))
    }

    /// Payload d'export daté du jour.
    pub fn build_payload(&self) -> ReportPayload {
        let year_n = YearBlock::new(&self.year_n, self.compute_n());
        let year_prior = self
            .compute_prior()
            .map(|res| YearBlock::new(&self.year_prior, res));
        build_payload(self.prior_enabled, year_n, year_prior)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hours::RawHoursRow;

    #[test]
    fn test_new_session_has_sample_data() {
        let session = Session::new();
        assert_eq!(session.year(FiscalYear::N).revenue, 300000.0);
        assert_eq!(session.year(FiscalYear::N).hours.len(), 2);
        assert!(!session.prior_enabled());
    }

    #[test]
    fn test_scalar_replacement() {
        let mut session = Session::new();
        session.set_revenue(FiscalYear::N, 123456.0);
        session.set_hourly_rate(FiscalYear::Prior, 48.0);
        assert_eq!(session.year(FiscalYear::N).revenue, 123456.0);
        assert_eq!(session.year(FiscalYear::Prior).hourly_rate, 48.0);
    }

    #[test]
    fn test_replace_hours_is_full_replace() {
        let mut session = Session::new();
        session.replace_hours(FiscalYear::N, vec![RawHoursRow::new("Seul", 10.0, 1.0)]);
        assert_eq!(session.year(FiscalYear::N).hours.len(), 1);
    }

    #[test]
    fn test_copy_hours_to_prior() {
        let mut session = Session::new();
        session.replace_hours(
            FiscalYear::N,
            vec![
                RawHoursRow::new("Ouvrier 1", 100.0, 0.9),
                RawHoursRow::new("Ouvrier 2", 80.0, 0.8),
            ],
        );
        session.copy_hours_to_prior();
        let prior = &session.year(FiscalYear::Prior).hours;
        assert_eq!(prior.len(), 2);
        assert_eq!(crate::value::coerce_text(&prior[0].person), "Ouvrier 1");
        // les tables restent indépendantes après la copie
        session.replace_hours(FiscalYear::N, vec![]);
        assert_eq!(session.year(FiscalYear::Prior).hours.len(), 2);
    }

    #[test]
    fn test_compute_prior_none_when_disabled() {
        let session = Session::new();
        assert!(session.compute_prior().is_none());
    }

    #[test]
    fn test_payload_without_prior() {
        let session = Session::new();
        let payload = session.build_payload();
        assert!(!payload.include_prior);
        assert!(payload.year_prior.is_none());
        assert_eq!(payload.year_n.revenue, 300000.0);
    }

    #[test]
    fn test_payload_with_prior_enabled() {
        let mut session = Session::new();
        session.set_prior_enabled(true);
        let payload = session.build_payload();
        assert!(payload.include_prior);
        let prior = payload.year_prior.expect("bloc N-1 attendu");
        assert_eq!(prior.revenue, 280000.0);
    }

    #[test]
    fn test_apply_import_replaces_tables() {
        let mut session = Session::new();
        session.apply_import(ImportedHours {
            year_n: vec![RawHoursRow::new("Import 1", 12.0, 1.0)],
            year_prior: None,
        });
        assert_eq!(session.year(FiscalYear::N).hours.len(), 1);
        // onglet N-1 absent : la table N-1 existante est conservée
        assert_eq!(session.year(FiscalYear::Prior).hours.len(), 2);
    }
}
