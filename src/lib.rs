//! Rapprochement CA / Achats / Heures — Bâtiment
//!
//! Compare le chiffre d'affaires réel d'une petite entreprise du bâtiment à
//! un CA théorique reconstruit depuis les achats (coefficient de
//! refacturation) et les heures facturables (taux horaire), sur l'année N et
//! optionnellement N-1.
//!
//! Le cœur est un pipeline de transformations pures :
//! normalisation des heures ([`hours::normalize`]) → calcul annuel
//! ([`compute::compute_year`]) → assemblage du payload
//! ([`payload::build_payload`]). Autour : un état de session explicite
//! ([`session::Session`]) et les exports (trame Excel, récap Word, PDF).

pub mod compute;
pub mod error;
pub mod export;
pub mod format;
pub mod hours;
pub mod payload;
pub mod session;
pub mod value;

pub use compute::{compute_year, YearInputs, YearResult};
pub use error::{RecapError, Result};
pub use hours::{normalize, HoursTable, RawHoursRow, RawHoursTable, WorkerHoursRow};
pub use payload::{build_payload, build_payload_dated, ReportPayload, YearBlock};
pub use session::{FiscalYear, Session};
