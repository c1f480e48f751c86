//! Coercition permissive des valeurs brutes.
//!
//! Les cellules saisies ou importées sont de type peu fiable (texte, nombre,
//! vide). Toute la tolérance est concentrée ici : une valeur illisible
//! devient la valeur par défaut, jamais une erreur.

use serde_json::Value;

/// Convertit une valeur brute en nombre réel, `default` en cas d'échec.
///
/// - nombres : repris tels quels (sauf non finis) ;
/// - booléens : 1.0 / 0.0 ;
/// - textes : parsés après trim, virgule décimale acceptée ;
/// - tout le reste (vide, tableau, objet) : `default`.
pub fn coerce_number(value: &Value, default: f64) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(default),
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return default;
            }
            s.parse::<f64>()
                .or_else(|_| s.replace(',', ".").parse::<f64>())
                .ok()
                .filter(|v| v.is_finite())
                .unwrap_or(default)
        }
        _ => default,
    }
}

/// Convertit une valeur brute en texte, chaîne vide en cas d'échec.
pub fn coerce_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Garde-fou pour les scalaires déjà typés : NaN/infini dégradent en 0.0.
pub fn sanitize_scalar(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}
