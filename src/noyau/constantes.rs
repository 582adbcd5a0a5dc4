// src/noyau/constantes.rs
//
// Table des constantes nommées : immuable, partagée par tout le processus,
// initialisée une seule fois. Clés en minuscules, recherche insensible à la casse.
// Espace de noms disjoint de celui des fonctions (vérifié en test).

use std::collections::HashMap;
use std::f64::consts;
use std::sync::OnceLock;

static CONSTANTES: OnceLock<HashMap<&'static str, f64>> = OnceLock::new();

fn table() -> &'static HashMap<&'static str, f64> {
    CONSTANTES.get_or_init(|| HashMap::from([("pi", consts::PI), ("e", consts::E)]))
}

pub fn constante(nom: &str) -> Option<f64> {
    table().get(nom.to_ascii_lowercase().as_str()).copied()
}

/// Noms connus (affichage / tests).
pub fn noms() -> impl Iterator<Item = &'static str> {
    table().keys().copied()
}
