//! src/reglages.rs
//!
//! Réglages de lancement (ligne de commande) + constantes d’application.
//!
//! Sans `--expr` : interface graphique. Avec `--expr` : une seule évaluation,
//! réponse sur la sortie standard, puis sortie.

use clap::Parser;

/// Titre unique (natif + web).
pub const TITRE_APP: &str = "Calculatrice Stats";

/// Taille de fenêtre (natif).
pub const TAILLE_FENETRE: [f32; 2] = [520.0, 740.0];
pub const TAILLE_FENETRE_MIN: [f32; 2] = [420.0, 620.0];

/// Lecture arrondie par défaut (chiffres après la virgule).
pub const CHIFFRES_DEFAUT: usize = 10;

/// Garde-fou : au-delà, un f64 n’a plus de chiffres significatifs à montrer.
pub const CHIFFRES_MAX: usize = 17;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "calculatrice_stats",
    version,
    about = "Calculatrice flottante : opérateurs, constantes, statistiques"
)]
pub struct Reglages {
    /// Expression à évaluer (mode une-expression, sans interface)
    #[arg(short, long)]
    pub expr: Option<String>,

    /// Lecture arrondie à N chiffres après la virgule (défaut : forme exacte la plus courte)
    #[arg(short, long, value_name = "N")]
    pub chiffres: Option<usize>,

    /// Journalisation détaillée (DEBUG)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Reglages {
    /// Précision bornée à CHIFFRES_MAX.
    pub fn chiffres_bornes(&self) -> Option<usize> {
        self.chiffres.map(|n| n.min(CHIFFRES_MAX))
    }
}
