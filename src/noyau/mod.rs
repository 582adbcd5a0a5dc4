//! Noyau flottant
//!
//! Organisation interne :
//! - jetons.rs       : tokenisation (tableaux littéraux = un jeton)
//! - parentheses.rs  : pré-contrôle d’équilibre
//! - parseur.rs      : descente récursive, évaluation fusionnée
//! - valeur.rs       : Scalaire / Vecteur
//! - constantes.rs   : pi, e (table immuable)
//! - fonctions.rs    : signatures + aiguillage
//! - bibliotheque.rs : primitives, statistiques, transformations
//! - erreur.rs       : taxonomie des erreurs
//! - format.rs       : lecture du résultat
//! - eval.rs         : pipeline complet

pub mod bibliotheque;
pub mod constantes;
pub mod erreur;
pub mod eval;
pub mod fonctions;
pub mod format;
pub mod jetons;
pub mod parentheses;
pub mod parseur;
pub mod valeur;

#[cfg(test)]
mod tests_proprietes;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use eval::{evaluate, evaluer_avec_demarche};
pub use format::format_resultat;
