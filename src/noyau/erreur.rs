//! Erreurs du noyau.
//!
//! Deux niveaux :
//! - `ErreurExpression` : la première faute rencontrée (jetons, parenthèses, syntaxe,
//!   arguments, vecteur mal placé, arithmétique, jetons restants).
//! - `ErreurEvaluation` : ce que `evaluate` rend à l’appelant. Préfixe
//!   "expression invalide" + message d’origine intact (chaîne causale visible).
//!
//! Les erreurs de la bibliothèque numérique vivent dans `bibliotheque.rs` et sont
//! relayées telles quelles (via `#[from]`) sous `Arithmetique`.

use thiserror::Error;

use super::bibliotheque::ErreurBibliotheque;

/// Détail d’un déséquilibre de parenthèses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Desequilibre {
    #[error("parenthèse fermante sans ouvrante (jeton n°{position})")]
    FermanteOrpheline { position: usize },

    #[error("{nombre} parenthèse(s) ouvrante(s) non fermée(s)")]
    OuvranteNonFermee { nombre: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErreurExpression {
    #[error("jetons : {0}")]
    Jetons(String),

    #[error("parenthèses : {0}")]
    Parenthese(#[from] Desequilibre),

    #[error("syntaxe : {0}")]
    Syntaxe(String),

    #[error("arguments de {fonction} : attendu {attendu}, reçu {recu}")]
    Argument {
        fonction: String,
        attendu: String,
        recu: String,
    },

    #[error("fonction inconnue : {0}")]
    FonctionInconnue(String),

    #[error("vecteur mal placé : {0}")]
    VecteurMalPlace(String),

    #[error("arithmétique : {0}")]
    Arithmetique(#[from] ErreurBibliotheque),

    #[error("jetons restants après l’expression, à partir de « {0} »")]
    JetonsRestants(String),
}

/// Erreur publique de `evaluate`.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("expression invalide : {cause}")]
pub struct ErreurEvaluation {
    #[source]
    pub cause: ErreurExpression,
}

impl From<ErreurExpression> for ErreurEvaluation {
    fn from(cause: ErreurExpression) -> Self {
        Self { cause }
    }
}
