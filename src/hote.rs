//! src/hote.rs
//!
//! Couche requête/réponse autour du noyau.
//!
//! Contrat :
//! - une chaîne entre, une réponse texte sort (nombre formaté OU message d’erreur complet),
//! - aucune erreur du noyau ne remonte au-delà : tout est rendu dans `Reponse`.

use crate::noyau::{evaluate, format_resultat};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reponse {
    pub texte: String,
    pub succes: bool,
}

pub fn repondre(expression: &str, chiffres: Option<usize>) -> Reponse {
    match evaluate(expression) {
        Ok(x) => Reponse {
            texte: format_resultat(x, chiffres),
            succes: true,
        },
        Err(e) => {
            tracing::info!(expression, erreur = %e, "requête refusée");
            Reponse {
                texte: e.to_string(),
                succes: false,
            }
        }
    }
}
