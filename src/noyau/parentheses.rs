// src/noyau/parentheses.rs
//
// Pré-contrôle des parenthèses, une passe sur les jetons avant le parseur :
// diagnostic uniforme et précoce plutôt qu’une faute au fond de la descente.

use super::erreur::Desequilibre;
use super::jetons::Tok;

pub fn verifie_parentheses(tokens: &[Tok]) -> Result<(), Desequilibre> {
    let mut ouvertes: usize = 0;

    for (position, tok) in tokens.iter().enumerate() {
        match tok {
            Tok::LPar => ouvertes += 1,
            Tok::RPar => {
                ouvertes = ouvertes
                    .checked_sub(1)
                    .ok_or(Desequilibre::FermanteOrpheline {
                        position: position + 1,
                    })?;
            }
            _ => {}
        }
    }

    if ouvertes > 0 {
        return Err(Desequilibre::OuvranteNonFermee { nombre: ouvertes });
    }
    Ok(())
}
