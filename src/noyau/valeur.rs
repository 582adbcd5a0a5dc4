// src/noyau/valeur.rs
//
// Valeur intermédiaire de l’évaluateur : Scalaire ou Vecteur (jamais vide).
// Un Vecteur n’existe que le temps d’être passé en argument à une fonction ;
// partout ailleurs on exige un Scalaire via `en_scalaire`.

use std::fmt;

use super::erreur::ErreurExpression;

/// Genre attendu (ou rendu) à une position de signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Genre {
    Scalaire,
    Vecteur,
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Genre::Scalaire => f.write_str("scalaire"),
            Genre::Vecteur => f.write_str("vecteur"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Valeur {
    Scalaire(f64),
    Vecteur(Vec<f64>),
}

impl Valeur {
    pub fn genre(&self) -> Genre {
        match self {
            Valeur::Scalaire(_) => Genre::Scalaire,
            Valeur::Vecteur(_) => Genre::Vecteur,
        }
    }

    /// Exige un Scalaire ; `contexte` dit où le vecteur est arrivé.
    pub fn en_scalaire(self, contexte: &str) -> Result<f64, ErreurExpression> {
        match self {
            Valeur::Scalaire(x) => Ok(x),
            Valeur::Vecteur(v) => Err(ErreurExpression::VecteurMalPlace(format!(
                "vecteur de {} élément(s) utilisé {contexte}",
                v.len()
            ))),
        }
    }
}

impl fmt::Display for Valeur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Valeur::Scalaire(x) => write!(f, "{x}"),
            Valeur::Vecteur(v) => {
                f.write_str("[")?;
                for (i, x) in v.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{x}")?;
                }
                f.write_str("]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalaire_passe_vecteur_refuse() {
        assert_eq!(Valeur::Scalaire(2.5).en_scalaire("ici"), Ok(2.5));
        let e = Valeur::Vecteur(vec![1.0, 2.0]).en_scalaire("avec '+'");
        assert!(matches!(e, Err(ErreurExpression::VecteurMalPlace(m)) if m.contains("avec '+'")));
    }

    #[test]
    fn affichage() {
        assert_eq!(Valeur::Vecteur(vec![1.0, 0.5]).to_string(), "[1, 0.5]");
        assert_eq!(Valeur::Scalaire(-3.0).to_string(), "-3");
        assert_eq!(Genre::Vecteur.to_string(), "vecteur");
    }
}
