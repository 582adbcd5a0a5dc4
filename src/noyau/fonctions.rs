//! Fonctions appelables depuis une expression.
//!
//! Table statique de signatures (nom insensible à la casse, genre de chaque
//! paramètre, genre rendu) + aiguillage vers la bibliothèque numérique.
//! `appeler` valide arité et genres AVANT tout appel ; le résultat de la
//! bibliothèque est rendu tel quel (Scalaire ou Vecteur).

use super::bibliotheque as bib;
use super::bibliotheque::Resultat;
use super::erreur::ErreurExpression;
use super::valeur::{Genre, Valeur};

/// Forme d’appel vers la bibliothèque.
#[derive(Clone, Copy)]
enum Operation {
    S1(fn(f64) -> Resultat<f64>),
    S2(fn(f64, f64) -> Resultat<f64>),
    S3(fn(f64, f64, f64) -> Resultat<f64>),
    V(fn(&[f64]) -> Resultat<f64>),
    VS(fn(&[f64], f64) -> Resultat<f64>),
    VV(fn(&[f64], &[f64]) -> Resultat<f64>),
    VversV(fn(&[f64]) -> Resultat<Vec<f64>>),
}

pub struct Signature {
    pub nom: &'static str,
    pub parametres: &'static [Genre],
    pub retour: Genre,
    op: Operation,
}

impl Signature {
    /// Vrai si la fonction rend un Vecteur (le parseur le conserve en argument).
    pub fn retourne_vecteur(&self) -> bool {
        self.retour == Genre::Vecteur
    }

    /// "percentile(vecteur, scalaire) -> scalaire"
    pub fn texte(&self) -> String {
        format!(
            "{}({}) -> {}",
            self.nom,
            liste_genres(self.parametres.iter().copied()),
            self.retour
        )
    }
}

use super::valeur::Genre::{Scalaire as Sc, Vecteur as Ve};

const S: &[Genre] = &[Sc];
const SS: &[Genre] = &[Sc, Sc];
const SSS: &[Genre] = &[Sc, Sc, Sc];
const V: &[Genre] = &[Ve];
const VS: &[Genre] = &[Ve, Sc];
const VV: &[Genre] = &[Ve, Ve];

macro_rules! sig {
    ($nom:literal, $params:expr, $retour:expr, $op:expr) => {
        Signature {
            nom: $nom,
            parametres: $params,
            retour: $retour,
            op: $op,
        }
    };
}

static TABLE: &[Signature] = &[
    // primitives des opérateurs
    sig!("add", SS, Sc, Operation::S2(bib::add)),
    sig!("subtract", SS, Sc, Operation::S2(bib::subtract)),
    sig!("multiply", SS, Sc, Operation::S2(bib::multiply)),
    sig!("divide", SS, Sc, Operation::S2(bib::divide)),
    sig!("power", SS, Sc, Operation::S2(bib::power)),
    // scalaires
    sig!("sqrt", S, Sc, Operation::S1(bib::sqrt)),
    sig!("abs", S, Sc, Operation::S1(bib::abs)),
    sig!("sin", S, Sc, Operation::S1(bib::sin)),
    sig!("cos", S, Sc, Operation::S1(bib::cos)),
    sig!("tan", S, Sc, Operation::S1(bib::tan)),
    sig!("factorial", S, Sc, Operation::S1(bib::factorial)),
    sig!("gcd", SS, Sc, Operation::S2(bib::gcd)),
    sig!("lcm", SS, Sc, Operation::S2(bib::lcm)),
    sig!("zscore", SSS, Sc, Operation::S3(bib::zscore)),
    // réductions
    sig!("sum", V, Sc, Operation::V(bib::sum)),
    sig!("mean", V, Sc, Operation::V(bib::mean)),
    sig!("median", V, Sc, Operation::V(bib::median)),
    sig!("mode", V, Sc, Operation::V(bib::mode)),
    sig!("min", V, Sc, Operation::V(bib::min)),
    sig!("max", V, Sc, Operation::V(bib::max)),
    sig!("range", V, Sc, Operation::V(bib::range)),
    sig!("variance", V, Sc, Operation::V(bib::variance)),
    sig!("standardDeviation", V, Sc, Operation::V(bib::standard_deviation)),
    sig!("std", V, Sc, Operation::V(bib::standard_deviation)),
    sig!("percentile", VS, Sc, Operation::VS(bib::percentile)),
    sig!("correlation", VV, Sc, Operation::VV(bib::correlation)),
    sig!("covariance", VV, Sc, Operation::VV(bib::covariance)),
    // vecteur -> vecteur
    sig!("normalizeArray", V, Ve, Operation::VversV(bib::normalize_array)),
    sig!("standardizeArray", V, Ve, Operation::VversV(bib::standardize_array)),
];

/// Recherche insensible à la casse.
pub fn signature(nom: &str) -> Option<&'static Signature> {
    TABLE.iter().find(|s| s.nom.eq_ignore_ascii_case(nom))
}

/// Toutes les signatures, dans l’ordre de la table.
pub fn signatures() -> &'static [Signature] {
    TABLE
}

fn liste_genres(genres: impl Iterator<Item = Genre>) -> String {
    let v: Vec<String> = genres.map(|g| g.to_string()).collect();
    v.join(", ")
}

fn erreur_arguments(sig: &Signature, args: &[Valeur]) -> ErreurExpression {
    ErreurExpression::Argument {
        fonction: sig.nom.to_string(),
        attendu: sig.texte(),
        recu: format!("({})", liste_genres(args.iter().map(Valeur::genre))),
    }
}

/// Valide puis exécute l’appel `nom(args...)`.
pub fn appeler(nom: &str, args: &[Valeur]) -> Result<Valeur, ErreurExpression> {
    let sig = signature(nom).ok_or_else(|| ErreurExpression::FonctionInconnue(nom.to_string()))?;

    let genres_ok = args.len() == sig.parametres.len()
        && args
            .iter()
            .zip(sig.parametres)
            .all(|(a, attendu)| a.genre() == *attendu);
    if !genres_ok {
        return Err(erreur_arguments(sig, args));
    }

    tracing::trace!(fonction = sig.nom, arguments = args.len(), "appel");

    use super::valeur::Valeur::{Scalaire as Sv, Vecteur as Vv};
    let r = match (sig.op, args) {
        (Operation::S1(f), [Sv(a)]) => f(*a).map(Sv),
        (Operation::S2(f), [Sv(a), Sv(b)]) => f(*a, *b).map(Sv),
        (Operation::S3(f), [Sv(a), Sv(b), Sv(c)]) => f(*a, *b, *c).map(Sv),
        (Operation::V(f), [Vv(v)]) => f(v).map(Sv),
        (Operation::VS(f), [Vv(v), Sv(p)]) => f(v, *p).map(Sv),
        (Operation::VV(f), [Vv(x), Vv(y)]) => f(x, y).map(Sv),
        (Operation::VversV(f), [Vv(v)]) => f(v).map(Vv),
        _ => return Err(erreur_arguments(sig, args)),
    };
    Ok(r?)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::noyau::bibliotheque::ErreurBibliotheque;

    fn genres_de(op: Operation) -> (Vec<Genre>, Genre) {
        match op {
            Operation::S1(_) => (vec![Sc], Sc),
            Operation::S2(_) => (vec![Sc, Sc], Sc),
            Operation::S3(_) => (vec![Sc, Sc, Sc], Sc),
            Operation::V(_) => (vec![Ve], Sc),
            Operation::VS(_) => (vec![Ve, Sc], Sc),
            Operation::VV(_) => (vec![Ve, Ve], Sc),
            Operation::VversV(_) => (vec![Ve], Ve),
        }
    }

    #[test]
    fn table_coherente_avec_les_operations() {
        for sig in signatures() {
            let (params, retour) = genres_de(sig.op);
            assert_eq!(sig.parametres, params.as_slice(), "{}", sig.nom);
            assert_eq!(sig.retour, retour, "{}", sig.nom);
        }
    }

    #[test]
    fn noms_uniques_sans_casse() {
        let noms = signatures();
        for (i, a) in noms.iter().enumerate() {
            for b in &noms[i + 1..] {
                assert!(!a.nom.eq_ignore_ascii_case(b.nom), "doublon {}", a.nom);
            }
        }
    }

    #[test]
    fn recherche_insensible_a_la_casse() {
        assert!(signature("NORMALIZEARRAY").is_some_and(Signature::retourne_vecteur));
        assert!(signature("Mean").is_some_and(|s| !s.retourne_vecteur()));
        assert!(signature("foo").is_none());
    }

    #[test]
    fn aiguillage() {
        let r = appeler("mean", &[Valeur::Vecteur(vec![1.0, 2.0, 3.0])]);
        assert_eq!(r, Ok(Valeur::Scalaire(2.0)));

        let r = appeler("normalizeArray", &[Valeur::Vecteur(vec![0.0, 5.0])]);
        assert_eq!(r, Ok(Valeur::Vecteur(vec![0.0, 1.0])));

        let r = appeler(
            "percentile",
            &[Valeur::Vecteur(vec![1.0, 3.0]), Valeur::Scalaire(50.0)],
        );
        assert_eq!(r, Ok(Valeur::Scalaire(2.0)));
    }

    #[test]
    fn arite_et_genre_refuses() {
        let e = appeler("mean", &[]).unwrap_err();
        assert_eq!(
            e,
            ErreurExpression::Argument {
                fonction: "mean".into(),
                attendu: "mean(vecteur) -> scalaire".into(),
                recu: "()".into(),
            }
        );

        let e = appeler("sqrt", &[Valeur::Vecteur(vec![4.0])]).unwrap_err();
        assert!(e.to_string().contains("reçu (vecteur)"));

        let e = appeler("foo", &[Valeur::Scalaire(1.0)]).unwrap_err();
        assert_eq!(e, ErreurExpression::FonctionInconnue("foo".into()));
    }

    #[test]
    fn erreur_bibliotheque_relayee() {
        let e = appeler("divide", &[Valeur::Scalaire(1.0), Valeur::Scalaire(0.0)]).unwrap_err();
        assert_eq!(
            e,
            ErreurExpression::Arithmetique(ErreurBibliotheque::DivisionParZero { op: "divide" })
        );
    }
}
