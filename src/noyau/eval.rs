//! Noyau — évaluation (pipeline réel)
//!
//! jetons -> contrôle des parenthèses -> descente récursive (évaluation fusionnée)
//!        -> contrôle de finitude -> f64
//!
//! Aucun état partagé modifiable : le Parseur naît et meurt dans l’appel,
//! seule la table des constantes (immuable) est commune. Deux appels avec la
//! même chaîne rendent le même résultat, en parallèle ou non.

use super::bibliotheque::ErreurBibliotheque;
use super::erreur::{ErreurEvaluation, ErreurExpression};
use super::jetons::{format_tokens, tokenize};
use super::parentheses::verifie_parentheses;
use super::parseur::Parseur;

#[derive(Default, Clone, Debug, PartialEq)]
pub struct DemarcheNoyau {
    pub jetons: String,
    pub appels: Vec<String>,
    pub note: String,
}

/// API publique : évalue une expression en un f64 fini.
pub fn evaluate(expression: &str) -> Result<f64, ErreurEvaluation> {
    evaluer_avec_demarche(expression).map(|(x, _)| x)
}

/// Comme `evaluate`, avec la démarche (jetons + appels de fonctions).
pub fn evaluer_avec_demarche(expression: &str) -> Result<(f64, DemarcheNoyau), ErreurEvaluation> {
    match pipeline(expression) {
        Ok(r) => {
            tracing::debug!(expression, resultat = r.0, "évaluée");
            Ok(r)
        }
        Err(cause) => {
            tracing::debug!(expression, erreur = %cause, "rejetée");
            Err(ErreurEvaluation::from(cause))
        }
    }
}

fn pipeline(expression: &str) -> Result<(f64, DemarcheNoyau), ErreurExpression> {
    // 1) Jetons
    let jetons = tokenize(expression)?;
    tracing::trace!(jetons = jetons.len(), "découpage");

    // 2) Parenthèses (diagnostic précoce)
    verifie_parentheses(&jetons)?;

    // 3) Descente + évaluation
    let (x, appels) = Parseur::new(&jetons).analyser()?;

    // 4) Finitude du résultat final
    if !x.is_finite() {
        return Err(ErreurBibliotheque::ResultatNonFini { op: "expression" }.into());
    }

    let d = DemarcheNoyau {
        jetons: format_tokens(&jetons),
        appels,
        note: "Pipeline: jetons → parenthèses → descente récursive (évaluation fusionnée) → finitude."
            .into(),
    };
    Ok((x, d))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn ok(s: &str) -> f64 {
        evaluate(s).unwrap_or_else(|e| panic!("evaluate({s:?}) erreur: {e}"))
    }

    fn cause(s: &str) -> ErreurExpression {
        match evaluate(s) {
            Ok(x) => panic!("evaluate({s:?}) devait échouer, a rendu {x}"),
            Err(e) => e.cause,
        }
    }

    fn proche(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    // --- Priorités ---

    #[test]
    fn priorites() {
        assert_eq!(ok("2+3*4"), 14.0);
        assert_eq!(ok("(2+3)*4"), 20.0);
        assert_eq!(ok("2^3^2"), 512.0);
        assert_eq!(ok("-5+3"), -2.0);
    }

    // --- Constantes ---

    #[test]
    fn constantes() {
        assert!((ok("pi") - 3.14159265358979).abs() < 1e-13);
        assert!((ok("e") - 2.71828182845905).abs() < 1e-13);
        assert!(proche(ok("2*PI"), std::f64::consts::TAU));
    }

    // --- Fonctions ---

    #[test]
    fn tableau_en_argument() {
        assert_eq!(ok("mean([1,2,3,4,5])"), 3.0);
        assert_eq!(ok("MEAN([1, 2, 3, 4, 5])"), 3.0);
        assert_eq!(ok("percentile([1,2,3,4,5], 50)"), 3.0);
        assert_eq!(ok("median([5,-1,3])"), 3.0);
    }

    #[test]
    fn fonction_vectorielle_imbriquee() {
        assert_eq!(ok("mean(normalizeArray([10,20,30,40,50]))"), 0.5);
        assert!(proche(ok("mean(standardizeArray([1,2,3,4]))"), 0.0));
        assert!(proche(ok("standardDeviation(standardizeArray([2,4,9]))"), 1.0));
    }

    #[test]
    fn fonctions_dans_l_arithmetique() {
        assert_eq!(ok("sqrt(16) + abs(-2) * 3"), 10.0);
        assert_eq!(ok("gcd(12, 18) + lcm(4, 6)"), 18.0);
        assert_eq!(ok("factorial(5) / 2"), 60.0);
        assert!(proche(ok("correlation([1,2,3],[3,2,1])"), -1.0));
        assert_eq!(ok("zscore(12, mean([8,10,12]), 2)"), 1.0);
        assert_eq!(ok("max([1,7,3]) - min([1,7,3])"), ok("range([1,7,3])"));
    }

    // --- Erreurs ---

    #[test]
    fn vecteur_mal_place() {
        assert!(matches!(
            cause("normalizeArray([1,2,3]) + 1"),
            ErreurExpression::VecteurMalPlace(_)
        ));
    }

    #[test]
    fn division_par_zero() {
        assert!(matches!(
            cause("5/0"),
            ErreurExpression::Arithmetique(ErreurBibliotheque::DivisionParZero { .. })
        ));
    }

    #[test]
    fn parentheses() {
        assert!(matches!(cause("(2+3"), ErreurExpression::Parenthese(_)));
        assert!(matches!(cause("2+3)"), ErreurExpression::Parenthese(_)));
    }

    #[test]
    fn fonction_inconnue() {
        assert_eq!(
            cause("foo(1)"),
            ErreurExpression::FonctionInconnue("foo".into())
        );
    }

    #[test]
    fn liste_vide_pour_arite_fixe() {
        assert!(matches!(cause("mean()"), ErreurExpression::Argument { .. }));
        assert!(matches!(cause("sqrt()"), ErreurExpression::Argument { .. }));
    }

    #[test]
    fn genre_d_argument() {
        let e = cause("sqrt([4])");
        assert_eq!(
            e.to_string(),
            "arguments de sqrt : attendu sqrt(scalaire) -> scalaire, reçu (vecteur)"
        );
        assert!(matches!(cause("mean(3)"), ErreurExpression::Argument { .. }));
    }

    #[test]
    fn pas_de_notation_exponentielle() {
        assert!(matches!(cause("1e5"), ErreurExpression::JetonsRestants(_)));
        assert!(matches!(cause("mean([1e5])"), ErreurExpression::Jetons(_)));
    }

    #[test]
    fn entree_vide() {
        assert!(matches!(cause(""), ErreurExpression::Jetons(_)));
        assert!(matches!(cause(" \t "), ErreurExpression::Jetons(_)));
    }

    #[test]
    fn resultat_non_fini() {
        assert!(matches!(
            cause("10^400"),
            ErreurExpression::Arithmetique(ErreurBibliotheque::ResultatNonFini { .. })
        ));
    }

    #[test]
    fn litteraux_longs_standardises() {
        let zeros = "0".repeat(200);
        let expr = format!("max(standardizeArray([1{zeros},-1{zeros}]))");
        assert_eq!(evaluate(&expr).unwrap(), 1.0);
        let expr = format!("standardDeviation([1{zeros},-1{zeros}])");
        assert_eq!(evaluate(&expr).unwrap(), 1e200);
    }

    #[test]
    fn message_prefixe() {
        let e = evaluate("5/0").unwrap_err();
        assert_eq!(
            e.to_string(),
            "expression invalide : arithmétique : divide : division par zéro"
        );
    }

    // --- Démarche ---

    #[test]
    fn demarche() {
        let (x, d) = evaluer_avec_demarche("mean([1,2]) * 2").unwrap();
        assert_eq!(x, 3.0);
        assert_eq!(d.jetons, "mean ( [1,2] ) * 2");
        assert_eq!(d.appels, vec!["mean([1, 2]) = 1.5".to_string()]);
    }
}
