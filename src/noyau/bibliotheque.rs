// src/noyau/bibliotheque.rs
//
// Bibliothèque numérique (f64)
// ----------------------------
// Primitives scalaires, réductions statistiques, transformations de vecteurs.
// Chaque opération :
// - vérifie la finitude de ses opérandes (et leur présence pour un vecteur),
// - vérifie la finitude de son résultat,
// - échoue avec une ErreurBibliotheque (jamais NaN/Infini, jamais de panic).
//
// L’évaluateur appelle ces fonctions mais ne les réimplémente pas.

use num_bigint::{BigInt, BigUint};
use num_traits::{FromPrimitive, One, Signed, ToPrimitive, Zero};
use thiserror::Error;

/// Plus grand n tel que n! reste fini en f64.
const FACTORIELLE_MAX: u64 = 170;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErreurBibliotheque {
    #[error("{op} : vecteur vide")]
    VecteurVide { op: &'static str },

    #[error("{op} : opérande non fini")]
    OperandeNonFini { op: &'static str },

    #[error("{op} : division par zéro")]
    DivisionParZero { op: &'static str },

    #[error("{op} : hors domaine ({detail})")]
    Domaine { op: &'static str, detail: String },

    #[error("{op} : longueurs différentes ({gauche} et {droite})")]
    LongueursDifferentes {
        op: &'static str,
        gauche: usize,
        droite: usize,
    },

    #[error("{op} : résultat non fini")]
    ResultatNonFini { op: &'static str },
}

pub type Resultat<T> = Result<T, ErreurBibliotheque>;

/* ------------------------ Garde-fous ------------------------ */

fn operande(op: &'static str, x: f64) -> Resultat<f64> {
    if x.is_finite() {
        Ok(x)
    } else {
        Err(ErreurBibliotheque::OperandeNonFini { op })
    }
}

fn resultat(op: &'static str, x: f64) -> Resultat<f64> {
    if x.is_finite() {
        Ok(x)
    } else {
        Err(ErreurBibliotheque::ResultatNonFini { op })
    }
}

fn vecteur<'a>(op: &'static str, v: &'a [f64]) -> Resultat<&'a [f64]> {
    if v.is_empty() {
        return Err(ErreurBibliotheque::VecteurVide { op });
    }
    if v.iter().any(|x| !x.is_finite()) {
        return Err(ErreurBibliotheque::OperandeNonFini { op });
    }
    Ok(v)
}

fn paire<'a>(
    op: &'static str,
    x: &'a [f64],
    y: &'a [f64],
) -> Resultat<(&'a [f64], &'a [f64])> {
    let x = vecteur(op, x)?;
    let y = vecteur(op, y)?;
    if x.len() != y.len() {
        return Err(ErreurBibliotheque::LongueursDifferentes {
            op,
            gauche: x.len(),
            droite: y.len(),
        });
    }
    Ok((x, y))
}

fn domaine(op: &'static str, detail: impl Into<String>) -> ErreurBibliotheque {
    ErreurBibliotheque::Domaine {
        op,
        detail: detail.into(),
    }
}

/* ------------------------ Scalaires ------------------------ */

pub fn add(a: f64, b: f64) -> Resultat<f64> {
    resultat("add", operande("add", a)? + operande("add", b)?)
}

pub fn subtract(a: f64, b: f64) -> Resultat<f64> {
    resultat("subtract", operande("subtract", a)? - operande("subtract", b)?)
}

pub fn multiply(a: f64, b: f64) -> Resultat<f64> {
    resultat("multiply", operande("multiply", a)? * operande("multiply", b)?)
}

pub fn divide(a: f64, b: f64) -> Resultat<f64> {
    let a = operande("divide", a)?;
    let b = operande("divide", b)?;
    if b == 0.0 {
        return Err(ErreurBibliotheque::DivisionParZero { op: "divide" });
    }
    resultat("divide", a / b)
}

pub fn power(base: f64, exposant: f64) -> Resultat<f64> {
    let base = operande("power", base)?;
    let exposant = operande("power", exposant)?;
    if base == 0.0 && exposant < 0.0 {
        return Err(ErreurBibliotheque::DivisionParZero { op: "power" });
    }
    if base < 0.0 && exposant.fract() != 0.0 {
        return Err(domaine("power", "base négative, exposant non entier"));
    }
    resultat("power", base.powf(exposant))
}

pub fn sqrt(x: f64) -> Resultat<f64> {
    let x = operande("sqrt", x)?;
    if x < 0.0 {
        return Err(domaine("sqrt", "argument négatif"));
    }
    resultat("sqrt", x.sqrt())
}

pub fn abs(x: f64) -> Resultat<f64> {
    resultat("abs", operande("abs", x)?.abs())
}

// Radians.
pub fn sin(x: f64) -> Resultat<f64> {
    resultat("sin", operande("sin", x)?.sin())
}

pub fn cos(x: f64) -> Resultat<f64> {
    resultat("cos", operande("cos", x)?.cos())
}

pub fn tan(x: f64) -> Resultat<f64> {
    resultat("tan", operande("tan", x)?.tan())
}

/* ------------------------ Entiers exacts ------------------------ */

/// f64 entier -> BigInt (exact, quelle que soit la magnitude).
fn entier(op: &'static str, x: f64) -> Resultat<BigInt> {
    let x = operande(op, x)?;
    if x.fract() != 0.0 {
        return Err(domaine(op, format!("{x} n’est pas entier")));
    }
    BigInt::from_f64(x).ok_or_else(|| domaine(op, format!("{x} non convertible")))
}

fn pgcd_big(mut a: BigInt, mut b: BigInt) -> BigInt {
    while !b.is_zero() {
        let r = &a % &b;
        a = b;
        b = r;
    }
    a.abs()
}

fn big_vers_f64(op: &'static str, n: &BigInt) -> Resultat<f64> {
    let x = n.to_f64().ok_or(ErreurBibliotheque::ResultatNonFini { op })?;
    resultat(op, x)
}

pub fn gcd(a: f64, b: f64) -> Resultat<f64> {
    let g = pgcd_big(entier("gcd", a)?, entier("gcd", b)?);
    big_vers_f64("gcd", &g)
}

pub fn lcm(a: f64, b: f64) -> Resultat<f64> {
    let a = entier("lcm", a)?;
    let b = entier("lcm", b)?;
    if a.is_zero() || b.is_zero() {
        return Ok(0.0);
    }
    let g = pgcd_big(a.clone(), b.clone());
    let l = (a * b).abs() / g;
    big_vers_f64("lcm", &l)
}

/// n! par produit exact puis un seul arrondi vers f64.
pub fn factorial(n: f64) -> Resultat<f64> {
    let n = operande("factorial", n)?;
    if n < 0.0 || n.fract() != 0.0 {
        return Err(domaine("factorial", "entier positif ou nul attendu"));
    }
    if n > FACTORIELLE_MAX as f64 {
        return Err(ErreurBibliotheque::ResultatNonFini { op: "factorial" });
    }
    let n = n as u64;
    let produit = (2..=n).fold(BigUint::one(), |acc, k| acc * BigUint::from(k));
    let x = produit
        .to_f64()
        .ok_or(ErreurBibliotheque::ResultatNonFini { op: "factorial" })?;
    resultat("factorial", x)
}

/* ------------------------ Réductions (vecteur -> scalaire) ------------------------ */

fn moyenne(v: &[f64]) -> f64 {
    v.iter().sum::<f64>() / v.len() as f64
}

fn variance_population(v: &[f64]) -> f64 {
    let m = moyenne(v);
    v.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / v.len() as f64
}

/// Écart-type de population, écarts ramenés à max|x − m| avant le carré :
/// reste fini tant que le vrai écart-type l’est.
fn ecart_type_population(v: &[f64]) -> f64 {
    let m = moyenne(v);
    let k = v.iter().fold(0.0_f64, |k, x| k.max((x - m).abs()));
    if k == 0.0 || !k.is_finite() {
        return k;
    }
    let s = v.iter().map(|x| ((x - m) / k).powi(2)).sum::<f64>() / v.len() as f64;
    k * s.sqrt()
}

fn trie(v: &[f64]) -> Vec<f64> {
    let mut t = v.to_vec();
    // Opérandes finis : total_cmp suffit.
    t.sort_by(|a, b| a.total_cmp(b));
    t
}

pub fn sum(v: &[f64]) -> Resultat<f64> {
    let v = vecteur("sum", v)?;
    resultat("sum", v.iter().sum())
}

pub fn mean(v: &[f64]) -> Resultat<f64> {
    let v = vecteur("mean", v)?;
    resultat("mean", moyenne(v))
}

pub fn median(v: &[f64]) -> Resultat<f64> {
    let t = trie(vecteur("median", v)?);
    let n = t.len();
    let m = if n % 2 == 1 {
        t[n / 2]
    } else {
        (t[n / 2 - 1] + t[n / 2]) / 2.0
    };
    resultat("median", m)
}

/// Valeur la plus fréquente ; à égalité, la plus petite.
pub fn mode(v: &[f64]) -> Resultat<f64> {
    let t = trie(vecteur("mode", v)?);

    let mut meilleur = t[0];
    let mut meilleur_compte = 0usize;
    let mut i = 0;
    while i < t.len() {
        let mut j = i;
        while j < t.len() && t[j] == t[i] {
            j += 1;
        }
        if j - i > meilleur_compte {
            meilleur = t[i];
            meilleur_compte = j - i;
        }
        i = j;
    }
    Ok(meilleur)
}

pub fn min(v: &[f64]) -> Resultat<f64> {
    let v = vecteur("min", v)?;
    Ok(v.iter().copied().fold(f64::INFINITY, f64::min))
}

pub fn max(v: &[f64]) -> Resultat<f64> {
    let v = vecteur("max", v)?;
    Ok(v.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

pub fn range(v: &[f64]) -> Resultat<f64> {
    let v = vecteur("range", v)?;
    resultat("range", max(v)? - min(v)?)
}

/// Variance de population (division par n).
pub fn variance(v: &[f64]) -> Resultat<f64> {
    let v = vecteur("variance", v)?;
    resultat("variance", variance_population(v))
}

pub fn standard_deviation(v: &[f64]) -> Resultat<f64> {
    let v = vecteur("standardDeviation", v)?;
    resultat("standardDeviation", ecart_type_population(v))
}

/// Interpolation linéaire, rang = p/100 · (n−1).
pub fn percentile(v: &[f64], p: f64) -> Resultat<f64> {
    let t = trie(vecteur("percentile", v)?);
    let p = operande("percentile", p)?;
    if !(0.0..=100.0).contains(&p) {
        return Err(domaine("percentile", format!("p = {p} hors de [0, 100]")));
    }
    let rang = p / 100.0 * (t.len() - 1) as f64;
    let bas = rang.floor() as usize;
    let haut = rang.ceil() as usize;
    let poids = rang - bas as f64;
    resultat("percentile", t[bas] + (t[haut] - t[bas]) * poids)
}

/// Covariance de population.
pub fn covariance(x: &[f64], y: &[f64]) -> Resultat<f64> {
    let (x, y) = paire("covariance", x, y)?;
    let mx = moyenne(x);
    let my = moyenne(y);
    let s: f64 = x.iter().zip(y).map(|(a, b)| (a - mx) * (b - my)).sum();
    resultat("covariance", s / x.len() as f64)
}

/// Corrélation de Pearson.
pub fn correlation(x: &[f64], y: &[f64]) -> Resultat<f64> {
    let (x, y) = paire("correlation", x, y)?;
    if x.len() < 2 {
        return Err(domaine("correlation", "au moins deux points"));
    }
    let sx = resultat("correlation", ecart_type_population(x))?;
    let sy = resultat("correlation", ecart_type_population(y))?;
    if sx == 0.0 || sy == 0.0 {
        return Err(ErreurBibliotheque::DivisionParZero { op: "correlation" });
    }
    let c = covariance(x, y)?;
    resultat("correlation", c / (sx * sy))
}

pub fn zscore(valeur: f64, moyenne: f64, ecart_type: f64) -> Resultat<f64> {
    let valeur = operande("zscore", valeur)?;
    let moyenne = operande("zscore", moyenne)?;
    let ecart_type = operande("zscore", ecart_type)?;
    if ecart_type == 0.0 {
        return Err(ErreurBibliotheque::DivisionParZero { op: "zscore" });
    }
    resultat("zscore", (valeur - moyenne) / ecart_type)
}

/* ------------------------ Transformations (vecteur -> vecteur) ------------------------ */

/// Min-max vers [0, 1].
pub fn normalize_array(v: &[f64]) -> Resultat<Vec<f64>> {
    let v = vecteur("normalizeArray", v)?;
    let bas = min(v)?;
    let etendue = range(v)?;
    if etendue == 0.0 {
        return Err(ErreurBibliotheque::DivisionParZero {
            op: "normalizeArray",
        });
    }
    v.iter()
        .map(|x| resultat("normalizeArray", (x - bas) / etendue))
        .collect()
}

/// (x − moyenne) / écart-type de population.
pub fn standardize_array(v: &[f64]) -> Resultat<Vec<f64>> {
    let v = vecteur("standardizeArray", v)?;
    let m = moyenne(v);
    let s = resultat("standardizeArray", ecart_type_population(v))?;
    if s == 0.0 {
        return Err(ErreurBibliotheque::DivisionParZero {
            op: "standardizeArray",
        });
    }
    v.iter()
        .map(|x| resultat("standardizeArray", (x - m) / s))
        .collect()
}
