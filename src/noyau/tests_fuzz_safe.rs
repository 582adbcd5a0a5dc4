//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - longueur bornée
//! - budget temps global
//! - invariants clés : jamais de panic, résultat toujours fini,
//!   toute erreur porte le préfixe "expression invalide"

use std::time::{Duration, Instant};

use super::eval::evaluate;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération ------------------------ */

const MORCEAUX: &[&str] = &[
    "1", "2.5", "0", "7", "+", "-", "*", "/", "^", "(", ")", ",", " ", "pi", "e", "mean",
    "normalizeArray", "standardizeArray", "sqrt", "gcd", "percentile", "foo", "[1,2]", "[3]",
    "[-1,0.5,4]", "[", "]", ".", "$",
];

fn gen_soupe(rng: &mut Rng) -> String {
    let n = 1 + rng.pick(14);
    (0..n)
        .map(|_| MORCEAUX[rng.pick(MORCEAUX.len() as u32) as usize])
        .collect()
}

/// Expressions bien formées (souvent valides) : appels imbriqués + opérateurs.
fn gen_expr(rng: &mut Rng, profondeur: u32) -> String {
    if profondeur == 0 {
        return match rng.pick(4) {
            0 => format!("{}", rng.pick(20)),
            1 => "pi".to_string(),
            2 => "mean([1,2,3])".to_string(),
            _ => format!("{}.5", rng.pick(9)),
        };
    }
    let a = gen_expr(rng, profondeur - 1);
    let b = gen_expr(rng, profondeur - 1);
    match rng.pick(7) {
        0 => format!("{a}+{b}"),
        1 => format!("{a}-{b}"),
        2 => format!("({a})*({b})"),
        3 => format!("({a})/({b})"),
        4 => format!("-({a})"),
        5 => format!("abs({a})"),
        _ => format!("mean(normalizeArray([1,{}]))+{a}", rng.pick(5) + 2),
    }
}

fn verifie(s: &str) {
    match evaluate(s) {
        Ok(x) => assert!(x.is_finite(), "expr={s:?} -> {x}"),
        Err(e) => {
            let msg = e.to_string();
            assert!(
                msg.starts_with("expression invalide : "),
                "expr={s:?} msg={msg:?}"
            );
        }
    }
}

#[test]
fn fuzz_soupe_de_jetons() {
    let start = Instant::now();
    let mut rng = Rng::new(0xDEADBEEF);

    for _ in 0..5000 {
        budget(start, Duration::from_secs(10));
        let s = gen_soupe(&mut rng);
        verifie(&s);
    }
}

#[test]
fn fuzz_expressions_bien_formees() {
    let start = Instant::now();
    let mut rng = Rng::new(1234);

    let mut valides = 0;
    for _ in 0..1000 {
        budget(start, Duration::from_secs(10));
        let profondeur = 1 + rng.pick(4);
        let s = gen_expr(&mut rng, profondeur);
        verifie(&s);
        if evaluate(&s).is_ok() {
            valides += 1;
        }
    }
    // la grande majorité doit passer (seules les divisions par zéro échouent)
    assert!(valides > 500, "valides={valides}");
}

#[test]
fn fuzz_deterministe() {
    let mut r1 = Rng::new(99);
    let mut r2 = r1.clone();
    for _ in 0..300 {
        let s1 = gen_soupe(&mut r1);
        let s2 = gen_soupe(&mut r2);
        assert_eq!(s1, s2);
        assert_eq!(evaluate(&s1), evaluate(&s2));
    }
}
