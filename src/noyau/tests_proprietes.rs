//! Tests de propriétés (campagne) : opérateurs = primitives f64, pureté, parallélisme.
//!
//! But : vérifier les propriétés sur beaucoup de doubles finis sans faire chauffer la machine.
//! - RNG déterministe (seed fixe)
//! - magnitudes bornées (pas de débordement attendu)
//! - budget temps global
//!
//! Formatage : `{}` sur un f64 ne produit jamais d’exposant et relit la même valeur,
//! ce qui colle au découpage (pas de notation 1e5).

use std::time::{Duration, Instant};

use super::eval::evaluate;

/* ------------------------ RNG déterministe minimal ------------------------ */

struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    /// Double fini dans [-echelle/2, echelle/2].
    fn double(&mut self) -> f64 {
        let echelle = match self.next_u32() % 4 {
            0 => 1.0,
            1 => 1e3,
            2 => 1e6,
            _ => 1e-3,
        };
        (self.next_u32() as f64 / u32::MAX as f64 - 0.5) * echelle
    }
}

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

fn eval_ok(expr: &str) -> f64 {
    evaluate(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

#[test]
fn prop_operateurs_binaires() {
    let start = Instant::now();
    let mut rng = Rng::new(0xC0FFEE);

    for _ in 0..2000 {
        budget(start, Duration::from_secs(10));

        let a = rng.double();
        let b = rng.double();

        assert_eq!(eval_ok(&format!("{a}+{b}")), a + b, "a={a} b={b}");
        assert_eq!(eval_ok(&format!("{a}-{b}")), a - b, "a={a} b={b}");
        assert_eq!(eval_ok(&format!("{a}*{b}")), a * b, "a={a} b={b}");
        if b != 0.0 {
            assert_eq!(eval_ok(&format!("{a}/{b}")), a / b, "a={a} b={b}");
        }
    }
}

#[test]
fn prop_puissance() {
    let start = Instant::now();
    let mut rng = Rng::new(42);

    for _ in 0..2000 {
        budget(start, Duration::from_secs(10));

        // base > 0, exposant modéré : toujours fini
        let a = rng.double().abs() % 100.0 + 0.5;
        let b = (rng.next_u32() % 600) as f64 / 100.0 - 3.0;

        assert_eq!(eval_ok(&format!("{a}^{b}")), a.powf(b), "a={a} b={b}");
    }
}

#[test]
fn prop_parentheses_neutres() {
    let mut rng = Rng::new(7);
    for _ in 0..500 {
        let a = rng.double();
        let b = rng.double();
        let c = rng.double();
        assert_eq!(
            eval_ok(&format!("{a}+{b}*{c}")),
            eval_ok(&format!("{a}+({b}*{c})"))
        );
    }
}

#[test]
fn prop_purete() {
    let exprs = [
        "2+3*4",
        "mean(normalizeArray([10,20,30,40,50]))",
        "5/0",
        "foo(1)",
        "sqrt(2)^2",
        "(2+3",
    ];
    for s in exprs {
        assert_eq!(evaluate(s), evaluate(s), "expr={s:?}");
    }
}

#[test]
fn prop_appels_paralleles_independants() {
    let exprs = [
        "2^3^2",
        "variance([1,2,3,4])",
        "correlation([1,2,3],[2,4,7])",
        "normalizeArray([1,2]) + 1",
        "-5+3",
    ];
    let attendus: Vec<_> = exprs.iter().map(|s| evaluate(s)).collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    (0..200)
                        .map(|i| evaluate(exprs[i % exprs.len()]))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        for h in handles {
            let obtenus = h.join().unwrap_or_else(|_| panic!("thread paniqué"));
            for (i, r) in obtenus.iter().enumerate() {
                assert_eq!(r, &attendus[i % exprs.len()]);
            }
        }
    });
}
