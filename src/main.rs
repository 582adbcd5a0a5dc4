// src/main.rs
//
// Calculatrice Stats — point d’entrée NATIF + WEB (WASM)
// ------------------------------------------------------
// But:
// - NATIF (Linux/Windows/macOS) : `--expr` => une réponse sur stdout, sinon eframe::run_native
// - WEB  (wasm32)              : eframe::WebRunner + WebOptions + <canvas>
//
// Côté WEB (WASM) : ton index.html doit contenir un canvas :
//   <canvas id="the_canvas_id"></canvas>

#![cfg_attr(target_arch = "wasm32", allow(unused_imports))]

mod app;
mod hote;
mod noyau;
mod reglages;

use app::AppCalc;
use reglages::TITRE_APP;

/* ------------------------ Entrée NATIF (PC) ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use std::process::ExitCode;

    use clap::Parser;
    use eframe::egui;
    use tracing::Level;

    use reglages::{Reglages, TAILLE_FENETRE, TAILLE_FENETRE_MIN};

    let reglages = Reglages::parse();

    let niveau = if reglages.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(niveau)
        .with_writer(std::io::stderr)
        .init();

    // Mode une-expression : la réponse (nombre ou message) est toute la sortie.
    if let Some(expr) = reglages.expr.as_deref() {
        let r = hote::repondre(expr, reglages.chiffres_bornes());
        println!("{}", r.texte);
        return if r.succes {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITRE_APP)
            .with_inner_size(TAILLE_FENETRE)
            .with_min_inner_size(TAILLE_FENETRE_MIN),
        ..Default::default()
    };

    let chiffres = reglages.chiffres_bornes();
    let lancement = eframe::run_native(
        TITRE_APP,
        options,
        Box::new(move |_cc| Ok(Box::new(AppCalc::avec_chiffres(chiffres)))),
    );

    match lancement {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(erreur = %e, "interface indisponible");
            ExitCode::FAILURE
        }
    }
}

/* ------------------------ Entrée WEB (WASM) ------------------------ */

#[cfg(target_arch = "wasm32")]
fn main() {
    // En wasm32, le démarrage réel passe par `start()` (wasm_bindgen).
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{AppCalc, TITRE_APP};

    use wasm_bindgen::JsCast;
    use web_sys::{window, HtmlCanvasElement};

    /// ID du canvas attendu dans index.html.
    const CANVAS_ID: &str = "the_canvas_id";

    /// Point d’entrée automatique au chargement de la page.
    #[wasm_bindgen::prelude::wasm_bindgen(start)]
    pub async fn start() -> Result<(), wasm_bindgen::JsValue> {
        let w = window().ok_or_else(|| js_err("window() indisponible"))?;
        let d = w
            .document()
            .ok_or_else(|| js_err("document() indisponible"))?;

        d.set_title(TITRE_APP);

        let el = d
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| js_err("canvas introuvable (id incorrect dans index.html)"))?;

        let canvas: HtmlCanvasElement = el
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| js_err("l’élément trouvé n’est pas un <canvas>"))?;

        let web_options = eframe::WebOptions::default();

        eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|_cc| Ok(Box::<AppCalc>::default())),
            )
            .await
    }

    fn js_err(msg: &str) -> wasm_bindgen::JsValue {
        wasm_bindgen::JsValue::from_str(msg)
    }
}
