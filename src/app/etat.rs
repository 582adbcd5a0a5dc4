//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, résultat, lecture arrondie,
//! erreur, chiffres, démarche) et offrir des opérations simples (C/CLR/AC)
//! sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (pas de noyau, pas de parsing).
//! - Actions déterministes, sans effet de bord caché.
//! - Bornes sur la lecture arrondie (chiffres).

use crate::reglages::{CHIFFRES_DEFAUT, CHIFFRES_MAX};

#[derive(Clone, Default, Debug, PartialEq)]
pub struct Demarche {
    pub jetons: String,
    pub appels: String,
    pub note: String,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub resultat: String,    // forme la plus courte (relit le même f64)
    pub lecture: String,     // lecture arrondie à `chiffres`
    pub erreur: String,      // message d’erreur complet ("expression invalide : …")
    pub lecture_dispo: bool, // false si erreur / vide

    // --- démarche (panneau d’explication) ---
    pub demarche: Demarche,

    // --- paramètres ---
    pub chiffres: usize,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            resultat: String::new(),
            lecture: String::new(),
            erreur: String::new(),
            lecture_dispo: false,
            demarche: Demarche::default(),
            chiffres: CHIFFRES_DEFAUT,
            focus_entree: true,
        }
    }
}

impl AppCalc {
    /// État initial avec une précision de lecture imposée (ligne de commande).
    pub fn avec_chiffres(chiffres: Option<usize>) -> Self {
        let mut app = Self::default();
        if let Some(n) = chiffres {
            app.set_chiffres(n);
        }
        app
    }

    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + chiffres par défaut).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.chiffres = CHIFFRES_DEFAUT;
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// CLR : effacer résultats + erreur + démarche (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.resultat.clear();
        self.lecture.clear();
        self.erreur.clear();
        self.lecture_dispo = false;
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Place une erreur.
    ///
    /// On CONSERVE `resultat` (dernier résultat) pour ne pas “effacer l’écran” sur une faute ;
    /// lecture + démarche sont coupées (elles décrivaient l’évaluation précédente).
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.lecture.clear();
        self.lecture_dispo = false;
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Dépose un résultat complet.
    pub fn set_resultats(
        &mut self,
        resultat: impl Into<String>,
        lecture: impl Into<String>,
        demarche: Demarche,
    ) {
        self.erreur.clear();
        self.resultat = resultat.into();
        self.lecture = lecture.into();
        self.lecture_dispo = true;
        self.demarche = demarche;
        self.focus_entree = true;
    }

    pub fn set_chiffres(&mut self, chiffres: usize) {
        self.chiffres = chiffres.min(CHIFFRES_MAX);
        self.focus_entree = true;
    }
}
