// src/noyau/parseur.rs
//
// Descente récursive + évaluation fusionnées (pas d’AST intermédiaire).
//
// Grammaire (de la plus faible à la plus forte priorité) :
//   expression := addition
//   addition   := produit (('+'|'-') produit)*        gauche
//   produit    := puissance (('*'|'/') puissance)*    gauche
//   puissance  := facteur ('^' puissance)?            droite
//   facteur    := ('-'|'+') facteur | '(' expression ')'
//               | nombre | constante | appel
//   appel      := ident '(' [argument (',' argument)*] ')'
//   argument   := tableau | appel_vectoriel | expression
//
// Un Vecteur ne remonte que jusqu’à `argument` ; `expression` et chaque
// opérateur exigent un Scalaire (sinon VecteurMalPlace).
// Le curseur `pos` ne recule jamais ; tout l’état vit dans le Parseur,
// possédé par un seul appel d’évaluation.

use super::bibliotheque::{self as bib, Resultat};
use super::constantes::constante;
use super::erreur::ErreurExpression;
use super::fonctions::{appeler, signature, Signature};
use super::jetons::{format_token, Tok};
use super::valeur::Valeur;

/// Garde-fou : profondeur maximale d’imbrication des règles (anti-débordement de pile).
pub const PROFONDEUR_MAX: usize = 256;

type Binaire = fn(f64, f64) -> Resultat<f64>;

fn additif(t: &Tok) -> Option<(Binaire, &'static str)> {
    match t {
        Tok::Plus => Some((bib::add, "avec '+'")),
        Tok::Minus => Some((bib::subtract, "avec '-'")),
        _ => None,
    }
}

fn multiplicatif(t: &Tok) -> Option<(Binaire, &'static str)> {
    match t {
        Tok::Star => Some((bib::multiply, "avec '*'")),
        Tok::Slash => Some((bib::divide, "avec '/'")),
        _ => None,
    }
}

fn est_operateur_binaire(t: &Tok) -> bool {
    matches!(t, Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret)
}

pub struct Parseur<'a> {
    jetons: &'a [Tok],
    pos: usize,
    profondeur: usize,
    // "mean([1, 2]) = 1.5" : un par appel de fonction, dans l’ordre d’évaluation
    journal: Vec<String>,
}

impl<'a> Parseur<'a> {
    pub fn new(jetons: &'a [Tok]) -> Self {
        Self {
            jetons,
            pos: 0,
            profondeur: 0,
            journal: Vec::new(),
        }
    }

    /// Évalue toute la suite de jetons. Rend le Scalaire final + le journal des appels.
    pub fn analyser(mut self) -> Result<(f64, Vec<String>), ErreurExpression> {
        let x = self.expression()?;
        if let Some(t) = self.peek() {
            return Err(ErreurExpression::JetonsRestants(format_token(t)));
        }
        Ok((x, self.journal))
    }

    /* ------------------------ Curseur ------------------------ */

    fn peek(&self) -> Option<&'a Tok> {
        self.jetons.get(self.pos)
    }

    /// Consomme le jeton courant ; fin de suite => erreur de syntaxe.
    fn suivant(&mut self, attendu: &str) -> Result<&'a Tok, ErreurExpression> {
        let t = self.jetons.get(self.pos).ok_or_else(|| {
            ErreurExpression::Syntaxe(format!("fin inattendue de l’expression, attendu {attendu}"))
        })?;
        self.pos += 1;
        Ok(t)
    }

    fn eat(&mut self, t: &Tok) -> bool {
        if self.peek() == Some(t) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, t: &Tok, message: &str) -> Result<(), ErreurExpression> {
        match self.peek() {
            Some(vu) if vu == t => {
                self.pos += 1;
                Ok(())
            }
            Some(vu) => Err(ErreurExpression::Syntaxe(format!(
                "{message}, trouvé « {} »",
                format_token(vu)
            ))),
            None => Err(ErreurExpression::Syntaxe(format!(
                "{message}, trouvé la fin de l’expression"
            ))),
        }
    }

    /// Compte un niveau d’imbrication autour de `regle`.
    fn imbrique<T>(
        &mut self,
        regle: impl FnOnce(&mut Self) -> Result<T, ErreurExpression>,
    ) -> Result<T, ErreurExpression> {
        if self.profondeur >= PROFONDEUR_MAX {
            return Err(ErreurExpression::Syntaxe(format!(
                "imbrication trop profonde (plus de {PROFONDEUR_MAX} niveaux)"
            )));
        }
        self.profondeur += 1;
        let r = regle(self);
        self.profondeur -= 1;
        r
    }

    /* ------------------------ Règles ------------------------ */

    fn expression(&mut self) -> Result<f64, ErreurExpression> {
        self.imbrique(Self::addition)?
            .en_scalaire("comme résultat d’une expression")
    }

    fn addition(&mut self) -> Result<Valeur, ErreurExpression> {
        let mut gauche = self.produit()?;
        while let Some((op, contexte)) = self.peek().and_then(additif) {
            self.pos += 1;
            let a = gauche.en_scalaire(contexte)?;
            let b = self.produit()?.en_scalaire(contexte)?;
            gauche = Valeur::Scalaire(op(a, b)?);
        }
        Ok(gauche)
    }

    fn produit(&mut self) -> Result<Valeur, ErreurExpression> {
        let mut gauche = self.puissance()?;
        while let Some((op, contexte)) = self.peek().and_then(multiplicatif) {
            self.pos += 1;
            let a = gauche.en_scalaire(contexte)?;
            let b = self.puissance()?.en_scalaire(contexte)?;
            gauche = Valeur::Scalaire(op(a, b)?);
        }
        Ok(gauche)
    }

    // Associative à droite : 2^3^2 = 2^(3^2).
    fn puissance(&mut self) -> Result<Valeur, ErreurExpression> {
        let base = self.facteur()?;
        if !self.eat(&Tok::Caret) {
            return Ok(base);
        }
        let b = base.en_scalaire("avec '^'")?;
        let e = self.imbrique(Self::puissance)?.en_scalaire("avec '^'")?;
        Ok(Valeur::Scalaire(bib::power(b, e)?))
    }

    fn facteur(&mut self) -> Result<Valeur, ErreurExpression> {
        self.imbrique(Self::facteur_nu)
    }

    fn facteur_nu(&mut self) -> Result<Valeur, ErreurExpression> {
        let tok = self.suivant("un nombre, une constante, une fonction ou '('")?;
        match tok {
            // moins unaire = multiplication par -1 (récursif : --5 = 5)
            Tok::Minus => {
                let x = self.facteur()?.en_scalaire("avec le moins unaire")?;
                Ok(Valeur::Scalaire(bib::multiply(-1.0, x)?))
            }
            Tok::Plus => Ok(Valeur::Scalaire(
                self.facteur()?.en_scalaire("avec le plus unaire")?,
            )),
            Tok::LPar => {
                let x = self.expression()?;
                self.expect(&Tok::RPar, "attendu ')'")?;
                Ok(Valeur::Scalaire(x))
            }
            Tok::Num(x) => Ok(Valeur::Scalaire(*x)),
            Tok::Ident(nom) => self.identifiant(nom),
            Tok::Tableau(_) => Err(ErreurExpression::VecteurMalPlace(format!(
                "tableau littéral {} hors d’un argument de fonction",
                format_token(tok)
            ))),
            autre => Err(ErreurExpression::Syntaxe(format!(
                "jeton inattendu « {} »",
                format_token(autre)
            ))),
        }
    }

    /// Constante d’abord, fonction ensuite (espaces de noms disjoints).
    fn identifiant(&mut self, nom: &str) -> Result<Valeur, ErreurExpression> {
        if let Some(c) = constante(nom) {
            return Ok(Valeur::Scalaire(c));
        }
        let sig =
            signature(nom).ok_or_else(|| ErreurExpression::FonctionInconnue(nom.to_string()))?;
        self.appel(sig)
    }

    /// L’identifiant est déjà consommé ; lit "( args )" puis aiguille.
    fn appel(&mut self, sig: &'static Signature) -> Result<Valeur, ErreurExpression> {
        self.expect(
            &Tok::LPar,
            &format!("la fonction {} doit être suivie de '('", sig.nom),
        )?;

        let mut args = Vec::new();
        if !self.eat(&Tok::RPar) {
            loop {
                args.push(self.argument()?);
                match self.suivant("',' ou ')'")? {
                    Tok::Virgule => {}
                    Tok::RPar => break,
                    autre => {
                        return Err(ErreurExpression::Syntaxe(format!(
                            "attendu ',' ou ')' dans l’appel de {}, trouvé « {} »",
                            sig.nom,
                            format_token(autre)
                        )))
                    }
                }
            }
        }

        let resultat = appeler(sig.nom, &args)?;

        let textes: Vec<String> = args.iter().map(Valeur::to_string).collect();
        self.journal
            .push(format!("{}({}) = {resultat}", sig.nom, textes.join(", ")));

        Ok(resultat)
    }

    /// Tableau littéral ou fonction vectorielle : le Vecteur est conservé.
    /// Sinon : expression ordinaire (toujours Scalaire).
    fn argument(&mut self) -> Result<Valeur, ErreurExpression> {
        let v = match self.peek() {
            Some(Tok::Tableau(v)) => {
                self.pos += 1;
                Valeur::Vecteur(v.clone())
            }
            Some(Tok::Ident(nom)) => match signature(nom).filter(|s| s.retourne_vecteur()) {
                Some(sig) => {
                    self.pos += 1;
                    self.imbrique(|p| p.appel(sig))?
                }
                None => return Ok(Valeur::Scalaire(self.expression()?)),
            },
            _ => return Ok(Valeur::Scalaire(self.expression()?)),
        };

        if let Some(t) = self.peek().filter(|t| est_operateur_binaire(t)) {
            return Err(ErreurExpression::VecteurMalPlace(format!(
                "vecteur {v} suivi de « {} » dans un argument",
                format_token(t)
            )));
        }
        Ok(v)
    }
}
