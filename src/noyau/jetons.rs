// src/noyau/jetons.rs

use super::erreur::ErreurExpression;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    // Constantes + fonctions (le parseur tranche, insensible à la casse)
    Ident(String),

    // Tableau littéral "[1,-2.5,3]" : un seul jeton, au moins un élément
    Tableau(Vec<f64>),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^

    LPar,
    RPar,
    Virgule,
}

fn erreur(msg: impl Into<String>) -> ErreurExpression {
    ErreurExpression::Jetons(msg.into())
}

/// Lit un décimal à partir de `chars[*i]` : chiffres avec au plus un point,
/// pas de notation exponentielle. Avance `*i` après le nombre.
fn lire_nombre(chars: &[char], i: &mut usize) -> Result<f64, ErreurExpression> {
    let start = *i;
    let mut points = 0;
    while *i < chars.len() && (chars[*i].is_ascii_digit() || chars[*i] == '.') {
        if chars[*i] == '.' {
            points += 1;
        }
        *i += 1;
    }
    let texte: String = chars[start..*i].iter().collect();

    if points > 1 {
        return Err(erreur(format!("nombre mal formé: '{texte}'")));
    }
    if !texte.chars().any(|c| c.is_ascii_digit()) {
        return Err(erreur(format!("nombre sans chiffre: '{texte}'")));
    }

    let x: f64 = texte
        .parse()
        .map_err(|_| erreur(format!("nombre invalide: '{texte}'")))?;
    if !x.is_finite() {
        return Err(erreur(format!("nombre trop grand: '{texte}'")));
    }
    Ok(x)
}

/// Lit "[n1,n2,...]" à partir du '['. Chaque élément peut porter un '-' de tête.
fn lire_tableau(chars: &[char], i: &mut usize) -> Result<Vec<f64>, ErreurExpression> {
    let start = *i;
    *i += 1; // '['

    let mut valeurs = Vec::new();
    loop {
        if *i >= chars.len() {
            return Err(erreur("tableau littéral non fermé"));
        }
        if chars[*i] == ']' && valeurs.is_empty() {
            return Err(erreur("tableau littéral vide"));
        }

        let negatif = chars[*i] == '-';
        if negatif {
            *i += 1;
        }
        if *i >= chars.len() || !(chars[*i].is_ascii_digit() || chars[*i] == '.') {
            let vu: String = chars[start..(*i + 1).min(chars.len())].iter().collect();
            return Err(erreur(format!("tableau littéral mal formé: '{vu}'")));
        }
        let x = lire_nombre(chars, i)?;
        valeurs.push(if negatif { -x } else { x });

        match chars.get(*i) {
            Some(',') => *i += 1,
            Some(']') => {
                *i += 1;
                return Ok(valeurs);
            }
            Some(c) => {
                return Err(erreur(format!(
                    "caractère inattendu dans un tableau littéral: '{c}'"
                )))
            }
            None => return Err(erreur("tableau littéral non fermé")),
        }
    }
}

/// Tokenize une chaîne en jetons.
/// Supporte (dans cet ordre de priorité, après suppression des espaces):
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]*
/// - nombres décimaux (un point au plus, pas d’exposant)
/// - tableaux littéraux [1,-2,3.5]
/// - opérateurs + - * / ^, parenthèses ( ), virgule
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurExpression> {
    let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
    let mut out = Vec::new();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        // Identifiants ASCII
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            out.push(Tok::Ident(chars[start..i].iter().collect()));
            continue;
        }

        // Nombre
        if c.is_ascii_digit() || c == '.' {
            out.push(Tok::Num(lire_nombre(&chars, &mut i)?));
            continue;
        }

        // Tableau littéral
        if c == '[' {
            out.push(Tok::Tableau(lire_tableau(&chars, &mut i)?));
            continue;
        }

        let t = match c {
            '+' => Tok::Plus,
            '-' => Tok::Minus,
            '*' => Tok::Star,
            '/' => Tok::Slash,
            '^' => Tok::Caret,
            '(' => Tok::LPar,
            ')' => Tok::RPar,
            ',' => Tok::Virgule,
            _ => return Err(erreur(format!("caractère inattendu: '{c}'"))),
        };
        out.push(t);
        i += 1;
    }

    if out.is_empty() {
        return Err(erreur("entrée vide"));
    }
    Ok(out)
}

/// Texte d’un jeton (messages d’erreur + démarche).
pub fn format_token(t: &Tok) -> String {
    match t {
        Tok::Num(x) => format!("{x}"),
        Tok::Ident(name) => name.clone(),
        Tok::Tableau(v) => {
            let elems: Vec<String> = v.iter().map(|x| format!("{x}")).collect();
            format!("[{}]", elems.join(","))
        }

        Tok::Plus => "+".to_string(),
        Tok::Minus => "-".to_string(),
        Tok::Star => "*".to_string(),
        Tok::Slash => "/".to_string(),
        Tok::Caret => "^".to_string(),

        Tok::LPar => "(".to_string(),
        Tok::RPar => ")".to_string(),
        Tok::Virgule => ",".to_string(),
    }
}

/// Format utilitaire (“démarche”) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let out: Vec<String> = tokens.iter().map(format_token).collect();
    out.join(" ")
}
