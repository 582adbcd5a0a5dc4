// src/noyau/format.rs

/// Lecture d’un résultat :
/// - `None`    : forme la plus courte qui relit la même valeur (jamais d’exposant)
/// - `Some(n)` : arrondi à n chiffres après la virgule, zéros finaux retirés
pub fn format_resultat(x: f64, chiffres: Option<usize>) -> String {
    let texte = match chiffres {
        None => format!("{x}"),
        Some(n) => format!("{x:.n$}"),
    };

    let texte = if chiffres.is_some() && texte.contains('.') {
        texte.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        texte
    };

    // zéro négatif, direct ou après arrondi d’un petit négatif
    if texte == "-0" {
        "0".to_string()
    } else {
        texte
    }
}
