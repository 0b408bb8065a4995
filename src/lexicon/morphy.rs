// lexicon/morphy.rs - Morphological Reduction
// Reduces an inflected form to the base forms present in the database:
// exception lists first, then suffix substitution rules.

use std::collections::HashMap;

use super::Pos;

/// Suffix substitutions per part of speech, tried in order
fn substitutions(pos: Pos) -> &'static [(&'static str, &'static str)] {
    match pos.file_pos() {
        Pos::Noun => &[
            ("s", ""),
            ("ses", "s"),
            ("ves", "f"),
            ("xes", "x"),
            ("zes", "z"),
            ("ches", "ch"),
            ("shes", "sh"),
            ("men", "man"),
            ("ies", "y"),
        ],
        Pos::Verb => &[
            ("s", ""),
            ("ies", "y"),
            ("es", "e"),
            ("es", ""),
            ("ed", "e"),
            ("ed", ""),
            ("ing", "e"),
            ("ing", ""),
        ],
        Pos::Adjective => &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")],
        _ => &[],
    }
}

fn apply_rules(forms: &[String], pos: Pos) -> Vec<String> {
    let rules = substitutions(pos);
    forms
        .iter()
        .flat_map(|form| {
            rules.iter().filter_map(move |(old, new)| {
                form.strip_suffix(old).map(|stem| format!("{}{}", stem, new))
            })
        })
        .collect()
}

fn filter_known<F>(forms: Vec<String>, is_known: &F) -> Vec<String>
where
    F: Fn(&str) -> bool,
{
    let mut result: Vec<String> = Vec::new();
    for form in forms {
        if is_known(&form) && !result.contains(&form) {
            result.push(form);
        }
    }
    result
}

/// Base forms of `form` for `pos`, in the order they should be looked up.
/// `is_known` tells whether a base form has senses for this part of speech.
pub fn base_forms<F>(
    form: &str,
    pos: Pos,
    exceptions: Option<&HashMap<String, Vec<String>>>,
    is_known: F,
) -> Vec<String>
where
    F: Fn(&str) -> bool,
{
    if let Some(bases) = exceptions.and_then(|exc| exc.get(form)) {
        let mut forms = vec![form.to_string()];
        forms.extend(bases.iter().cloned());
        return filter_known(forms, &is_known);
    }

    let mut forms = apply_rules(&[form.to_string()], pos);
    let mut candidates = vec![form.to_string()];
    candidates.extend(forms.iter().cloned());
    let results = filter_known(candidates, &is_known);
    if !results.is_empty() {
        return results;
    }

    // Every rule shortens the form, so this terminates
    while !forms.is_empty() {
        forms = apply_rules(&forms, pos);
        let results = filter_known(forms.clone(), &is_known);
        if !results.is_empty() {
            return results;
        }
    }
    Vec::new()
}
