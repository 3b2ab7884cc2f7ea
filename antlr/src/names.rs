//! Naming policy for emitted rules.

/// Canonical lexer token name: `"simple comment"` becomes `SIMPLE_COMMENT`.
///
/// Runs of hyphens and spaces collapse to a single underscore. Applying the
/// function to its own output changes nothing.
pub fn token_identifier(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_run = false;
    for c in name.to_lowercase().chars() {
        if c == '-' || c == ' ' {
            if !in_run {
                out.push('_');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out.to_uppercase()
}

/// Parser rule name: `"graph pattern/where-clause"` becomes
/// `graphPatternWhereClause`.
pub fn rule_identifier(name: &str) -> String {
    let spaced = name.replace(|c: char| c == '-' || c == '/', " ");
    let mut words = spaced.split(' ').filter(|w| !w.is_empty());
    let mut out = words.next().map(str::to_owned).unwrap_or_default();
    for word in words {
        out.push_str(&capitalize(word));
    }
    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
