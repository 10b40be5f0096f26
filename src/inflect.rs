use cruet::string::pluralize::to_plural;
use serde::Deserialize;

/// How the plural form of an identifier is derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum Pluralization {
    /// Regular English suffix rules only, no irregular lexicon.
    #[default]
    Regular,
    /// Full inflector including irregular nouns (`Person` -> `People`).
    Inflected,
}

impl std::fmt::Display for Pluralization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Pluralization::Regular => "regular",
            Pluralization::Inflected => "inflected",
        };
        write!(f, "{s}")
    }
}

impl Pluralization {
    pub fn pluralize(self, word: &str) -> String {
        match self {
            Pluralization::Regular => regular_plural(word),
            Pluralization::Inflected => inflected_plural(word),
        }
    }
}

/// Pluralizes the last word of an identifier with cruet's lexicon, which
/// only knows lowercase words, then restores the original casing.
/// `OrderPerson` gives `OrderPeople`, `UserID` gives `UserIDs`.
fn inflected_plural(word: &str) -> String {
    let start = last_word_start(word);
    let (head, last) = word.split_at(start);
    if last.is_empty() {
        return regular_plural(word);
    }
    let lower = last.to_lowercase();
    let plural = to_plural(&lower);
    if plural.is_empty() {
        return regular_plural(word);
    }
    if let Some(suffix) = plural.strip_prefix(lower.as_str()) {
        return format!("{word}{suffix}");
    }

    let cased = if last.chars().count() > 1 && last.chars().all(|c| !c.is_lowercase()) {
        plural.to_uppercase()
    } else if last.starts_with(char::is_uppercase) {
        capitalize(&plural)
    } else {
        plural
    };
    format!("{head}{cased}")
}

/// Byte offset where the last word of a camel or snake cased identifier
/// begins: `OrderPerson` -> 5, `HTTPServer` -> 4, `T__` -> 3.
fn last_word_start(word: &str) -> usize {
    let chars: Vec<(usize, char)> = word.char_indices().collect();
    let mut start = 0;
    for (i, &(idx, c)) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            start = idx + c.len_utf8();
            continue;
        }
        if !c.is_uppercase() || i == 0 {
            continue;
        }
        let prev = chars[i - 1].1;
        let next = chars.get(i + 1).map(|&(_, n)| n);
        if prev.is_lowercase()
            || prev.is_ascii_digit()
            || (prev.is_uppercase() && next.is_some_and(char::is_lowercase))
        {
            start = idx;
        }
    }
    start
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The last identifier segment of a type expression: `models.User`,
/// `*User` and `[]User` all give `User`.
pub fn last_identifier(expr: &str) -> &str {
    expr.rsplit(|c: char| !(c.is_alphanumeric() || c == '_'))
        .find(|segment| !segment.is_empty())
        .unwrap_or(expr)
}

/// Applies the regular English plural suffix rules.
pub fn regular_plural(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    let lower = word.to_lowercase();
    if ["s", "x", "z", "ch", "sh"].iter().any(|suffix| lower.ends_with(suffix)) {
        return format!("{word}es");
    }
    let mut tail = lower.chars().rev();
    if let (Some('y'), Some(prev)) = (tail.next(), tail.next()) {
        if !"aeiou".contains(prev) {
            return format!("{}ies", &word[..word.len() - 1]);
        }
    }
    format!("{word}s")
}

/// Lower camel case form of an identifier (`OrderItem` -> `orderItem`).
///
/// Only the leading capital run is lowered; when it is an acronym followed
/// by another word its last capital stays (`HTTPServer` -> `httpServer`,
/// `UserID` -> `userID`). Separators between words are collapsed; leading
/// and trailing separators are kept, so the marker `T__` becomes `t__`
/// rather than `t`.
pub fn lower_camel(word: &str) -> String {
    let core = word.trim_matches(|c: char| !c.is_alphanumeric());
    if core.is_empty() {
        return word.to_string();
    }
    let start = word.len() - word.trim_start_matches(|c: char| !c.is_alphanumeric()).len();
    let end = start + core.len();

    let mut camel = String::with_capacity(core.len());
    let parts = core.split(|c: char| !c.is_alphanumeric()).filter(|p| !p.is_empty());
    for (i, part) in parts.enumerate() {
        if i == 0 {
            camel.push_str(&lower_leading_run(part));
        } else {
            camel.push_str(&capitalize(part));
        }
    }
    format!("{}{}{}", &word[..start], camel, &word[end..])
}

fn lower_leading_run(part: &str) -> String {
    let chars: Vec<char> = part.chars().collect();
    let run = chars.iter().take_while(|c| c.is_uppercase()).count();
    let lowered = match chars.get(run) {
        Some(next) if run > 1 && next.is_lowercase() => run - 1,
        _ => run,
    };
    let mut out = String::with_capacity(part.len());
    for (i, c) in chars.into_iter().enumerate() {
        if i < lowered {
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
