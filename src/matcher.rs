//! Morphology-aware find and replace over a single identifier or comment text.

use crate::inflect::{last_identifier, lower_camel, Pluralization};

/// One spelling of the `from` identifier and what it is rewritten to.
#[derive(Debug)]
struct Form {
    find: String,
    replace: String,
    /// Lower-camel forms only match at the start of an identifier word.
    word_start: bool,
}

/// The spellings of a `(from, to)` pair, in matching priority.
///
/// The plural and literal spellings match anywhere in a token, as plain
/// substrings. The lower-camel spellings (`item`, `items` for `Item`) match
/// only as whole identifier words: `itemCount` and `items` are rewritten,
/// `itemize` and `subitem` are not. A qualified `to` such as `models.User`
/// contributes only its last identifier (`user`) to the lower-camel forms.
#[derive(Debug)]
pub struct Morphology {
    from: String,
    to: String,
    forms: Vec<Form>,
}

impl Morphology {
    pub fn new(from: &str, to: &str, pluralization: Pluralization) -> Self {
        let mut forms: Vec<Form> = Vec::with_capacity(4);
        let mut push = |find: String, replace: String, word_start: bool| {
            if find.is_empty() || forms.iter().any(|f| f.find == find) {
                return;
            }
            forms.push(Form { find, replace, word_start });
        };

        let plural_from = pluralization.pluralize(from);
        let plural_to = pluralization.pluralize(to);
        // The plural is a superstring of the singular and has to win.
        if plural_from != from {
            push(plural_from.clone(), plural_to.clone(), false);
        }
        push(from.to_string(), to.to_string(), false);
        push(lower_camel(&plural_from), lower_camel(last_identifier(&plural_to)), true);
        push(lower_camel(from), lower_camel(last_identifier(to)), true);

        Self { from: from.to_string(), to: to.to_string(), forms }
    }

    /// Rewrites every occurrence of any form of `from` in `token`.
    pub fn apply(&self, token: &str) -> String {
        if self.from.is_empty() {
            return token.to_string();
        }
        if token == self.from {
            return self.to.clone();
        }

        let mut out = String::with_capacity(token.len());
        let mut rest = token;
        let mut prev: Option<char> = None;
        'scan: while !rest.is_empty() {
            for form in &self.forms {
                if !rest.starts_with(&form.find) {
                    continue;
                }
                let next = rest[form.find.len()..].chars().next();
                if form.word_start && !(starts_word(prev) && ends_word(next)) {
                    continue;
                }
                out.push_str(&form.replace);
                prev = form.find.chars().last();
                rest = &rest[form.find.len()..];
                continue 'scan;
            }
            let ch = rest.chars().next().unwrap_or_default();
            out.push(ch);
            prev = Some(ch);
            rest = &rest[ch.len_utf8()..];
        }
        out
    }
}

fn starts_word(prev: Option<char>) -> bool {
    prev.is_none_or(|c| !c.is_alphanumeric())
}

fn ends_word(next: Option<char>) -> bool {
    next.is_none_or(|c| !c.is_alphanumeric() || c.is_uppercase())
}

/// Rewrites `token` for a single `(from, to)` pair.
///
/// Exact matches become `to`. Otherwise every occurrence of the plural,
/// literal and lower-camel spellings of `from` is replaced, scanning left to
/// right without overlap; at each position the plural spelling is tried
/// before the singular one so `Items` becomes `Orders`, not `OrderS`.
pub fn match_and_replace(
    token: &str,
    from: &str,
    to: &str,
    pluralization: Pluralization,
) -> String {
    Morphology::new(from, to, pluralization).apply(token)
}
