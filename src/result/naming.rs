//! Column name canonicalization.
//!
//! Raw MySQL column names are usually snake_case. Framework callers see them
//! as camelCase.
//!
//! # Rule
//!
//! 1. The name is split into segments on every non-alphanumeric character.
//! 2. Each segment is split again wherever a cased capital (any character
//!    with a different lowercase form, titlecase `ǅ` included) follows one
//!    that is not (`firstName` -> `first`, `Name`).
//! 3. The first word is lowercased. Every later word gets its first character
//!    uppercased and keeps the rest untouched.
//! 4. Anything the case mapping produces that is not alphanumeric (the
//!    combining dot of a lowercased `İ`, say) is dropped.
//!
//! Because later words keep their tails, canonicalizing an already canonical
//! name returns it unchanged (`userID` stays `userID`, `userId` stays `userId`).

/// Convert a raw column name to its camelCase form.
///
/// Total over all inputs: an empty or all-separator name yields `""`.
pub fn to_camel_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());

    for (idx, word) in split_words(raw).into_iter().enumerate() {
        if idx == 0 {
            out.extend(
                word.chars()
                    .flat_map(char::to_lowercase)
                    .filter(|c| c.is_alphanumeric()),
            );
            continue;
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase().filter(|c| c.is_alphanumeric()));
            out.push_str(chars.as_str());
        }
    }

    out
}

fn is_capital(c: char) -> bool {
    !c.to_lowercase().eq(std::iter::once(c))
}

fn split_words(raw: &str) -> Vec<&str> {
    let mut words = Vec::new();

    for segment in raw.split(|c: char| !c.is_alphanumeric()) {
        if segment.is_empty() {
            continue;
        }

        let mut start = 0;
        let mut prev: Option<char> = None;
        for (idx, ch) in segment.char_indices() {
            if let Some(p) = prev {
                if is_capital(ch) && !is_capital(p) {
                    words.push(&segment[start..idx]);
                    start = idx;
                }
            }
            prev = Some(ch);
        }
        words.push(&segment[start..]);
    }

    words
}
