//! The name grammars shared by types, members and packages.

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[inline]
fn is_word(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_word_char)
}

/// Check if the given name is a valid member name.
///
/// Member names are made of word characters, `_` and `$`,
/// along with `<` and `>` so that `<init>` and `<clinit>` are accepted.
pub fn is_valid_identifier(name: &str) -> bool {
    !name.is_empty() && name.chars()
        .all(|c| is_word_char(c) || c == '$' || c == '<' || c == '>')
}

/// Check if the given dotted name is a valid reference type name,
/// matching `(ident[.$])*ident`.
pub fn is_valid_type_name(name: &str) -> bool {
    name.split(|c| c == '.' || c == '$').all(is_word)
}

/// Check if the given dotted name is a valid package, where the empty string is the default package.
pub fn is_valid_package(name: &str) -> bool {
    name.is_empty() || name.split('.').all(is_word)
}
