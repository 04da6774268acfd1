use std::borrow::Cow;

/// Removes every whitespace character from `value`, including whitespace inside it.
pub fn strip_whitespace(value: &str) -> Cow<'_, str> {
    if value.chars().any(char::is_whitespace) {
        Cow::Owned(value.chars().filter(|c| !c.is_whitespace()).collect())
    } else {
        Cow::Borrowed(value)
    }
}

/// Quotes `value` so that it can be pasted into a POSIX shell.
/// Values consisting only of "safe" characters are returned unchanged.
pub fn shell_quote(value: &str) -> Cow<'_, str> {
    let is_safe = |c: char| c.is_ascii_alphanumeric() || "-_./:=,@%+".contains(c);
    if !value.is_empty() && value.chars().all(is_safe) {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(format!("'{}'", value.replace('\'', r#"'\''"#)))
    }
}
