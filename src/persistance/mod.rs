pub mod history;

/// Splits a history line on the first `=` and trims both sides. Returns
/// `None` when the separator is absent.
pub(crate) fn split_entry(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    Some((key.trim(), value.trim()))
}
