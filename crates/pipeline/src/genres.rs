//! Turning the free-text genre answer into a genre selection.

use data_loader::Genre;

/// Parse a comma-separated genre list against the whitelist.
///
/// Entries are trimmed and must match a whitelisted label exactly (case
/// included); anything else is ignored. The result keeps the order the user
/// typed, with repeats removed.
///
/// ```
/// use data_loader::Genre;
/// use pipeline::select_genres;
///
/// let picked = select_genres("Drama, Western,Action ,Drama");
/// assert_eq!(picked, vec![Genre::Drama, Genre::Action]);
/// ```
pub fn select_genres(input: &str) -> Vec<Genre> {
    let mut selected = Vec::new();
    for entry in input.split(',') {
        if let Ok(genre) = entry.trim().parse::<Genre>() {
            if !selected.contains(&genre) {
                selected.push(genre);
            }
        }
    }
    selected
}
