//! Removal of Education Edition markers from a level.dat root.

use nbt::Compound;

/// Root-level keys that mark a world as Education Edition.
///
/// Removal is not recursive: only direct children of the root compound
/// are considered, matching how the game reads these flags.
pub const EDUCATION_KEYS: [&str; 3] = [
    "eduOffer",
    "eduSharedResource",
    "educationFeaturesEnabled",
];

/// Removes the Education Edition keys from `root`, preserving the order
/// of all other entries.
///
/// Returns the keys that were actually present and removed, in
/// [`EDUCATION_KEYS`] order. A root without any of the keys is returned
/// untouched, which makes the operation idempotent.
pub fn strip_education_keys(root: &mut Compound) -> Vec<&'static str> {
    let mut removed = Vec::new();
    for key in EDUCATION_KEYS {
        if root.shift_remove(key).is_some() {
            removed.push(key);
        }
    }
    removed
}

/// Returns `true` if `root` still carries any Education Edition key.
#[must_use]
pub fn has_education_keys(root: &Compound) -> bool {
    EDUCATION_KEYS.iter().any(|key| root.contains_key(*key))
}
