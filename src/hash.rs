use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;

/// Hash whatever `f` feeds into a fresh `DefaultHasher`.
///
/// `DefaultHasher::new()` uses fixed keys, so the result is stable for a given
/// build of the crate. That is enough for change tokens, which never outlive
/// the process that computed them.
pub fn stable_hash_with(f: impl FnOnce(&mut DefaultHasher)) -> u64 {
    let mut hasher = DefaultHasher::new();
    f(&mut hasher);
    hasher.finish()
}

/// Feed a path into `hasher` using its lossy string form.
pub fn hash_path(hasher: &mut DefaultHasher, path: &Path) {
    path.to_string_lossy().hash(hasher);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_inputs_hash_equal_and_order_matters() {
        let left = stable_hash_with(|hasher| {
            hash_path(hasher, Path::new("/data/prompts"));
            42_u64.hash(hasher);
        });
        let again = stable_hash_with(|hasher| {
            hash_path(hasher, Path::new("/data/prompts"));
            42_u64.hash(hasher);
        });
        let swapped = stable_hash_with(|hasher| {
            42_u64.hash(hasher);
            hash_path(hasher, Path::new("/data/prompts"));
        });
        assert_eq!(left, again);
        assert_ne!(left, swapped);
    }
}
