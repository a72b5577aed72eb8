//! Named sets of block types for random substitution.

use indexmap::IndexSet;

use crate::util::Rand;
use crate::key::Key;


/// An immutable, insertion-ordered set of candidate block types. The order is
/// part of the sampling contract: for a given tag and seed, the same member
/// comes out.
#[derive(Debug, Clone)]
pub struct TagSet {
    key: Key,
    members: IndexSet<Key>,
}

impl TagSet {

    pub fn new(key: Key, members: impl IntoIterator<Item = Key>) -> Self {
        Self { key, members: members.into_iter().collect() }
    }

    #[inline]
    pub fn key(&self) -> &Key {
        &self.key
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[inline]
    pub fn contains(&self, key: &Key) -> bool {
        self.members.contains(key)
    }

    pub fn members(&self) -> impl Iterator<Item = &Key> {
        self.members.iter()
    }

}


/// Error type for tag sampling.
#[derive(thiserror::Error, Debug)]
pub enum SampleError {
    /// The blacklist removed every member of the tag. The caller decides
    /// whether to skip the block or abort the structure.
    #[error("tag {tag} has no members left after exclusions")]
    Exhausted { tag: Key },
}

/// Pick a uniformly random member of the tag whose identifier is not
/// blacklisted. An exhausted candidate set is a configuration error, never a
/// silent default.
pub fn sample_excluding<'a>(tag: &'a TagSet, rand: &mut Rand, blacklist: &[Key]) -> Result<&'a Key, SampleError> {

    let candidates: Vec<&Key> = tag.members()
        .filter(|key| !blacklist.contains(key))
        .collect();

    if candidates.is_empty() {
        return Err(SampleError::Exhausted { tag: tag.key().clone() });
    }

    Ok(candidates[rand.next_int_bounded(candidates.len() as i32) as usize])

}


#[cfg(test)]
mod tests {

    use super::*;

    fn mossy() -> TagSet {
        TagSet::new(Key::new("core", "mossy"), [
            Key::new("core", "mossy_cobblestone"),
            Key::new("core", "mossy_stone_bricks"),
            Key::new("core", "mossy_andesite"),
        ])
    }

    #[test]
    fn never_samples_a_blacklisted_member() {
        let tag = mossy();
        let blacklist = [Key::new("core", "mossy_andesite")];
        let mut rand = Rand::new(164567);
        for _ in 0..256 {
            let key = sample_excluding(&tag, &mut rand, &blacklist).unwrap();
            assert!(tag.contains(key));
            assert_ne!(*key, blacklist[0]);
        }
    }

    #[test]
    fn full_blacklist_is_a_configuration_error() {
        let tag = mossy();
        let blacklist: Vec<Key> = tag.members().cloned().collect();
        let mut rand = Rand::new(164567);
        let err = sample_excluding(&tag, &mut rand, &blacklist).unwrap_err();
        let SampleError::Exhausted { tag } = err;
        assert_eq!(tag, Key::new("core", "mossy"));
    }

    #[test]
    fn sampling_is_reproducible() {
        let tag = mossy();
        let a: Vec<_> = {
            let mut rand = Rand::new(7);
            (0..32).map(|_| sample_excluding(&tag, &mut rand, &[]).unwrap().clone()).collect()
        };
        let mut rand = Rand::new(7);
        for expected in a {
            assert_eq!(*sample_excluding(&tag, &mut rand, &[]).unwrap(), expected);
        }
    }

}
