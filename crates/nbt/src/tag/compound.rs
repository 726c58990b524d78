use indexmap::IndexMap;

use crate::error::StructureError;
use crate::tag::Tag;

/// An NBT `Compound`: an ordered string-keyed map of tags. Order is always preserved, so
/// re-saving a file without touching a key never reorders it and produces a minimal diff.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compound(IndexMap<String, Tag>);

impl Compound {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Inserts a tag, returning whichever tag previously occupied that key. The key's position
    /// is unchanged if it already existed; otherwise it's appended.
    pub fn insert(&mut self, name: impl Into<String>, tag: impl Into<Tag>) -> Option<Tag> {
        self.0.insert(name.into(), tag.into())
    }

    /// Removes a tag from the map, shifting later entries down to preserve order.
    pub fn remove(&mut self, name: &str) -> Option<Tag> {
        self.0.shift_remove(name)
    }

    pub fn get_tag(&self, name: &str) -> Option<&Tag> {
        self.0.get(name)
    }

    pub fn get_tag_mut(&mut self, name: &str) -> Option<&mut Tag> {
        self.0.get_mut(name)
    }

    /// Looks up a tag by name and casts it to the requested type, failing with
    /// `StructureError::MissingTag` if absent or `WrongKind` if present under a different kind.
    pub fn get<'a, T>(&'a self, name: &str) -> Result<T, StructureError>
    where
        T: TryFrom<&'a Tag, Error = StructureError>,
    {
        let tag = self.0.get(name).ok_or_else(|| StructureError::missing_tag(name))?;
        T::try_from(tag)
    }

    pub fn get_mut<'a, T>(&'a mut self, name: &str) -> Result<T, StructureError>
    where
        T: TryFrom<&'a mut Tag, Error = StructureError>,
    {
        let tag = self.0.get_mut(name).ok_or_else(|| StructureError::missing_tag(name))?;
        T::try_from(tag)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Tag> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, String, Tag> {
        self.0.iter_mut()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Tag> {
        self.0.keys()
    }
}

impl<'a> IntoIterator for &'a Compound {
    type Item = (&'a String, &'a Tag);
    type IntoIter = indexmap::map::Iter<'a, String, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Compound {
    type Item = (String, Tag);
    type IntoIter = indexmap::map::IntoIter<String, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(String, Tag)> for Compound {
    fn from_iter<I: IntoIterator<Item = (String, Tag)>>(iter: I) -> Self {
        Self(IndexMap::from_iter(iter))
    }
}
