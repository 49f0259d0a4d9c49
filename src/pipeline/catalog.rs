//! Ordered icon catalog and category index.
//!
//! Both serialize as JSON objects in insertion order. Re-inserting a name
//! replaces the earlier record in place.

use rustc_hash::FxHashMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::svg::IconRecord;

#[derive(Debug, Default)]
pub struct IconCatalog {
    entries: Vec<Entry>,
    index: FxHashMap<String, usize>,
}

#[derive(Debug)]
struct Entry {
    name: String,
    /// Directory category, empty for icons in the input root.
    source_category: String,
    record: IconRecord,
}

impl IconCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, returning the one it replaced.
    pub fn insert(
        &mut self,
        name: String,
        source_category: &str,
        record: IconRecord,
    ) -> Option<IconRecord> {
        match self.index.get(&name) {
            Some(&slot) => {
                let entry = &mut self.entries[slot];
                entry.source_category = source_category.to_owned();
                Some(std::mem::replace(&mut entry.record, record))
            }
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push(Entry {
                    name,
                    source_category: source_category.to_owned(),
                    record,
                });
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&IconRecord> {
        self.index.get(name).map(|&slot| &self.entries[slot].record)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &IconRecord)> {
        self.entries.iter().map(|e| (e.name.as_str(), &e.record))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn complex_count(&self) -> usize {
        self.entries.iter().filter(|e| e.record.is_complex).count()
    }

    /// Category → icon names, categories in order of first appearance.
    /// Records without a source category are left out.
    pub fn categories(&self) -> CategoryIndex {
        let mut index = CategoryIndex::default();
        for entry in self.entries.iter().filter(|e| !e.source_category.is_empty()) {
            index.push(&entry.source_category, &entry.name);
        }
        index
    }
}

impl Serialize for IconCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.name, &entry.record)?;
        }
        map.end()
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct CategoryIndex {
    categories: Vec<(String, Vec<String>)>,
}

impl CategoryIndex {
    fn push(&mut self, category: &str, name: &str) {
        match self.categories.iter_mut().find(|(c, _)| c == category) {
            Some((_, names)) => names.push(name.to_owned()),
            None => self
                .categories
                .push((category.to_owned(), vec![name.to_owned()])),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(c, _)| c.as_str())
    }

    pub fn get(&self, category: &str) -> Option<&[String]> {
        self.categories
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, names)| names.as_slice())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }
}

impl Serialize for CategoryIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for (category, names) in &self.categories {
            map.serialize_entry(category, names)?;
        }
        map.end()
    }
}
