use anyhow::{Result, ensure};

use crate::discord::embed::Field;

pub const MAX_FIELDS: usize = 5;

/// Raw text of one name/value input pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldInput {
    pub name: String,
    pub value: String,
}

impl FieldInput {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns `None` if either side is blank.
    fn to_field(&self) -> Option<Field> {
        let name = self.name.trim();
        let value = self.value.trim();
        if name.is_empty() || value.is_empty() {
            return None;
        }
        Some(Field::new(name, value))
    }
}

/// Ordered input pairs, never more than [`MAX_FIELDS`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldList {
    entries: Vec<FieldInput>,
}

impl FieldList {
    /// Appends a pair and returns its index.
    ///
    /// # Errors
    /// The list already holds [`MAX_FIELDS`] pairs.
    pub fn add(&mut self, input: FieldInput) -> Result<usize> {
        ensure!(
            self.entries.len() < MAX_FIELDS,
            "Fields are limited to {MAX_FIELDS}"
        );
        self.entries.push(input);
        Ok(self.entries.len() - 1)
    }

    pub fn remove(&mut self, index: usize) -> Option<FieldInput> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&FieldInput> {
        self.entries.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut FieldInput> {
        self.entries.get_mut(index)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldInput> {
        self.entries.iter()
    }

    /// Builds the embed fields, skipping pairs with a blank name or value.
    #[must_use]
    pub fn to_fields(&self) -> Vec<Field> {
        self.entries.iter().filter_map(FieldInput::to_field).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixth_field_is_rejected() {
        let mut list = FieldList::default();
        for i in 0..MAX_FIELDS {
            assert_eq!(list.add(FieldInput::default()).unwrap(), i);
        }
        let err = list.add(FieldInput::new("six", "6")).unwrap_err();
        assert!(err.to_string().contains("limited to 5"));
        assert_eq!(list.len(), MAX_FIELDS);
    }

    #[test]
    fn remove_keeps_order() {
        let mut list = FieldList::default();
        for name in ["a", "b", "c"] {
            list.add(FieldInput::new(name, "v")).unwrap();
        }
        assert_eq!(list.remove(1), Some(FieldInput::new("b", "v")));
        assert_eq!(list.remove(7), None);
        let names: Vec<_> = list.iter().map(|x| x.name.as_str()).collect();
        assert_eq!(names, ["a", "c"]);
    }

    #[test]
    fn blank_sides_drop_the_pair() {
        let mut list = FieldList::default();
        list.add(FieldInput::new(" name ", " value ")).unwrap();
        list.add(FieldInput::new("   ", "value")).unwrap();
        list.add(FieldInput::new("name", "")).unwrap();
        list.add(FieldInput::new("dup", "1")).unwrap();
        list.add(FieldInput::new("dup", "2")).unwrap();
        assert_eq!(
            list.to_fields(),
            vec![
                Field::new("name", "value"),
                Field::new("dup", "1"),
                Field::new("dup", "2"),
            ]
        );
    }
}
