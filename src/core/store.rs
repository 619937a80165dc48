use std::fmt;

use hashbrown::HashMap;

use crate::{
    person::{Person, PersonDraft},
    types::PersonId,
};

/// Store lookup and construction failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No record carries this id.
    NotFound(PersonId),
    /// Two initial records share this id.
    DuplicateId(PersonId),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound(id) => write!(f, "Person with id {id} not found"),
            StoreError::DuplicateId(id) => write!(f, "Person with id {id} already exists"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Ordered person collection with an id -> position index.
///
/// New records go to the front; updates replace in place.
#[derive(Debug, Default, Clone)]
pub struct PersonStore {
    people: Vec<Person>,
    pos: HashMap<PersonId, usize>,
}

impl PersonStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with the sample roster.
    pub fn seeded() -> Self {
        Self::from_people(super::seed::sample_people()).expect("sample ids are unique")
    }

    /// Builds a store from records whose ids are already assigned.
    pub fn from_people(people: Vec<Person>) -> Result<Self, StoreError> {
        let mut pos = HashMap::with_capacity(people.len());
        for (idx, person) in people.iter().enumerate() {
            if pos.insert(person.id, idx).is_some() {
                return Err(StoreError::DuplicateId(person.id));
            }
        }
        Ok(Self { people, pos })
    }

    /// Records in store order.
    pub fn all(&self) -> &[Person] {
        &self.people
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.people.len()
    }

    /// True when no records are held.
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Record with `id`, if present.
    pub fn get(&self, id: PersonId) -> Option<&Person> {
        self.pos.get(&id).map(|idx| &self.people[*idx])
    }

    /// Like [`PersonStore::get`] but fails with [`StoreError::NotFound`].
    pub fn find_by_id(&self, id: PersonId) -> Result<&Person, StoreError> {
        self.get(id).ok_or(StoreError::NotFound(id))
    }

    /// Highest assigned id, 0 when empty.
    pub fn max_id(&self) -> PersonId {
        self.people.iter().map(|p| p.id).max().unwrap_or(0)
    }

    /// Assigns `max_id() + 1`, stores the record at the front and returns it.
    pub fn insert(&mut self, draft: PersonDraft) -> &Person {
        let id = self.max_id().saturating_add(1);
        self.people.insert(0, Person::from_draft(id, draft));
        self.reindex_from(0);
        &self.people[0]
    }

    /// Replaces the record with `person.id` wholesale and returns its position.
    pub fn update(&mut self, person: Person) -> Result<usize, StoreError> {
        let idx = *self
            .pos
            .get(&person.id)
            .ok_or(StoreError::NotFound(person.id))?;
        self.people[idx] = person;
        Ok(idx)
    }

    /// Removes and returns the record with `id`.
    pub fn delete_by_id(&mut self, id: PersonId) -> Result<Person, StoreError> {
        let idx = self.pos.remove(&id).ok_or(StoreError::NotFound(id))?;
        let removed = self.people.remove(idx);
        self.reindex_from(idx);
        Ok(removed)
    }

    fn reindex_from(&mut self, start: usize) {
        for (idx, person) in self.people.iter().enumerate().skip(start) {
            self.pos.insert(person.id, idx);
        }
    }
}
