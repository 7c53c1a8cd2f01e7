//! Inverted Index & Ranking
//!
//! One posting map per searchable field: token -> picture ids, in insertion order.
//! Postings are not deduplicated. A picture that yields the same token twice is
//! listed twice, and those repeats are exactly what frequency ranking counts.

use super::tokenizer::{tokenize_tags, tokenize_text};
use crate::store::types::Picture;

use std::cmp::Reverse;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A searchable picture field, paired with the tokenizer used for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Author,
    Camera,
    Tags,
}

impl Field {
    /// Every indexed field, in the order searches visit them.
    pub const ALL: [Field; 3] = [Field::Author, Field::Camera, Field::Tags];

    pub fn name(self) -> &'static str {
        match self {
            Field::Author => "author",
            Field::Camera => "camera",
            Field::Tags => "tags",
        }
    }

    pub fn value(self, picture: &Picture) -> &str {
        match self {
            Field::Author => &picture.author,
            Field::Camera => &picture.camera,
            Field::Tags => &picture.tags,
        }
    }

    pub fn tokenize(self, value: &str) -> Vec<String> {
        match self {
            Field::Author | Field::Camera => tokenize_text(value),
            Field::Tags => tokenize_tags(value),
        }
    }

    /// The fields a search should visit: the named one if it exists, otherwise all.
    pub fn select(name: Option<&str>) -> Vec<Field> {
        match name.and_then(|name| name.parse::<Field>().ok()) {
            Some(field) => vec![field],
            None => Field::ALL.to_vec(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
#[error("unknown search field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

pub type Postings = HashMap<String, Vec<String>>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchIndex {
    author: Postings,
    camera: Postings,
    tags: Postings,
}

impl SearchIndex {
    /// Builds a fresh index over `pictures`.
    pub fn build<'a>(pictures: impl IntoIterator<Item = &'a Picture>) -> Self {
        let mut index = Self::default();
        for picture in pictures {
            index.add(picture);
        }
        index
    }

    /// Appends `picture.id` under every token each field produces.
    pub fn add(&mut self, picture: &Picture) {
        for field in Field::ALL {
            let tokens = field.tokenize(field.value(picture));
            let postings = self.postings_mut(field);
            for token in tokens {
                postings.entry(token).or_default().push(picture.id.clone());
            }
        }
    }

    pub fn postings(&self, field: Field) -> &Postings {
        match field {
            Field::Author => &self.author,
            Field::Camera => &self.camera,
            Field::Tags => &self.tags,
        }
    }

    fn postings_mut(&mut self, field: Field) -> &mut Postings {
        match field {
            Field::Author => &mut self.author,
            Field::Camera => &mut self.camera,
            Field::Tags => &mut self.tags,
        }
    }

    /// Ids stored under `token` in `field`, empty if the token is unknown.
    pub fn lookup(&self, field: Field, token: &str) -> &[String] {
        self.postings(field)
            .get(token)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn token_count(&self, field: Field) -> usize {
        self.postings(field).len()
    }

    /// Ranked ids matching `query` across `fields`.
    ///
    /// Each field tokenizes the query with its own tokenizer; every posting hit
    /// counts once. Ids are ordered by hit count, ties by first hit.
    pub fn rank(&self, query: &str, fields: &[Field]) -> Vec<String> {
        let mut hits: Vec<&str> = Vec::new();
        for &field in fields {
            for token in field.tokenize(query) {
                hits.extend(self.lookup(field, &token).iter().map(String::as_str));
            }
        }

        rank_by_frequency(hits)
    }
}

/// Distinct ids by descending occurrence count. Equal counts keep first-seen order.
pub fn rank_by_frequency<'a>(hits: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for id in hits {
        let count = counts.entry(id).or_insert_with(|| {
            order.push(id);
            0
        });
        *count += 1;
    }

    // stable sort
    order.sort_by_key(|id| Reverse(counts[id]));
    order.into_iter().map(str::to_string).collect()
}
