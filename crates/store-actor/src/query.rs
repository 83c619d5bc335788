//! # Query Types
//!
//! Plain data describing a scan over an actor's documents: a filter, an optional sort,
//! and a `skip`/`limit` window. The filter and sort vocabularies belong to the entity
//! (see [`StoredEntity::Filter`] and [`StoredEntity::Sort`]).

use crate::entity::StoredEntity;
use std::cmp::Ordering;
use std::fmt;

/// Direction applied on top of [`StoredEntity::compare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

/// How a `Put` request treats an existing document under the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutMode {
    /// Insert or overwrite in place.
    Upsert,
    /// Insert only when the key is vacant; an existing document is left untouched.
    IfAbsent,
}

/// A filtered, optionally sorted, windowed scan.
pub struct Query<T: StoredEntity> {
    pub filter: T::Filter,
    pub sort: Option<(T::Sort, SortOrder)>,
    pub skip: usize,
    pub limit: Option<usize>,
}

impl<T: StoredEntity> fmt::Debug for Query<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("filter", &self.filter)
            .field("sort", &self.sort)
            .field("skip", &self.skip)
            .field("limit", &self.limit)
            .finish()
    }
}

impl<T: StoredEntity> Query<T> {
    /// All documents matching `filter`, in unspecified order.
    pub fn filtered(filter: T::Filter) -> Self {
        Self {
            filter,
            sort: None,
            skip: 0,
            limit: None,
        }
    }

    pub fn sorted(mut self, sort: T::Sort, order: SortOrder) -> Self {
        self.sort = Some((sort, order));
        self
    }

    pub fn skip(mut self, skip: usize) -> Self {
        self.skip = skip;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Evaluates the query against an iterator of documents.
    pub fn run<'a, I>(&self, items: I) -> Vec<T>
    where
        I: IntoIterator<Item = &'a T>,
    {
        let mut matched: Vec<T> = items
            .into_iter()
            .filter(|item| item.matches(&self.filter))
            .cloned()
            .collect();
        if let Some((sort, order)) = &self.sort {
            matched.sort_by(|a, b| order.apply(a.compare(b, sort)));
        }
        let window = matched.into_iter().skip(self.skip);
        match self.limit {
            Some(limit) => window.take(limit).collect(),
            None => window.collect(),
        }
    }
}
