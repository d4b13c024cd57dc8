use alloc::vec::Vec;
use core::fmt;

use crate::ItemDescriptor;

/// Why a mutation was rejected. A rejected mutation changes nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationError {
    /// `index` is not a valid position for this operation.
    IndexOutOfBounds { index: usize, len: usize },
    /// `index..index + count` is not inside the dataset.
    RangeOutOfBounds {
        index: usize,
        count: usize,
        len: usize,
    },
}

impl fmt::Display for MutationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for dataset of length {len}")
            }
            Self::RangeOutOfBounds { index, count, len } => write!(
                f,
                "range {index}..{index}+{count} out of bounds for dataset of length {len}"
            ),
        }
    }
}

impl core::error::Error for MutationError {}

/// A dataset change, as delivered by a host that forwards mutations as messages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mutation<T> {
    Set(Vec<T>),
    Append(T),
    InsertRange { index: usize, items: Vec<T> },
    RemoveRange { index: usize, count: usize },
    Update { index: usize, item: T },
    Clear,
}

/// The ordered, index-addressed dataset.
///
/// Every operation renumbers the descriptors it moved before returning, so
/// `items()[i].index == i` holds between calls.
#[derive(Clone, Debug)]
pub struct Dataset<T> {
    items: Vec<ItemDescriptor<T>>,
}

impl<T> Default for Dataset<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Dataset<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: impl IntoIterator<Item = T>) -> Self {
        let mut data = Self::new();
        data.set(items);
        data
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ItemDescriptor<T>> {
        self.items.get(index)
    }

    pub fn payload(&self, index: usize) -> Option<&T> {
        self.items.get(index).map(|d| &d.payload)
    }

    pub fn as_slice(&self) -> &[ItemDescriptor<T>] {
        &self.items
    }

    pub fn iter(&self) -> core::slice::Iter<'_, ItemDescriptor<T>> {
        self.items.iter()
    }

    pub fn set(&mut self, items: impl IntoIterator<Item = T>) {
        self.items.clear();
        self.items.extend(
            items
                .into_iter()
                .enumerate()
                .map(|(index, payload)| ItemDescriptor { index, payload }),
        );
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn push(&mut self, payload: T) -> usize {
        let index = self.items.len();
        self.items.push(ItemDescriptor { index, payload });
        index
    }

    /// Inserts `items` before `index` (`index == len` appends).
    ///
    /// Returns the number of inserted items.
    pub fn insert_range(
        &mut self,
        index: usize,
        items: impl IntoIterator<Item = T>,
    ) -> Result<usize, MutationError> {
        let len = self.items.len();
        if index > len {
            return Err(MutationError::IndexOutOfBounds { index, len });
        }
        let tail = self.items.split_off(index);
        self.items.extend(
            items
                .into_iter()
                .map(|payload| ItemDescriptor { index: 0, payload }),
        );
        let count = self.items.len() - index;
        self.items.extend(tail);
        self.renumber_from(index);
        Ok(count)
    }

    /// Removes `index..index + count`. Spans that do not fit are rejected whole.
    pub fn remove_range(
        &mut self,
        index: usize,
        count: usize,
    ) -> Result<Vec<ItemDescriptor<T>>, MutationError> {
        let len = self.items.len();
        let end = index
            .checked_add(count)
            .filter(|&end| end <= len)
            .ok_or(MutationError::RangeOutOfBounds { index, count, len })?;
        let removed: Vec<_> = self.items.drain(index..end).collect();
        self.renumber_from(index);
        Ok(removed)
    }

    /// Replaces the payload at `index`, returning the previous one.
    pub fn replace(&mut self, index: usize, payload: T) -> Result<T, MutationError> {
        let len = self.items.len();
        let slot = self
            .items
            .get_mut(index)
            .ok_or(MutationError::IndexOutOfBounds { index, len })?;
        Ok(core::mem::replace(&mut slot.payload, payload))
    }

    fn renumber_from(&mut self, start: usize) {
        for (i, d) in self.items.iter_mut().enumerate().skip(start) {
            d.index = i;
        }
    }
}
