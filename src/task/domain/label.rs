//! Task labels and label-set normalization.
//!
//! A label has no identity of its own: it is a name held by exactly one task.
//! Names are compared exactly and case-sensitively.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A free-form label attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawLabel")]
pub struct Label {
    name: String,
}

/// Unvalidated wire form of [`Label`].
#[derive(Deserialize)]
struct RawLabel {
    name: String,
}

impl Label {
    /// Maximum name length in characters, matching the `VARCHAR(255)`
    /// `task_labels.name` column.
    pub const MAX_NAME_LENGTH: usize = 255;

    /// Creates a label with the given name.
    ///
    /// The name is kept verbatim; only blank or overlong names are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyLabelName`] when the name is blank and
    /// [`TaskDomainError::LabelNameTooLong`] when it exceeds
    /// [`Self::MAX_NAME_LENGTH`] characters.
    pub fn new(name: impl Into<String>) -> Result<Self, TaskDomainError> {
        let value = name.into();
        if value.trim().is_empty() {
            return Err(TaskDomainError::EmptyLabelName);
        }
        let length = value.chars().count();
        if length > Self::MAX_NAME_LENGTH {
            return Err(TaskDomainError::LabelNameTooLong {
                length,
                max: Self::MAX_NAME_LENGTH,
            });
        }
        Ok(Self { name: value })
    }

    /// Returns the label name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl TryFrom<RawLabel> for Label {
    type Error = TaskDomainError;

    fn try_from(raw: RawLabel) -> Result<Self, Self::Error> {
        Self::new(raw.name)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Removes duplicate labels, keeping the first occurrence of each name.
///
/// Order of the surviving labels matches the input order.
#[must_use]
pub fn normalize_labels(raw: impl IntoIterator<Item = Label>) -> Vec<Label> {
    let mut seen = HashSet::new();
    raw.into_iter()
        .filter(|label| seen.insert(label.name.clone()))
        .collect()
}

/// Validates raw names and normalizes them in one step.
///
/// # Errors
///
/// Returns the [`Label::new`] error for the first blank or overlong name.
pub fn parse_labels<I, S>(names: I) -> Result<Vec<Label>, TaskDomainError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let labels = names
        .into_iter()
        .map(Label::new)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(normalize_labels(labels))
}

/// Ordered set of labels held by a single task.
///
/// Deserialized input is normalized, so duplicates never survive a round
/// trip through an external representation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Label>")]
pub struct LabelSet(Vec<Label>);

impl LabelSet {
    /// Creates an empty label set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Builds a set from possibly-duplicated labels.
    #[must_use]
    pub fn normalized(raw: impl IntoIterator<Item = Label>) -> Self {
        Self(normalize_labels(raw))
    }

    /// Returns whether a label with exactly this name is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|label| label.name == name)
    }

    /// Returns whether any label name appears in `names`.
    #[must_use]
    pub fn contains_any(&self, names: &[String]) -> bool {
        self.0.iter().any(|label| names.contains(&label.name))
    }

    /// Returns the labels in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.0.iter()
    }

    /// Returns the label names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(Label::name)
    }

    /// Returns the number of labels.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the set holds no labels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the set extended by every incoming label not already present.
    ///
    /// The second element is the number of labels actually added.
    #[must_use]
    pub fn union(&self, incoming: impl IntoIterator<Item = Label>) -> (Self, usize) {
        let additions: Vec<Label> = normalize_labels(incoming)
            .into_iter()
            .filter(|label| !self.contains(&label.name))
            .collect();
        let added = additions.len();
        let mut labels = self.0.clone();
        labels.extend(additions);
        (Self(labels), added)
    }

    /// Returns the set without any label whose name is in `names`.
    #[must_use]
    pub fn without(&self, names: &[String]) -> Self {
        Self(
            self.0
                .iter()
                .filter(|label| !names.contains(&label.name))
                .cloned()
                .collect(),
        )
    }
}

impl From<Vec<Label>> for LabelSet {
    fn from(labels: Vec<Label>) -> Self {
        Self::normalized(labels)
    }
}

impl IntoIterator for LabelSet {
    type Item = Label;
    type IntoIter = std::vec::IntoIter<Label>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a LabelSet {
    type Item = &'a Label;
    type IntoIter = std::slice::Iter<'a, Label>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
