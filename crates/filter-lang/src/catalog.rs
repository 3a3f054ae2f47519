//! Field catalog: the scores a filter expression can refer to.
//!
//! The catalog is produced outside this crate (usually from the scorers of an
//! evaluation log) and is only read here.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};

/// Classification of a field's value domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreType {
    Boolean,
    Categorical,
    Numeric,
    PassFail,
    Other,
}

impl ScoreType {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreType::Boolean => "boolean",
            ScoreType::Categorical => "categorical",
            ScoreType::Numeric => "numeric",
            ScoreType::PassFail => "pass-fail",
            ScoreType::Other => "other",
        }
    }
}

/// A named, typed score that filter expressions can reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// The name as written in expression source.
    pub canonical_name: String,

    /// `scorer.member` when the field belongs to a composite scorer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualified_name: Option<String>,

    pub score_type: ScoreType,

    /// Enumerated values, spelled as literals (e.g. `"A"` or `1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
}

impl FieldDescriptor {
    /// Creates a top-level field with no categories or tooltip.
    pub fn new(canonical_name: impl Into<String>, score_type: ScoreType) -> Self {
        Self {
            canonical_name: canonical_name.into(),
            qualified_name: None,
            score_type,
            categories: None,
            tooltip: None,
        }
    }

    pub fn with_qualified_name(mut self, qualified_name: impl Into<String>) -> Self {
        self.qualified_name = Some(qualified_name.into());
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    /// The composite scorer this field belongs to, if any.
    pub fn scorer(&self) -> Option<&str> {
        self.qualified_name
            .as_deref()
            .and_then(|q| q.split_once('.'))
            .map(|(scorer, _)| scorer)
    }

    /// The member part of a qualified name (`accuracy` in `web_search.accuracy`).
    pub fn member_name(&self) -> Option<&str> {
        self.qualified_name
            .as_deref()
            .and_then(|q| q.split_once('.'))
            .map(|(_, member)| member)
    }

    /// Enumerated categories, if the field has a non-empty set.
    pub fn categories(&self) -> Option<&[String]> {
        self.categories.as_deref().filter(|c| !c.is_empty())
    }

    pub fn is_boolean(&self) -> bool {
        self.score_type == ScoreType::Boolean
    }
}

/// An ordered collection of fields with unique canonical names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldCatalog {
    fields: Vec<FieldDescriptor>,
}

impl FieldCatalog {
    /// Builds a catalog, rejecting empty and duplicate canonical names.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::EmptyName` or `CatalogError::DuplicateField`.
    pub fn new(fields: Vec<FieldDescriptor>) -> CatalogResult<Self> {
        let mut seen = HashSet::new();
        for field in &fields {
            if field.canonical_name.is_empty() {
                return Err(CatalogError::EmptyName);
            }
            if !seen.insert(field.canonical_name.as_str()) {
                return Err(CatalogError::duplicate_field(&field.canonical_name));
            }
        }
        Ok(Self { fields })
    }

    /// A catalog with no fields.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses a JSON array of field descriptors.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Json` if the document does not match the schema,
    /// plus the validation errors of [`FieldCatalog::new`].
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let fields: Vec<FieldDescriptor> = serde_json::from_str(json)?;
        Self::new(fields)
    }

    /// Looks up a field by canonical name.
    pub fn get(&self, canonical_name: &str) -> Option<&FieldDescriptor> {
        self.fields
            .iter()
            .find(|f| f.canonical_name == canonical_name)
    }

    /// Members of a composite scorer paired with their member names, in
    /// catalog order.
    pub fn members_of<'a>(
        &'a self,
        scorer: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a FieldDescriptor)> + 'a {
        self.fields.iter().filter_map(move |field| {
            let qualified = field.qualified_name.as_deref()?;
            let member = qualified.strip_prefix(scorer)?.strip_prefix('.')?;
            Some((member, field))
        })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldDescriptor> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a FieldCatalog {
    type Item = &'a FieldDescriptor;
    type IntoIter = std::slice::Iter<'a, FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
