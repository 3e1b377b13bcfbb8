//! CSL-JSON items produced by the record mapper.
//!
//! Only the shapes the mapper emits are modelled: text variables, name lists
//! of `{family, given}` pairs, and dates as either `date-parts` or a literal.

use crate::record::RecordId;
use crate::tables::CslType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A bibliographic item in CSL-JSON form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CslItem {
    pub id: RecordId,

    #[serde(rename = "type")]
    pub item_type: CslType,

    /// Text, name and date variables keyed by CSL variable name.
    #[serde(flatten)]
    pub variables: BTreeMap<String, CslValue>,
}

/// The value of a CSL variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CslValue {
    Text(String),
    Names(Vec<Name>),
    Date(DateVariable),
}

/// A personal name in CSL-JSON format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name {
    pub family: String,
    pub given: String,
}

/// A CSL date variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateVariable {
    /// Structured date: a single `[year, month, day]` list, truncated at the
    /// first missing component.
    Parts {
        #[serde(rename = "date-parts")]
        date_parts: Vec<Vec<i32>>,
    },
    /// Date text that could not be broken into parts.
    Literal { literal: String },
}

impl DateVariable {
    /// Build date parts from a 1-based month.
    pub fn from_parts(year: Option<i32>, month: Option<i32>, day: Option<i32>) -> Self {
        let mut parts = Vec::new();
        if let Some(year) = year {
            parts.push(year);
            if let Some(month) = month {
                parts.push(month);
                if let Some(day) = day {
                    parts.push(day);
                }
            }
        }
        DateVariable::Parts {
            date_parts: vec![parts],
        }
    }

    pub fn literal(text: impl Into<String>) -> Self {
        DateVariable::Literal {
            literal: text.into(),
        }
    }
}

impl CslItem {
    pub fn new(id: RecordId, item_type: CslType) -> Self {
        Self {
            id,
            item_type,
            variables: BTreeMap::new(),
        }
    }

    /// Get a text variable.
    pub fn text(&self, variable: &str) -> Option<&str> {
        match self.variables.get(variable)? {
            CslValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Get a name variable.
    pub fn names(&self, variable: &str) -> Option<&[Name]> {
        match self.variables.get(variable)? {
            CslValue::Names(names) => Some(names),
            _ => None,
        }
    }

    /// Get a date variable.
    pub fn date(&self, variable: &str) -> Option<&DateVariable> {
        match self.variables.get(variable)? {
            CslValue::Date(date) => Some(date),
            _ => None,
        }
    }

    pub fn set_text(&mut self, variable: &str, value: String) {
        self.variables
            .insert(variable.to_string(), CslValue::Text(value));
    }

    pub fn set_date(&mut self, variable: &str, value: DateVariable) {
        self.variables
            .insert(variable.to_string(), CslValue::Date(value));
    }

    /// Append a name to a name variable, creating the list if needed.
    pub fn push_name(&mut self, variable: &str, name: Name) {
        let entry = self
            .variables
            .entry(variable.to_string())
            .or_insert_with(|| CslValue::Names(Vec::new()));
        if let CslValue::Names(names) = entry {
            names.push(name);
        } else {
            *entry = CslValue::Names(vec![name]);
        }
    }
}
