//! Flat chip list adapter.
//!
//! Chip UIs show one removable "chip" per condition. Converting a tree to
//! chips flattens nested groups: leaves are kept in depth-first order and the
//! nested combinators are lost. Converting back always yields a flat `and`
//! group.

use lens_api::models::{Condition, ConditionValue, Filter, FilterGroup, FilterNode, Operator};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One condition as displayed by a chip UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChipFilter {
    pub id: String,
    pub attribute: String,
    pub operator: Operator,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ConditionValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl ChipFilter {
    fn to_condition(&self) -> Condition {
        Condition {
            attribute: self.attribute.clone(),
            op: Some(self.operator.clone()),
            value: self.value.clone(),
        }
    }
}

/// Converts a filter into chips with ids of the form `{attribute}-{index}`.
///
/// Leaves without an attribute are skipped; a missing operator becomes `is`.
pub fn lens_filter_to_chip_filters(filter: &Filter) -> Vec<ChipFilter> {
    let Some(group) = filter.as_group() else {
        return Vec::new();
    };

    group
        .leaves()
        .into_iter()
        .filter(|condition| !condition.attribute.is_empty())
        .enumerate()
        .map(|(index, condition)| ChipFilter {
            id: format!("{}-{}", condition.attribute, index),
            attribute: condition.attribute.clone(),
            operator: condition.op.clone().unwrap_or(Operator::Is),
            value: condition.value.clone(),
            session_id: None,
        })
        .collect()
}

/// Converts chips back into a flat `and` filter; no chips is [`Filter::Empty`].
///
/// Chip ids and session ids are not part of the filter.
pub fn chip_filters_to_lens_view_filter(chips: &[ChipFilter]) -> Filter {
    if chips.is_empty() {
        return Filter::Empty;
    }
    FilterGroup::and(
        chips
            .iter()
            .map(|chip| FilterNode::from(chip.to_condition()))
            .collect(),
    )
    .into()
}

/// Session-scoped chip list holding at most one chip per attribute.
///
/// # Example
///
/// ```
/// use lens_api::models::Operator;
/// use lens_filter::ChipSession;
///
/// let mut session = ChipSession::new();
/// session.upsert("status", Operator::Is, Some("open".into()));
/// session.upsert("status", Operator::Is, Some("closed".into()));
///
/// assert_eq!(session.chips().len(), 1);
/// assert!(session.to_filter().as_group().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct ChipSession {
    session_id: String,
    chips: Vec<ChipFilter>,
}

impl ChipSession {
    /// Starts an empty session with a fresh id.
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            chips: Vec::new(),
        }
    }

    /// Starts a session seeded from a filter.
    ///
    /// Later leaves for an attribute already seen replace the earlier chip.
    pub fn from_filter(filter: &Filter) -> Self {
        let mut session = Self::new();
        for chip in lens_filter_to_chip_filters(filter) {
            session.upsert(chip.attribute, chip.operator, chip.value);
        }
        session
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn chips(&self) -> &[ChipFilter] {
        &self.chips
    }

    /// Sets the chip of `attribute`, replacing an existing one in place.
    pub fn upsert(
        &mut self,
        attribute: impl Into<String>,
        operator: Operator,
        value: Option<ConditionValue>,
    ) -> &ChipFilter {
        let attribute = attribute.into();
        let index = match self.chips.iter().position(|c| c.attribute == attribute) {
            Some(index) => {
                let chip = &mut self.chips[index];
                chip.operator = operator;
                chip.value = value;
                index
            }
            None => {
                self.chips.push(ChipFilter {
                    id: Uuid::new_v4().to_string(),
                    attribute,
                    operator,
                    value,
                    session_id: Some(self.session_id.clone()),
                });
                self.chips.len() - 1
            }
        };
        &self.chips[index]
    }

    /// Removes a chip by id.
    pub fn remove(&mut self, id: &str) -> Option<ChipFilter> {
        let index = self.chips.iter().position(|c| c.id == id)?;
        Some(self.chips.remove(index))
    }

    pub fn clear(&mut self) {
        self.chips.clear();
    }

    pub fn to_filter(&self) -> Filter {
        chip_filters_to_lens_view_filter(&self.chips)
    }
}

impl Default for ChipSession {
    fn default() -> Self {
        Self::new()
    }
}
