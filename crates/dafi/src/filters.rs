//! Filter predicates and the flat filter sequence.
//!
//! An arbitrarily nested AND/OR expression is stored as a single flat,
//! order-preserving sequence of [`Filter`] tokens rather than as a tree.
//! Each token carries the connective joining it to the *next* token
//! ([`Filter::chaining_key`]) and group-boundary markers with nesting-depth
//! counters ([`Filter::group_open_qty`] / [`Filter::group_close_qty`]), so a
//! renderer can reconstruct parenthesization in one left-to-right pass with
//! nothing but an integer depth counter.

use serde::{Deserialize, Serialize};

use crate::criteria::Criteria;
use crate::error::FilterError;

/// Comparison operators for filter predicates.
///
/// The token strings are stable and intended to cross serialization
/// boundaries unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FilterOperator {
    /// Equals
    #[serde(rename = "eq")]
    Equal,
    /// Not equals
    #[serde(rename = "ne")]
    NotEqual,
    /// Greater than
    #[serde(rename = "gt")]
    Greater,
    /// Greater than or equal
    #[serde(rename = "gte")]
    GreaterOrEqual,
    /// Less than
    #[serde(rename = "lt")]
    Less,
    /// Less than or equal
    #[serde(rename = "lte")]
    LessOrEqual,
    /// Matches a pattern
    #[serde(rename = "like")]
    Like,
    /// Member of a list of values
    #[serde(rename = "in")]
    In,
    /// Not a member of a list of values
    #[serde(rename = "nin")]
    NotIn,
    /// Contains a substring
    #[serde(rename = "contains")]
    Contains,
    /// Does not contain a substring
    #[serde(rename = "ncontains")]
    NotContains,
    /// Identity check (e.g. IS NULL)
    #[serde(rename = "is")]
    Is,
    /// Is null
    #[serde(rename = "isnull")]
    IsNull,
    /// Negated identity check
    #[serde(rename = "isn")]
    IsNot,
    /// Is not null
    #[serde(rename = "isnnull")]
    IsNotNull,
    /// Operator implied by the value, e.g. a nested sub-criteria.
    #[default]
    #[serde(rename = "default")]
    Default,
}

impl FilterOperator {
    /// Parse an operator from its token string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "eq" => Some(Self::Equal),
            "ne" => Some(Self::NotEqual),
            "gt" => Some(Self::Greater),
            "gte" => Some(Self::GreaterOrEqual),
            "lt" => Some(Self::Less),
            "lte" => Some(Self::LessOrEqual),
            "like" => Some(Self::Like),
            "in" => Some(Self::In),
            "nin" => Some(Self::NotIn),
            "contains" => Some(Self::Contains),
            "ncontains" => Some(Self::NotContains),
            "is" => Some(Self::Is),
            "isnull" => Some(Self::IsNull),
            "isn" => Some(Self::IsNot),
            "isnnull" => Some(Self::IsNotNull),
            "default" => Some(Self::Default),
            _ => None,
        }
    }

    /// The stable token string for this operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "eq",
            Self::NotEqual => "ne",
            Self::Greater => "gt",
            Self::GreaterOrEqual => "gte",
            Self::Less => "lt",
            Self::LessOrEqual => "lte",
            Self::Like => "like",
            Self::In => "in",
            Self::NotIn => "nin",
            Self::Contains => "contains",
            Self::NotContains => "ncontains",
            Self::Is => "is",
            Self::IsNull => "isnull",
            Self::IsNot => "isn",
            Self::IsNotNull => "isnnull",
            Self::Default => "default",
        }
    }
}

impl std::fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical connective joining a filter to the next one in sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChainingKey {
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
}

impl ChainingKey {
    /// Parse from a token string (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "AND" => Some(Self::And),
            "OR" => Some(Self::Or),
            _ => None,
        }
    }

    /// The stable token string for this connective.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

impl std::fmt::Display for ChainingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operand of a filter predicate.
///
/// No semantic validation happens at this layer: an operator/value pairing
/// that makes no sense (`In` with a scalar, say) is representable and is the
/// renderer's to reject at translation time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// No value (null checks, or operators that need none).
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// List operand, for set membership operators.
    List(Vec<FilterValue>),
    /// A nested sub-criteria, used with [`FilterOperator::Default`].
    Criteria(Box<Criteria>),
}

impl FilterValue {
    /// Check for the null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Get as a string slice, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as a list slice, if this is a list value.
    pub fn as_list(&self) -> Option<&[FilterValue]> {
        match self {
            Self::List(values) => Some(values),
            _ => None,
        }
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for FilterValue {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for FilterValue {
    fn from(v: u32) -> Self {
        Self::Int(v.into())
    }
}

impl From<f64> for FilterValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl<T: Into<FilterValue>> From<Vec<T>> for FilterValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<Criteria> for FilterValue {
    fn from(criteria: Criteria) -> Self {
        Self::Criteria(Box::new(criteria))
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

fn is_zero_qty(n: &u32) -> bool {
    *n == 0
}

/// A single predicate token in a flat filter sequence.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Filter {
    /// Optional routing hint naming the logical module this predicate
    /// belongs to; opaque to this layer, interpreted by the renderer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,

    /// The attribute being filtered. Opaque from the renderer's perspective.
    pub field: String,

    /// The comparison operator.
    #[serde(default)]
    pub operator: FilterOperator,

    /// The operand.
    #[serde(default, skip_serializing_if = "FilterValue::is_null")]
    pub value: FilterValue,

    /// This token begins one or more parenthetical groups.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_group_open: bool,

    /// How many group-open parentheses precede this predicate.
    #[serde(default, skip_serializing_if = "is_zero_qty")]
    pub group_open_qty: u32,

    /// This token ends one or more parenthetical groups.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_group_close: bool,

    /// How many group-close parentheses follow this predicate.
    #[serde(default, skip_serializing_if = "is_zero_qty")]
    pub group_close_qty: u32,

    /// Connective joining this predicate to the next one in sequence.
    /// Meaningless on the last predicate of a sequence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chaining_key: Option<ChainingKey>,

    /// Advises the renderer to use this connective between the *previous*
    /// token and this one, in place of the one the previous token carries.
    /// Never applied during construction; see
    /// [`Filters::effective_chaining_key`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_previous_chaining_key: Option<ChainingKey>,
}

impl Filter {
    /// Create a new filter predicate.
    pub fn new(
        field: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<FilterValue>,
    ) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
            ..Default::default()
        }
    }

    /// Create an equality filter.
    pub fn equals(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOperator::Equal, value)
    }

    /// Create an inequality filter.
    pub fn not_equals(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOperator::NotEqual, value)
    }

    /// Create a substring-containment filter.
    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, FilterOperator::Contains, value.into())
    }

    /// Create an is-null filter.
    pub fn is_null(field: impl Into<String>) -> Self {
        Self::new(field, FilterOperator::IsNull, FilterValue::Null)
    }

    /// Create an is-not-null filter.
    pub fn is_not_null(field: impl Into<String>) -> Self {
        Self::new(field, FilterOperator::IsNotNull, FilterValue::Null)
    }

    /// Set the module routing hint.
    pub fn in_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    /// Set the connective joining this predicate to the next one. Used when
    /// assembling a group block by hand before passing it to
    /// [`Filters::and_group`] / [`Filters::or_group`].
    pub fn chained(mut self, key: ChainingKey) -> Self {
        self.chaining_key = Some(key);
        self
    }

    /// Annotate this predicate with a retroactive connective for the
    /// renderer to apply between the previous token and this one.
    pub fn override_previous_chaining(mut self, key: ChainingKey) -> Self {
        self.override_previous_chaining_key = Some(key);
        self
    }
}

/// An ordered sequence of [`Filter`] tokens.
///
/// Order is the left-to-right expression order. The empty sequence is the
/// recognized "no filter" zero value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filters(Vec<Filter>);

impl Filters {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Create a one-element sequence. Entry point for fluent construction.
    pub fn filter_by(
        field: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<FilterValue>,
    ) -> Self {
        Self(vec![Filter::new(field, operator, value)])
    }

    /// True if the sequence has no elements.
    pub fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    /// True if the sequence has no elements.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of predicate tokens in the sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The tokens as a slice, in expression order.
    pub fn as_slice(&self) -> &[Filter] {
        &self.0
    }

    /// Iterate over the tokens in expression order.
    pub fn iter(&self) -> std::slice::Iter<'_, Filter> {
        self.0.iter()
    }

    /// The token at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Filter> {
        self.0.get(index)
    }

    /// The first token, if any.
    pub fn first(&self) -> Option<&Filter> {
        self.0.first()
    }

    /// The last token, if any.
    pub fn last(&self) -> Option<&Filter> {
        self.0.last()
    }

    /// Append a predicate joined to the existing sequence with AND.
    ///
    /// On an empty receiver this degrades to [`Filters::filter_by`]; the
    /// connective is discarded since there is nothing to chain to.
    pub fn and(
        self,
        field: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<FilterValue>,
    ) -> Self {
        self.chain(ChainingKey::And, field, operator, value)
    }

    /// Append a predicate joined to the existing sequence with OR.
    ///
    /// On an empty receiver this degrades to [`Filters::filter_by`]; the
    /// connective is discarded since there is nothing to chain to.
    pub fn or(
        self,
        field: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<FilterValue>,
    ) -> Self {
        self.chain(ChainingKey::Or, field, operator, value)
    }

    fn chain(
        mut self,
        key: ChainingKey,
        field: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<FilterValue>,
    ) -> Self {
        if let Some(last) = self.0.last_mut() {
            last.chaining_key = Some(key);
        }
        self.0.push(Filter::new(field, operator, value));
        self
    }

    /// Append a parenthesized block joined to the existing sequence with AND.
    ///
    /// The block's internal connectives must already be set on the supplied
    /// predicates (via [`Filter::chained`] or by building the block with
    /// [`Filters::and`] / [`Filters::or`]); grouping only adds the outer
    /// parenthesis markers and the outer join key. An empty block is a no-op.
    pub fn and_group<I>(self, filters: I) -> Self
    where
        I: IntoIterator<Item = Filter>,
    {
        self.group(ChainingKey::And, filters)
    }

    /// Append a parenthesized block joined to the existing sequence with OR.
    ///
    /// Same contract as [`Filters::and_group`].
    pub fn or_group<I>(self, filters: I) -> Self
    where
        I: IntoIterator<Item = Filter>,
    {
        self.group(ChainingKey::Or, filters)
    }

    fn group<I>(mut self, key: ChainingKey, filters: I) -> Self
    where
        I: IntoIterator<Item = Filter>,
    {
        let mut block: Vec<Filter> = filters.into_iter().collect();
        if block.is_empty() {
            return self;
        }

        if let Some(last) = self.0.last_mut() {
            last.chaining_key = Some(key);
        }

        // Incrementing rather than setting the counters makes nesting depth
        // first-class: re-grouping an already-grouped block deepens it.
        if let Some(first) = block.first_mut() {
            first.is_group_open = true;
            first.group_open_qty += 1;
        }
        if let Some(last) = block.last_mut() {
            last.is_group_close = true;
            last.group_close_qty += 1;
        }

        self.0.extend(block);
        self
    }

    /// The connective a renderer should emit between token `index` and token
    /// `index + 1`: the next token's
    /// [`Filter::override_previous_chaining_key`] when present, else token
    /// `index`'s own [`Filter::chaining_key`]. `None` for the last token.
    pub fn effective_chaining_key(&self, index: usize) -> Option<ChainingKey> {
        let current = self.0.get(index)?;
        let next = self.0.get(index + 1)?;
        next.override_previous_chaining_key.or(current.chaining_key)
    }

    /// Check that the sequence is renderable: group markers agree with their
    /// counters, the running open/close balance never goes negative and ends
    /// at zero, and every non-last token carries a usable chaining key.
    ///
    /// Purely an inspection; construction never runs this.
    pub fn validate(&self) -> Result<(), FilterError> {
        let mut balance: i64 = 0;
        let mut opened: u64 = 0;
        let mut closed: u64 = 0;

        for (position, filter) in self.0.iter().enumerate() {
            if filter.is_group_open != (filter.group_open_qty > 0)
                || filter.is_group_close != (filter.group_close_qty > 0)
            {
                return Err(FilterError::GroupMarkerMismatch { position });
            }

            balance += i64::from(filter.group_open_qty);
            opened += u64::from(filter.group_open_qty);
            balance -= i64::from(filter.group_close_qty);
            closed += u64::from(filter.group_close_qty);

            if balance < 0 {
                return Err(FilterError::UnexpectedGroupClose { position });
            }

            let is_last = position + 1 == self.0.len();
            if !is_last && self.effective_chaining_key(position).is_none() {
                return Err(FilterError::MissingChainingKey { position });
            }
        }

        if balance != 0 {
            return Err(FilterError::UnbalancedGroups { opened, closed });
        }

        Ok(())
    }

    /// True if [`Filters::validate`] passes.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl From<Vec<Filter>> for Filters {
    fn from(filters: Vec<Filter>) -> Self {
        Self(filters)
    }
}

impl FromIterator<Filter> for Filters {
    fn from_iter<I: IntoIterator<Item = Filter>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Filters {
    type Item = Filter;
    type IntoIter = std::vec::IntoIter<Filter>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Filters {
    type Item = &'a Filter;
    type IntoIter = std::slice::Iter<'a, Filter>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
