//! The criteria aggregate.
//!
//! A [`Criteria`] value describes which subset of data to retrieve: column
//! selection, joins, filters (default and per logical module), sorts, and
//! pagination. It is built through the fluent methods, each of which takes
//! the value, extends a local copy, and returns it, and is then handed
//! read-only to a renderer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::columns::ColumnSet;
use crate::filters::{Filter, FilterOperator, FilterValue, Filters};
use crate::pagination::Pagination;
use crate::sorts::{Sort, SortDirection, Sorts};

/// Query criteria: selection, joins, filters, sorts, and pagination.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Criteria {
    /// Columns to select, in order. Empty means "select all".
    #[serde(default, skip_serializing_if = "ColumnSet::is_select_all")]
    pub select_columns: ColumnSet,

    /// Join specifications. Opaque strings, interpreted by the renderer.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub joins: Vec<String>,

    /// The default filter sequence.
    #[serde(default, skip_serializing_if = "Filters::is_zero")]
    pub filters: Filters,

    /// Module-scoped filter sequences, keyed by an opaque routing name the
    /// renderer maps to a joined table or sub-query.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub filters_by_module: BTreeMap<String, Filters>,

    /// Sort instructions, highest precedence first.
    #[serde(default, skip_serializing_if = "Sorts::is_zero")]
    pub sorts: Sorts,

    /// Pagination; zero fields mean unset and the renderer supplies defaults.
    #[serde(default, skip_serializing_if = "Pagination::is_zero")]
    pub pagination: Pagination,
}

impl Criteria {
    /// Create empty criteria.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create criteria seeded with an initial filter.
    pub fn where_by(
        field: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<FilterValue>,
    ) -> Self {
        Self {
            filters: Filters::filter_by(field, operator, value),
            ..Default::default()
        }
    }

    /// Add a filter joined to the existing ones with AND.
    pub fn and(
        mut self,
        field: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<FilterValue>,
    ) -> Self {
        self.filters = self.filters.and(field, operator, value);
        self
    }

    /// Add a filter joined to the existing ones with OR.
    pub fn or(
        mut self,
        field: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<FilterValue>,
    ) -> Self {
        self.filters = self.filters.or(field, operator, value);
        self
    }

    /// Add a parenthesized filter group joined with AND.
    pub fn and_group<I>(mut self, filters: I) -> Self
    where
        I: IntoIterator<Item = Filter>,
    {
        self.filters = self.filters.and_group(filters);
        self
    }

    /// Add a parenthesized filter group joined with OR.
    pub fn or_group<I>(mut self, filters: I) -> Self
    where
        I: IntoIterator<Item = Filter>,
    {
        self.filters = self.filters.or_group(filters);
        self
    }

    /// Append a sort instruction.
    pub fn sort_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sorts = self.sorts.then(Sort::new(field, direction));
        self
    }

    /// Set the page size.
    pub fn limit(mut self, value: u64) -> Self {
        self.pagination.page_size = value;
        self
    }

    /// Set the page number.
    pub fn page(mut self, value: u64) -> Self {
        self.pagination.page_number = value;
        self
    }

    /// Set the columns to select, replacing any previous selection.
    pub fn select<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select_columns = columns.into_iter().collect();
        self
    }

    /// Append a join specification.
    pub fn join(mut self, join: impl Into<String>) -> Self {
        self.joins.push(join.into());
        self
    }

    /// Set the filter sequence routed to a logical module, replacing any
    /// previous sequence for that module.
    pub fn with_module_filters(mut self, module: impl Into<String>, filters: Filters) -> Self {
        self.filters_by_module.insert(module.into(), filters);
        self
    }

    /// True if any default or module-scoped filter is set.
    pub fn has_filters(&self) -> bool {
        !self.filters.is_zero() || self.filters_by_module.values().any(|f| !f.is_zero())
    }

    /// True if any sort is set.
    pub fn has_sorts(&self) -> bool {
        !self.sorts.is_zero()
    }

    /// True if any pagination field is set.
    pub fn is_paginated(&self) -> bool {
        !self.pagination.is_zero()
    }

    /// True if nothing at all is set.
    pub fn is_zero(&self) -> bool {
        self.select_columns.is_select_all()
            && self.joins.is_empty()
            && self.filters.is_zero()
            && self.filters_by_module.is_empty()
            && self.sorts.is_zero()
            && self.pagination.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::ChainingKey;

    #[test]
    fn test_new_is_zero() {
        let criteria = Criteria::new();
        assert!(criteria.is_zero());
        assert!(!criteria.has_filters());
        assert!(!criteria.has_sorts());
        assert!(!criteria.is_paginated());
    }

    #[test]
    fn test_where_by_seeds_filters() {
        let criteria = Criteria::where_by("status", FilterOperator::Equal, "open");
        assert!(criteria.has_filters());
        assert_eq!(criteria.filters.len(), 1);
        assert_eq!(criteria.filters.first().unwrap().field, "status");
    }

    #[test]
    fn test_fluent_chain() {
        let criteria = Criteria::where_by("status", FilterOperator::Equal, "open")
            .and("age", FilterOperator::GreaterOrEqual, 18)
            .or("vip", FilterOperator::Equal, true)
            .sort_by("created_at", SortDirection::Desc)
            .page(2)
            .limit(50)
            .select(["id", "name"])
            .join("accounts");

        assert_eq!(criteria.filters.len(), 3);
        assert_eq!(
            criteria.filters.get(0).unwrap().chaining_key,
            Some(ChainingKey::And)
        );
        assert_eq!(
            criteria.filters.get(1).unwrap().chaining_key,
            Some(ChainingKey::Or)
        );
        assert_eq!(criteria.sorts.len(), 1);
        assert_eq!(criteria.pagination, Pagination::new(2, 50));
        assert_eq!(criteria.select_columns.names(), ["id", "name"]);
        assert_eq!(criteria.joins, vec!["accounts".to_string()]);
        assert!(criteria.filters.is_valid());
    }

    #[test]
    fn test_select_last_call_wins() {
        let criteria = Criteria::new().select(["a", "b"]).select(["c"]);
        assert_eq!(criteria.select_columns.names(), ["c"]);
    }

    #[test]
    fn test_group_methods_delegate_to_filters() {
        let criteria = Criteria::where_by("a", FilterOperator::Equal, 1).and_group(vec![
            Filter::equals("b", 2).chained(ChainingKey::Or),
            Filter::equals("c", 3),
        ]);

        assert_eq!(criteria.filters.len(), 3);
        assert!(criteria.filters.get(1).unwrap().is_group_open);
        assert!(criteria.filters.get(2).unwrap().is_group_close);
        assert!(criteria.filters.is_valid());
    }

    #[test]
    fn test_empty_group_is_noop_on_criteria() {
        let base = Criteria::where_by("a", FilterOperator::Equal, 1);
        let after = base.clone().or_group(Vec::new());
        assert_eq!(after, base);
    }

    #[test]
    fn test_module_filters_routing() {
        let criteria = Criteria::new()
            .with_module_filters("orders", Filters::filter_by("total", FilterOperator::Greater, 100))
            .with_module_filters("customers", Filters::filter_by("active", FilterOperator::Equal, true));

        assert!(criteria.has_filters());
        assert!(criteria.filters.is_zero());
        assert_eq!(criteria.filters_by_module.len(), 2);
        assert_eq!(criteria.filters_by_module["orders"].len(), 1);

        // Last call wins per module key.
        let replaced = criteria.with_module_filters(
            "orders",
            Filters::filter_by("total", FilterOperator::Less, 10),
        );
        assert_eq!(replaced.filters_by_module["orders"].first().unwrap().operator, FilterOperator::Less);
    }

    #[test]
    fn test_branching_from_shared_criteria_is_independent() {
        let base = Criteria::where_by("x", FilterOperator::Equal, 1);

        let b1 = base.clone().and("y", FilterOperator::Equal, 2);
        let b2 = base.clone().or("z", FilterOperator::Equal, 3);

        assert_eq!(b1.filters.get(0).unwrap().chaining_key, Some(ChainingKey::And));
        assert_eq!(b2.filters.get(0).unwrap().chaining_key, Some(ChainingKey::Or));
        assert!(base.filters.get(0).unwrap().chaining_key.is_none());
    }

    #[test]
    fn test_nested_sub_criteria_value() {
        let sub = Criteria::where_by("account_id", FilterOperator::Equal, 7).select(["id"]);
        let criteria = Criteria::where_by("user_id", FilterOperator::In, sub.clone());

        let filter = criteria.filters.first().unwrap();
        assert_eq!(filter.value, FilterValue::Criteria(Box::new(sub)));
    }

    #[test]
    fn test_serde_round_trip_with_nested_criteria() {
        let sub = Criteria::where_by("region", FilterOperator::Equal, "emea");
        let criteria = Criteria::where_by("status", FilterOperator::Equal, "open")
            .and("account", FilterOperator::Default, sub)
            .sort_by("id", SortDirection::Asc)
            .page(1)
            .limit(20);

        let json = serde_json::to_string(&criteria).unwrap();
        let back: Criteria = serde_json::from_str(&json).unwrap();
        assert_eq!(back, criteria);
    }

    #[test]
    fn test_empty_criteria_serializes_to_empty_object() {
        let json = serde_json::to_value(Criteria::new()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }
}
