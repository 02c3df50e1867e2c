//! Fluent search queries.
//!
//! A [`QueryBuilder`] accumulates filter conditions and sends them as the
//! `search` parameter of `GET {Entity}/query`:
//!
//! ```json
//! {"MaxRecords": 50, "IncludeFields": ["id"], "Filter": [{"op": "eq", "field": "isActive", "value": true}]}
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::AutotaskClient;
use crate::collection::Collection;
use crate::error::{AutotaskError, Result};
use crate::traits::Entity;

/// Largest `MaxRecords` the API accepts.
pub const MAX_RECORDS: u32 = 500;

/// Maximum pages `get_all` will follow (safety limit).
const MAX_PAGES: u32 = 1000;

/// Comparison operator for a filter condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "eq")]
    Eq,
    #[serde(rename = "noteq")]
    NotEq,
    #[serde(rename = "gt")]
    Gt,
    #[serde(rename = "gte")]
    Gte,
    #[serde(rename = "lt")]
    Lt,
    #[serde(rename = "lte")]
    Lte,
    #[serde(rename = "beginsWith")]
    BeginsWith,
    #[serde(rename = "endsWith")]
    EndsWith,
    #[serde(rename = "contains")]
    Contains,
    #[serde(rename = "exist")]
    Exist,
    #[serde(rename = "notExist")]
    NotExist,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "notIn")]
    NotIn,
}

impl Operator {
    /// Wire name of the operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::NotEq => "noteq",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::BeginsWith => "beginsWith",
            Self::EndsWith => "endsWith",
            Self::Contains => "contains",
            Self::Exist => "exist",
            Self::NotExist => "notExist",
            Self::In => "in",
            Self::NotIn => "notIn",
        }
    }

    /// Whether the operator compares against a value.
    pub fn takes_value(&self) -> bool {
        !matches!(self, Self::Exist | Self::NotExist)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = AutotaskError;

    /// Accepts wire names (case-insensitive) and the symbols `=`, `!=`,
    /// `<>`, `>`, `>=`, `<`, `<=`.
    fn from_str(s: &str) -> Result<Self> {
        let op = match s.trim().to_ascii_lowercase().as_str() {
            "=" | "==" | "eq" => Self::Eq,
            "!=" | "<>" | "noteq" => Self::NotEq,
            ">" | "gt" => Self::Gt,
            ">=" | "gte" => Self::Gte,
            "<" | "lt" => Self::Lt,
            "<=" | "lte" => Self::Lte,
            "beginswith" => Self::BeginsWith,
            "endswith" => Self::EndsWith,
            "contains" => Self::Contains,
            "exist" | "exists" => Self::Exist,
            "notexist" | "notexists" => Self::NotExist,
            "in" => Self::In,
            "notin" => Self::NotIn,
            other => {
                return Err(AutotaskError::InvalidQuery(format!(
                    "unknown operator '{other}'"
                )))
            }
        };
        Ok(op)
    }
}

/// How the items of a filter group combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Conjunction {
    And,
    Or,
}

/// One entry of the `Filter` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Filter {
    /// Nested `and`/`or` group.
    Group { op: Conjunction, items: Vec<Filter> },
    /// Single field comparison.
    Condition {
        op: Operator,
        field: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<Value>,
        /// Set when `field` names a user-defined field.
        #[serde(default, skip_serializing_if = "is_false")]
        udf: bool,
    },
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl Filter {
    /// A standard field condition. The value is dropped for `exist` and
    /// `notExist`.
    pub fn condition(field: impl Into<String>, op: Operator, value: impl Into<Value>) -> Self {
        Self::Condition {
            value: op.takes_value().then(|| value.into()),
            op,
            field: field.into(),
            udf: false,
        }
    }

    /// A user-defined field condition.
    pub fn udf(field: impl Into<String>, op: Operator, value: impl Into<Value>) -> Self {
        match Self::condition(field, op, value) {
            Self::Condition {
                op, field, value, ..
            } => Self::Condition {
                op,
                field,
                value,
                udf: true,
            },
            group => group,
        }
    }

    /// The filter that matches every record.
    pub fn all() -> Self {
        Self::condition("id", Operator::Exist, Value::Null)
    }
}

/// Builder methods shared by [`QueryBuilder`] and [`FilterGroup`].
pub trait FilterBuilder: Sized {
    /// Append a filter.
    fn push_filter(&mut self, filter: Filter);

    /// Add a field condition.
    #[must_use]
    fn filter(mut self, field: impl Into<String>, op: Operator, value: impl Into<Value>) -> Self {
        self.push_filter(Filter::condition(field, op, value));
        self
    }

    /// Add a user-defined field condition.
    #[must_use]
    fn filter_udf(
        mut self,
        field: impl Into<String>,
        op: Operator,
        value: impl Into<Value>,
    ) -> Self {
        self.push_filter(Filter::udf(field, op, value));
        self
    }

    /// Require `field` to have a value.
    #[must_use]
    fn exists(self, field: impl Into<String>) -> Self {
        self.filter(field, Operator::Exist, Value::Null)
    }

    /// Require `field` to be empty.
    #[must_use]
    fn not_exists(self, field: impl Into<String>) -> Self {
        self.filter(field, Operator::NotExist, Value::Null)
    }

    /// Add a group whose conditions match if any of them does.
    #[must_use]
    fn or(mut self, build: impl FnOnce(FilterGroup) -> FilterGroup) -> Self {
        self.push_filter(build(FilterGroup::new(Conjunction::Or)).into_filter());
        self
    }

    /// Add a group whose conditions must all match.
    #[must_use]
    fn and(mut self, build: impl FnOnce(FilterGroup) -> FilterGroup) -> Self {
        self.push_filter(build(FilterGroup::new(Conjunction::And)).into_filter());
        self
    }
}

/// Conditions collected inside an `and`/`or` group.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterGroup {
    op: Conjunction,
    items: Vec<Filter>,
}

impl FilterGroup {
    pub fn new(op: Conjunction) -> Self {
        Self {
            op,
            items: Vec::new(),
        }
    }

    /// Convert the group into a filter entry.
    pub fn into_filter(self) -> Filter {
        Filter::Group {
            op: self.op,
            items: self.items,
        }
    }
}

impl FilterBuilder for FilterGroup {
    fn push_filter(&mut self, filter: Filter) {
        self.items.push(filter);
    }
}

/// The search document sent to query endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Search {
    #[serde(
        rename = "MaxRecords",
        alias = "maxRecords",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub max_records: Option<u32>,

    #[serde(
        rename = "IncludeFields",
        alias = "includeFields",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub include_fields: Vec<String>,

    #[serde(rename = "Filter", alias = "filter", default)]
    pub filter: Vec<Filter>,
}

impl Search {
    /// Check limits and fill in the select-all filter when none was given.
    ///
    /// # Errors
    ///
    /// Returns [`AutotaskError::InvalidQuery`] if `max_records` is outside
    /// `1..=500`.
    pub fn prepared(&self) -> Result<Self> {
        if let Some(records) = self.max_records {
            if !(1..=MAX_RECORDS).contains(&records) {
                return Err(AutotaskError::InvalidQuery(format!(
                    "records must be between 1 and {MAX_RECORDS}, got {records}"
                )));
            }
        }

        let mut search = self.clone();
        if search.filter.is_empty() {
            search.filter.push(Filter::all());
        }
        Ok(search)
    }

    /// Serialized form used for the `search` query parameter.
    ///
    /// # Errors
    ///
    /// Same as [`Search::prepared`].
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.prepared()?)?)
    }
}

/// Accumulates search criteria for one entity kind.
///
/// Obtain one from [`Service::query`](crate::Service::query).
///
/// # Example
///
/// ```ignore
/// use autotask::{AutotaskClient, FilterBuilder, Operator};
///
/// let client = AutotaskClient::from_env()?;
/// let contacts = client
///     .contacts()
///     .query()
///     .filter("companyID", Operator::Eq, 42)
///     .or(|g| {
///         g.filter("lastName", Operator::BeginsWith, "Sm")
///             .filter("lastName", Operator::BeginsWith, "Jo")
///     })
///     .records(100)
///     .get()
///     .await?;
/// ```
pub struct QueryBuilder<E> {
    client: AutotaskClient,
    search: Search,
    _entity: PhantomData<fn() -> E>,
}

impl<E> std::fmt::Debug for QueryBuilder<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryBuilder")
            .field("search", &self.search)
            .finish_non_exhaustive()
    }
}

impl<E> FilterBuilder for QueryBuilder<E> {
    fn push_filter(&mut self, filter: Filter) {
        self.search.filter.push(filter);
    }
}

impl<E: Entity> QueryBuilder<E> {
    pub fn new(client: AutotaskClient) -> Self {
        Self {
            client,
            search: Search::default(),
            _entity: PhantomData,
        }
    }

    /// Limit the page size (`MaxRecords`, 1 to 500).
    #[must_use]
    pub fn records(mut self, records: u32) -> Self {
        self.search.max_records = Some(records);
        self
    }

    /// Only return the named fields.
    #[must_use]
    pub fn include_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search
            .include_fields
            .extend(fields.into_iter().map(Into::into));
        self
    }

    /// The criteria accumulated so far.
    pub fn search(&self) -> &Search {
        &self.search
    }

    /// Fetch the first page of matching records.
    ///
    /// # Errors
    ///
    /// Returns an error if the query is invalid, the request fails or the
    /// body lacks `items`.
    #[tracing::instrument(skip(self), fields(entity = E::NAME))]
    pub async fn get(&self) -> Result<Collection<E>> {
        let search = self.search.to_json()?;
        let path = format!("{}/query", E::PATH);

        let response = self
            .client
            .get_with_query(&path, &[("search", search)])
            .await?;
        Collection::from_response(response).await
    }

    /// Fetch every matching record, following `nextPageUrl`.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    #[tracing::instrument(skip(self), fields(entity = E::NAME))]
    pub async fn get_all(&self) -> Result<Vec<E>> {
        let mut page = self.get().await?;
        let mut all_items = Vec::new();
        let mut pages = 1;

        loop {
            let next = page.next_page(&self.client).await?;
            all_items.append(&mut page.items);

            match next {
                Some(next) => page = next,
                None => break,
            }

            pages += 1;
            // Safety limit to prevent infinite loops
            if pages > MAX_PAGES {
                tracing::warn!("Reached pagination limit of {} pages, stopping", MAX_PAGES);
                all_items.append(&mut page.items);
                break;
            }
        }

        Ok(all_items)
    }

    /// Count matching records without fetching them.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body lacks `queryCount`.
    #[tracing::instrument(skip(self), fields(entity = E::NAME))]
    pub async fn count(&self) -> Result<u64> {
        let search = self.search.to_json()?;
        let path = format!("{}/query/count", E::PATH);

        let response = self
            .client
            .get_with_query(&path, &[("search", search)])
            .await?;
        let body: Value = serde_json::from_slice(&response.bytes().await?)?;

        body.get("queryCount")
            .and_then(Value::as_u64)
            .ok_or(AutotaskError::MissingKey {
                key: "queryCount",
                context: E::NAME,
            })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_operator_parse() {
        assert_eq!("=".parse::<Operator>().unwrap(), Operator::Eq);
        assert_eq!("!=".parse::<Operator>().unwrap(), Operator::NotEq);
        assert_eq!(">=".parse::<Operator>().unwrap(), Operator::Gte);
        assert_eq!("beginsWith".parse::<Operator>().unwrap(), Operator::BeginsWith);
        assert_eq!("NOTIN".parse::<Operator>().unwrap(), Operator::NotIn);
        assert!(matches!(
            "like".parse::<Operator>(),
            Err(AutotaskError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_operator_wire_names_match_serde() {
        for op in [
            Operator::Eq,
            Operator::NotEq,
            Operator::BeginsWith,
            Operator::NotExist,
            Operator::NotIn,
        ] {
            assert_eq!(serde_json::to_value(op).unwrap(), json!(op.as_str()));
            assert_eq!(op.as_str().parse::<Operator>().unwrap(), op);
        }
    }

    #[test]
    fn test_condition_serialization() {
        let filter = Filter::condition("companyID", Operator::Eq, 42);
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            json!({"op": "eq", "field": "companyID", "value": 42})
        );

        let exist = Filter::condition("email", Operator::Exist, "ignored");
        assert_eq!(
            serde_json::to_value(&exist).unwrap(),
            json!({"op": "exist", "field": "email"})
        );

        let udf = Filter::udf("Region", Operator::Contains, "north");
        assert_eq!(
            serde_json::to_value(&udf).unwrap(),
            json!({"op": "contains", "field": "Region", "value": "north", "udf": true})
        );
    }

    #[test]
    fn test_group_round_trip() {
        let group = FilterGroup::new(Conjunction::Or)
            .filter("firstName", Operator::Eq, "Ada")
            .and(|g| g.exists("email").not_exists("phone"))
            .into_filter();

        let value = serde_json::to_value(&group).unwrap();
        assert_eq!(
            value,
            json!({
                "op": "or",
                "items": [
                    {"op": "eq", "field": "firstName", "value": "Ada"},
                    {"op": "and", "items": [
                        {"op": "exist", "field": "email"},
                        {"op": "notExist", "field": "phone"}
                    ]}
                ]
            })
        );

        let parsed: Filter = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, group);
    }

    #[test]
    fn test_search_defaults_to_select_all() {
        let json = Search::default().to_json().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            json!({"Filter": [{"op": "exist", "field": "id"}]})
        );
    }

    #[test]
    fn test_search_record_limits() {
        let mut search = Search {
            max_records: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            search.prepared(),
            Err(AutotaskError::InvalidQuery(_))
        ));

        search.max_records = Some(501);
        assert!(search.prepared().is_err());

        search.max_records = Some(500);
        assert!(search.prepared().is_ok());
    }

    #[test]
    fn test_search_accepts_lowercase_keys() {
        let search: Search = serde_json::from_value(json!({
            "maxRecords": 10,
            "filter": [{"op": "gt", "field": "id", "value": 0}]
        }))
        .unwrap();
        assert_eq!(search.max_records, Some(10));
        assert_eq!(search.filter.len(), 1);
    }
}
