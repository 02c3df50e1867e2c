//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the autotask binary.

use std::str::FromStr;

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;

use crate::error::{AutotaskError, Result};
use crate::query::{Filter, Operator};

/// Autotask API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "autotask", about = "Autotask PSA API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a single entity by ID.
    Get {
        /// The type of entity to get.
        entity: EntityKind,

        /// The entity ID.
        id: i64,
    },

    /// Search entities.
    Query {
        /// The type of entity to search.
        entity: EntityKind,

        /// Filter condition as `field:op[:value]`, e.g. `companyID:eq:42`.
        #[arg(long = "filter")]
        filters: Vec<FilterArg>,

        /// User-defined field condition as `field:op[:value]`.
        #[arg(long = "udf")]
        udfs: Vec<FilterArg>,

        /// Page size (1 to 500).
        #[arg(long)]
        records: Option<u32>,

        /// Follow pagination and return every match.
        #[arg(long)]
        all: bool,

        /// Only return these fields.
        #[arg(long, value_delimiter = ',')]
        fields: Vec<String>,
    },

    /// Count entities matching the filters.
    Count {
        /// The type of entity to count.
        entity: EntityKind,

        /// Filter condition as `field:op[:value]`.
        #[arg(long = "filter")]
        filters: Vec<FilterArg>,

        /// User-defined field condition as `field:op[:value]`.
        #[arg(long = "udf")]
        udfs: Vec<FilterArg>,
    },

    /// Delete an entity.
    Delete {
        /// The type of entity to delete.
        entity: EntityKind,

        /// The entity ID.
        id: i64,

        /// Parent ID for child-scoped entities (company for contacts,
        /// service call for service call tasks).
        #[arg(long)]
        parent: Option<i64>,
    },

    /// Show entity metadata.
    Describe {
        /// The type of entity to describe.
        entity: EntityKind,

        /// List field definitions instead of capabilities.
        #[arg(long)]
        fields: bool,
    },

    /// Look up the zone an API user belongs to.
    Zone {
        /// The API user name.
        username: String,
    },
}

/// Entity types that can be operated on.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    #[value(alias = "companies")]
    Company,
    #[value(alias = "contacts")]
    Contact,
    #[value(alias = "contract-service-adjustments")]
    ContractServiceAdjustment,
    #[value(alias = "contract-service-bundle-adjustments")]
    ContractServiceBundleAdjustment,
    #[value(alias = "contract-ticket-purchases")]
    ContractTicketPurchase,
    #[value(alias = "resource-role-departments")]
    ResourceRoleDepartment,
    #[value(alias = "resource-roles")]
    ResourceRole,
    #[value(alias = "service-call-tasks")]
    ServiceCallTask,
    #[value(alias = "change-request-links")]
    ChangeRequestLink,
}

/// A `field:op[:value]` filter argument.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterArg {
    pub field: String,
    pub op: Operator,
    pub value: Value,
}

impl FilterArg {
    /// Convert into a standard field condition.
    pub fn into_filter(self) -> Filter {
        Filter::condition(self.field, self.op, self.value)
    }

    /// Convert into a user-defined field condition.
    pub fn into_udf_filter(self) -> Filter {
        Filter::udf(self.field, self.op, self.value)
    }
}

impl FromStr for FilterArg {
    type Err = AutotaskError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.splitn(3, ':');
        let field = parts.next().unwrap_or_default().trim();
        let op = parts.next().ok_or_else(|| {
            AutotaskError::InvalidQuery(format!("expected field:op[:value], got '{s}'"))
        })?;
        if field.is_empty() {
            return Err(AutotaskError::InvalidQuery(format!("missing field in '{s}'")));
        }

        let op: Operator = op.parse()?;
        let value = match parts.next() {
            Some(raw) => infer_value(raw),
            None if op.takes_value() => {
                return Err(AutotaskError::InvalidQuery(format!(
                    "operator '{op}' needs a value in '{s}'"
                )))
            }
            None => Value::Null,
        };

        Ok(Self {
            field: field.to_string(),
            op,
            value,
        })
    }
}

/// Numbers and booleans become JSON numbers and booleans; `in`/`notIn`
/// lists are written comma-separated.
fn infer_value(raw: &str) -> Value {
    if raw.contains(',') {
        return Value::Array(raw.split(',').map(infer_scalar).collect());
    }
    infer_scalar(raw)
}

fn infer_scalar(raw: &str) -> Value {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<i64>() {
        return Value::from(n);
    }
    if let Ok(f) = raw.parse::<f64>() {
        return Value::from(f);
    }
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_filter_arg_infers_types() {
        let arg: FilterArg = "companyID:eq:42".parse().unwrap();
        assert_eq!(arg.field, "companyID");
        assert_eq!(arg.op, Operator::Eq);
        assert_eq!(arg.value, json!(42));

        let arg: FilterArg = "isActive:=:true".parse().unwrap();
        assert_eq!(arg.value, json!(true));

        let arg: FilterArg = "lastName:beginsWith:Sm".parse().unwrap();
        assert_eq!(arg.value, json!("Sm"));

        let arg: FilterArg = "id:in:1,2,3".parse().unwrap();
        assert_eq!(arg.value, json!([1, 2, 3]));
    }

    #[test]
    fn test_filter_arg_keeps_colons_in_value() {
        let arg: FilterArg = "webAddress:eq:https://acme.example".parse().unwrap();
        assert_eq!(arg.value, json!("https://acme.example"));
    }

    #[test]
    fn test_filter_arg_exist_without_value() {
        let arg: FilterArg = "phone:exist".parse().unwrap();
        assert_eq!(arg.op, Operator::Exist);
        assert_eq!(
            arg.into_filter(),
            Filter::condition("phone", Operator::Exist, Value::Null)
        );
    }

    #[test]
    fn test_filter_arg_errors() {
        assert!("companyID".parse::<FilterArg>().is_err());
        assert!("companyID:eq".parse::<FilterArg>().is_err());
        assert!(":eq:1".parse::<FilterArg>().is_err());
        assert!("companyID:like:1".parse::<FilterArg>().is_err());
    }
}
