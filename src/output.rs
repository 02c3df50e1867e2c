//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use serde_json::Value;

use crate::config::NullPolicy;
use crate::models::EntityInformation;
use crate::traits::Entity;
use crate::zone::ZoneInformation;

const LABEL_WIDTH: usize = 16;

/// Trait for human-readable key-value output.
///
/// Implemented for every entity and for entity metadata, to provide
/// formatted output suitable for terminal display when `--json` is not
/// specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl<E: Entity> PrettyPrint for E {
    fn pretty_print(&self) -> String {
        let header = match self.id() {
            Some(id) => format!("{} #{id}", E::NAME),
            None => format!("{} (new)", E::NAME),
        };
        let divider = "─".repeat(header.len().max(30));
        let mut lines = vec![header, divider];

        let fields = match self.to_fields(NullPolicy::Omit) {
            Ok(fields) => fields,
            Err(e) => {
                lines.push(line("error", &e.to_string()));
                return lines.join("\n");
            }
        };
        for (name, value) in fields.iter().filter(|(name, _)| *name != "id") {
            match (name.as_str(), value) {
                ("userDefinedFields", Value::Array(udfs)) => {
                    for udf in udfs {
                        let udf_name = udf.get("name").and_then(Value::as_str).unwrap_or("?");
                        let udf_value = udf.get("value").map(display_value).unwrap_or_default();
                        lines.push(line(&format!("udf:{udf_name}"), &udf_value));
                    }
                }
                _ => lines.push(line(name, &display_value(value))),
            }
        }

        lines.join("\n")
    }
}

impl PrettyPrint for EntityInformation {
    fn pretty_print(&self) -> String {
        let divider = "─".repeat(self.name.len().max(30));
        let yes_no = |b: bool| if b { "yes" } else { "no" };

        let mut lines = vec![
            format!("Entity: {}", self.name),
            divider,
            line("Create", yes_no(self.can_create)),
            line("Update", yes_no(self.can_update)),
            line("Delete", yes_no(self.can_delete)),
            line("Query", yes_no(self.can_query)),
            line("UDFs", yes_no(self.has_user_defined_fields)),
        ];

        if self.supports_webhook_callouts {
            lines.push(line("Webhooks", "yes"));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for ZoneInformation {
    fn pretty_print(&self) -> String {
        let header = format!("Zone: {}", self.zone_name.as_deref().unwrap_or("unknown"));
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![header, divider, line("API URL", &self.api_url())];
        if let Some(ref web_url) = self.web_url {
            lines.push(line("Web URL", web_url));
        }
        if let Some(ci) = self.ci {
            lines.push(line("CI", &ci.to_string()));
        }

        lines.join("\n")
    }
}

fn line(label: &str, value: &str) -> String {
    format!("{:<width$}{value}", format!("{label}:"), width = LABEL_WIDTH)
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;
    use crate::{Company, Contact};

    #[derive(Debug, Serialize, Deserialize)]
    struct Scalar(i64);

    impl Entity for Scalar {
        const NAME: &'static str = "Scalar";
        const PATH: &'static str = "Scalars";

        fn id(&self) -> Option<i64> {
            Some(self.0)
        }
    }

    #[test]
    fn test_entity_pretty_print_format() {
        let company: Company = serde_json::from_value(serde_json::json!({
            "id": 42,
            "companyName": "Acme",
            "phone": null,
            "userDefinedFields": [{"name": "Tier", "value": "Gold"}]
        }))
        .unwrap();

        let output = company.pretty_print();
        assert!(output.starts_with("Company #42"));
        assert!(output.contains("companyName:    Acme"));
        assert!(output.contains("udf:Tier:       Gold"));
        assert!(!output.contains("phone"));
    }

    #[test]
    fn test_unserializable_fields_show_error_line() {
        let output = Scalar(3).pretty_print();
        assert!(output.starts_with("Scalar #3"));
        assert!(output.contains("error:"));
        assert!(output.contains("instead of an object"));
    }

    #[test]
    fn test_unsaved_entity_header() {
        let contact = Contact {
            first_name: Some("Ada".to_string()),
            ..Default::default()
        };
        assert!(contact.pretty_print().starts_with("Contact (new)"));
    }

    #[test]
    fn test_zone_pretty_print() {
        let zone = ZoneInformation {
            zone_name: Some("America East".to_string()),
            url: "https://webservices2.autotask.net/ATServicesRest/".to_string(),
            web_url: None,
            ci: Some(7),
        };

        let output = zone.pretty_print();
        assert!(output.starts_with("Zone: America East"));
        assert!(output.contains("https://webservices2.autotask.net/ATServicesRest/V1.0/"));
        assert!(output.contains("CI:             7"));
    }
}
