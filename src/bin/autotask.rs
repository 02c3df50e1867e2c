//! Autotask API CLI binary.
//!
//! A command-line interface for interacting with the Autotask REST API.

use std::collections::BTreeSet;
use std::process::ExitCode;

use autotask::cli::{Cli, Command, EntityKind, FilterArg};
use autotask::{
    AutotaskClient, AutotaskError, ChangeRequestLink, Company, Contact, ContractServiceAdjustment,
    ContractServiceBundleAdjustment, ContractTicketPurchase, Describe, Entity, EntityField,
    FilterBuilder, NullPolicy, PrettyPrint, QueryBuilder, ResourceRole, ResourceRoleDepartment,
    ServiceCallTask, ZoneInformation,
};
use clap::Parser;
use serde::Serialize;
use serde_json::Value;
use tabled::builder::Builder;
use tabled::{Table, Tabled};
use tracing_subscriber::EnvFilter;

/// Run a generic handler with the entity type selected on the command line.
macro_rules! dispatch {
    ($kind:expr, $handler:ident($($arg:expr),* $(,)?)) => {
        match $kind {
            EntityKind::Company => $handler::<Company>($($arg),*).await,
            EntityKind::Contact => $handler::<Contact>($($arg),*).await,
            EntityKind::ContractServiceAdjustment => {
                $handler::<ContractServiceAdjustment>($($arg),*).await
            }
            EntityKind::ContractServiceBundleAdjustment => {
                $handler::<ContractServiceBundleAdjustment>($($arg),*).await
            }
            EntityKind::ContractTicketPurchase => {
                $handler::<ContractTicketPurchase>($($arg),*).await
            }
            EntityKind::ResourceRoleDepartment => {
                $handler::<ResourceRoleDepartment>($($arg),*).await
            }
            EntityKind::ResourceRole => $handler::<ResourceRole>($($arg),*).await,
            EntityKind::ServiceCallTask => $handler::<ServiceCallTask>($($arg),*).await,
            EntityKind::ChangeRequestLink => $handler::<ChangeRequestLink>($($arg),*).await,
        }
    };
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Zone lookup is unauthenticated
    if let Command::Zone { username } = &cli.command {
        return finish(handle_zone(username, cli.json).await);
    }

    let client = match AutotaskClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!(
                "Hint: Set AUTOTASK_USERNAME, AUTOTASK_SECRET and AUTOTASK_INTEGRATION_CODE environment variables"
            );
            return ExitCode::FAILURE;
        }
    };

    finish(run(&client, cli).await)
}

fn finish(result: autotask::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &AutotaskClient, cli: Cli) -> autotask::Result<()> {
    let json = cli.json;
    match cli.command {
        Command::Get { entity, id } => dispatch!(entity, handle_get(client, id, json)),
        Command::Query {
            entity,
            filters,
            udfs,
            records,
            all,
            fields,
        } => {
            let opts = QueryOpts {
                filters,
                udfs,
                records,
                all,
                fields,
                json,
            };
            dispatch!(entity, handle_query(client, opts))
        }
        Command::Count {
            entity,
            filters,
            udfs,
        } => dispatch!(entity, handle_count(client, filters, udfs, json)),
        Command::Delete { entity, id, parent } => handle_delete(client, entity, id, parent).await,
        Command::Describe { entity, fields } => match entity {
            EntityKind::ContractServiceAdjustment => {
                handle_describe::<ContractServiceAdjustment>(client, fields, json).await
            }
            EntityKind::ContractServiceBundleAdjustment => {
                handle_describe::<ContractServiceBundleAdjustment>(client, fields, json).await
            }
            other => Err(unsupported(other, "describe")),
        },
        Command::Zone { username } => handle_zone(&username, json).await,
    }
}

struct QueryOpts {
    filters: Vec<FilterArg>,
    udfs: Vec<FilterArg>,
    records: Option<u32>,
    all: bool,
    fields: Vec<String>,
    json: bool,
}

async fn handle_get<E: Entity>(
    client: &AutotaskClient,
    id: i64,
    json: bool,
) -> autotask::Result<()> {
    let entity = client.service::<E>().find_by_id(id).await?;
    output_single(&entity, json)
}

async fn handle_query<E: Entity>(client: &AutotaskClient, opts: QueryOpts) -> autotask::Result<()> {
    let mut query = with_filters(client.service::<E>().query(), opts.filters, opts.udfs);
    if let Some(records) = opts.records {
        query = query.records(records);
    }
    if !opts.fields.is_empty() {
        query = query.include_fields(opts.fields);
    }

    if opts.all {
        let items = query.get_all().await?;
        output_list(&items, opts.json)
    } else {
        let page = query.get().await?;
        let more = page.next_page_url().is_some();
        output_list(&page.items, opts.json)?;
        if more && !opts.json {
            println!("\n(more available, use --all to fetch every page)");
        }
        Ok(())
    }
}

async fn handle_count<E: Entity>(
    client: &AutotaskClient,
    filters: Vec<FilterArg>,
    udfs: Vec<FilterArg>,
    json: bool,
) -> autotask::Result<()> {
    let count = with_filters(client.service::<E>().query(), filters, udfs)
        .count()
        .await?;
    if json {
        println!("{}", serde_json::json!({ "queryCount": count }));
    } else {
        println!("{count}");
    }
    Ok(())
}

async fn handle_delete(
    client: &AutotaskClient,
    entity: EntityKind,
    id: i64,
    parent: Option<i64>,
) -> autotask::Result<()> {
    match entity {
        EntityKind::Contact => {
            let company_id = parent.ok_or(AutotaskError::MissingParentId {
                entity_type: Contact::NAME,
            })?;
            client.contacts().delete_by_id((company_id, id)).await?;
        }
        EntityKind::ServiceCallTask => {
            let service_call_id = parent.ok_or(AutotaskError::MissingParentId {
                entity_type: ServiceCallTask::NAME,
            })?;
            client
                .service_call_tasks()
                .delete_by_id((service_call_id, id))
                .await?;
        }
        EntityKind::ChangeRequestLink => {
            client.change_request_links().delete_by_id(id).await?;
        }
        other => return Err(unsupported(other, "delete")),
    }
    println!("Deleted {entity:?} #{id}");
    Ok(())
}

async fn handle_describe<E: Describe>(
    client: &AutotaskClient,
    fields: bool,
    json: bool,
) -> autotask::Result<()> {
    let service = client.service::<E>();
    if fields {
        let fields = service.get_entity_fields().await?;
        if json {
            println!("{}", serde_json::to_string_pretty(&fields.fields)?);
        } else {
            let rows: Vec<FieldRow> = fields.iter().map(FieldRow::from).collect();
            println!("{}", Table::new(rows));
        }
        Ok(())
    } else {
        let info = service.get_entity_information().await?;
        output_single(&info, json)
    }
}

async fn handle_zone(username: &str, json: bool) -> autotask::Result<()> {
    let zone = ZoneInformation::fetch(username).await?;
    output_single(&zone, json)
}

fn with_filters<E: Entity>(
    mut query: QueryBuilder<E>,
    filters: Vec<FilterArg>,
    udfs: Vec<FilterArg>,
) -> QueryBuilder<E> {
    for filter in filters {
        query.push_filter(filter.into_filter());
    }
    for udf in udfs {
        query.push_filter(udf.into_udf_filter());
    }
    query
}

fn unsupported(entity: EntityKind, operation: &'static str) -> AutotaskError {
    let entity_type = match entity {
        EntityKind::Company => Company::NAME,
        EntityKind::Contact => Contact::NAME,
        EntityKind::ContractServiceAdjustment => ContractServiceAdjustment::NAME,
        EntityKind::ContractServiceBundleAdjustment => ContractServiceBundleAdjustment::NAME,
        EntityKind::ContractTicketPurchase => ContractTicketPurchase::NAME,
        EntityKind::ResourceRoleDepartment => ResourceRoleDepartment::NAME,
        EntityKind::ResourceRole => ResourceRole::NAME,
        EntityKind::ServiceCallTask => ServiceCallTask::NAME,
        EntityKind::ChangeRequestLink => ChangeRequestLink::NAME,
    };
    AutotaskError::Unsupported {
        entity_type,
        operation,
    }
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> autotask::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

/// Print entities as a JSON array or as a table whose columns are the union
/// of populated fields, `id` first.
fn output_list<E: Entity>(items: &[E], json: bool) -> autotask::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
        return Ok(());
    }

    let rows = items
        .iter()
        .map(|item| item.to_fields(NullPolicy::Omit))
        .collect::<autotask::Result<Vec<_>>>()?;

    let mut columns: BTreeSet<&str> = BTreeSet::new();
    for row in &rows {
        columns.extend(row.keys().map(String::as_str).filter(|k| *k != "id"));
    }
    let columns: Vec<&str> = std::iter::once("id").chain(columns).collect();

    let mut builder = Builder::default();
    builder.push_record(columns.iter().map(|c| c.to_string()));
    for row in &rows {
        builder.push_record(columns.iter().map(|c| row.get(*c).map(cell).unwrap_or_default()));
    }

    println!("{}", builder.build());
    println!("\n{} {}", items.len(), E::PATH);
    Ok(())
}

fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => format!("[{} items]", items.len()),
        other => other.to_string(),
    }
}

// Table row type for field listings

#[derive(Tabled)]
struct FieldRow {
    name: String,
    #[tabled(rename = "type")]
    data_type: String,
    required: bool,
    #[tabled(rename = "read-only")]
    read_only: bool,
    reference: String,
}

impl From<&EntityField> for FieldRow {
    fn from(f: &EntityField) -> Self {
        Self {
            name: f.name.clone(),
            data_type: f.data_type.clone(),
            required: f.is_required,
            read_only: f.is_read_only,
            reference: f.reference_entity_type.clone().unwrap_or_default(),
        }
    }
}
