//! Lendcore API CLI binary.
//!
//! A command-line interface for interacting with the Lendcore APIs.

use clap::Parser;
use lendapi::cli::{Cli, Command, Entity};
use lendapi::output::PrettyPrint;
use lendapi::{
    Authorization, AuthorizationFilter, Borrower, BorrowerField, BorrowerFieldFilter,
    CreditClient, Debt, LendClient, Query, QueryParams, Retrieve, Session,
};
use serde::Serialize;
use std::process::ExitCode;
use tabled::{Table, Tabled};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let client = match Session::from_env().and_then(LendClient::new) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set LENDAPI_API_KEY, or LENDAPI_CLIENT_ID and LENDAPI_CLIENT_SECRET");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &LendClient, cli: Cli) -> lendapi::Result<()> {
    match cli.command {
        Command::Get { entity, id } => handle_get(client, entity, &id, cli.json).await,
        Command::List {
            entity,
            page,
            per_page,
            borrower,
        } => handle_list(client, entity, page, per_page, borrower.as_deref(), cli.json).await,
    }
}

async fn handle_get(
    client: &LendClient,
    entity: Entity,
    id: &str,
    json: bool,
) -> lendapi::Result<()> {
    match entity {
        Entity::Borrower => match Borrower::retrieve(client, id).await? {
            Some(borrower) => print_item(&borrower, json)?,
            None => println!("Borrower {id} not found"),
        },
        Entity::Field => match BorrowerField::retrieve(client, id).await? {
            Some(field) => print_json(&field)?,
            None => println!("Borrower field {id} not found"),
        },
        Entity::Authorization => match Authorization::retrieve(client, id).await? {
            Some(authorization) => print_json(&authorization)?,
            None => println!("Authorization {id} not found"),
        },
        Entity::Client => match CreditClient::retrieve(client, id).await? {
            Some(credit_client) => print_item(&credit_client, json)?,
            None => println!("Client {id} not found"),
        },
        Entity::Debt => match Debt::retrieve(client, id).await? {
            Some(debt) => print_item(&debt, json)?,
            None => println!("Debt {id} not found"),
        },
    }
    Ok(())
}

async fn handle_list(
    client: &LendClient,
    entity: Entity,
    page: Option<u32>,
    per_page: Option<u32>,
    borrower: Option<&str>,
    json: bool,
) -> lendapi::Result<()> {
    let params = QueryParams::for_page(page.unwrap_or(1), per_page.unwrap_or(20));

    match entity {
        Entity::Borrower => {
            let borrowers = Borrower::query(client, &Default::default(), &params).await?;
            print_list(&borrowers, json, |b| BorrowerRow::from(b))?;
        }
        Entity::Field => {
            let filter = BorrowerFieldFilter {
                borrower_id: borrower.map(str::to_owned),
                ..Default::default()
            };
            let fields = BorrowerField::query(client, &filter, &params).await?;
            print_list(&fields, json, |f| FieldRow::from(f))?;
        }
        Entity::Authorization => {
            let filter = AuthorizationFilter {
                borrower_id: borrower.map(str::to_owned),
                ..Default::default()
            };
            let authorizations = Authorization::query(client, &filter, &params).await?;
            print_list(&authorizations, json, |a| AuthorizationRow::from(a))?;
        }
        Entity::Client => {
            let clients = CreditClient::query(client, &Default::default(), &params).await?;
            print_list(&clients, json, |c| ClientRow::from(c))?;
        }
        Entity::Debt => {
            let debts = Debt::query(client, &Default::default(), &params).await?;
            print_list(&debts, json, |d| DebtRow::from(d))?;
        }
    }
    Ok(())
}

fn print_item<T: Serialize + PrettyPrint>(item: &T, json: bool) -> lendapi::Result<()> {
    if json {
        print_json(item)
    } else {
        println!("{}", item.pretty_print());
        Ok(())
    }
}

fn print_json<T: Serialize>(item: &T) -> lendapi::Result<()> {
    println!("{}", serde_json::to_string_pretty(item)?);
    Ok(())
}

fn print_list<T, R, F>(items: &[T], json: bool, to_row: F) -> lendapi::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        println!("\n{} item(s)", items.len());
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct BorrowerRow {
    id: String,
    persona: String,
    label: String,
}

impl From<&Borrower> for BorrowerRow {
    fn from(b: &Borrower) -> Self {
        Self {
            id: b.id.clone(),
            persona: b.persona.clone(),
            label: b.label.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct FieldRow {
    id: String,
    key: String,
    value: String,
}

impl From<&BorrowerField> for FieldRow {
    fn from(f: &BorrowerField) -> Self {
        Self {
            id: f.id.clone(),
            key: f.key.clone(),
            value: f.value.to_string(),
        }
    }
}

#[derive(Tabled)]
struct AuthorizationRow {
    id: String,
    key: String,
    identity: String,
}

impl From<&Authorization> for AuthorizationRow {
    fn from(a: &Authorization) -> Self {
        Self {
            id: a.id.clone(),
            key: a.key.clone(),
            identity: format!("{}={}", a.identity_key, a.identity_value),
        }
    }
}

#[derive(Tabled)]
struct ClientRow {
    id: String,
    #[tabled(rename = "legal name")]
    legal_name: String,
    status: String,
}

impl From<&CreditClient> for ClientRow {
    fn from(c: &CreditClient) -> Self {
        Self {
            id: c.id.clone(),
            legal_name: c.legal_name.clone(),
            status: c.status.clone(),
        }
    }
}

#[derive(Tabled)]
struct DebtRow {
    id: String,
    status: String,
    balance: String,
}

impl From<&Debt> for DebtRow {
    fn from(d: &Debt) -> Self {
        Self {
            id: d.id.clone(),
            status: d.status.clone(),
            balance: format!("{} {}", d.balance.total.amount, d.balance.total.currency),
        }
    }
}
