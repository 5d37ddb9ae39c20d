//! Roster commands (admin workflows).

use secrecy::SecretString;

use clementine_core::{AccountStatus, Email, UserId};
use clementine_crm::models::{ClientRecord, ClientUpdate, NewClient};
use clementine_crm::services::AccountService;
use clementine_crm::validate;

use super::{CliError, Context, require_valid};

/// List the roster, most-recent-first.
pub fn list() -> Result<(), CliError> {
    let ctx = Context::open()?;
    print_roster(&AccountService::new(&ctx.store).list());
    Ok(())
}

/// Search the roster by name, email, or company.
pub fn search(query: &str) -> Result<(), CliError> {
    let ctx = Context::open()?;
    print_roster(&AccountService::new(&ctx.store).search(query));
    Ok(())
}

/// Create a client account with its credential.
pub fn create(
    name: &str,
    email: &str,
    password: &str,
    phone: Option<String>,
    company: Option<String>,
    inactive: bool,
) -> Result<(), CliError> {
    require_valid(validate::client_form(
        name,
        email,
        phone.as_deref(),
        Some(password),
    ))?;
    let email = parse_email(email)?;

    let ctx = Context::open()?;
    let record = AccountService::new(&ctx.store).create(NewClient {
        name: name.to_owned(),
        email,
        phone,
        company,
        status: if inactive {
            AccountStatus::Inactive
        } else {
            AccountStatus::Active
        },
        password: SecretString::from(password.to_owned()),
    })?;

    tracing::info!("Created client {} <{}> (id {})", record.name, record.email, record.id);
    Ok(())
}

/// Update a client record.
pub fn update(
    id: &str,
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    company: Option<String>,
    status: Option<String>,
) -> Result<(), CliError> {
    let parsed_email = email.as_deref().map(parse_email).transpose()?;
    let status = status
        .map(|s| {
            s.parse::<AccountStatus>().map_err(|message| {
                CliError::Validation(vec![validate::FieldError {
                    field: "status",
                    message,
                }])
            })
        })
        .transpose()?;

    let ctx = Context::open()?;
    let record = AccountService::new(&ctx.store).update(
        &UserId::new(id),
        ClientUpdate {
            name,
            email: parsed_email,
            phone,
            company,
            status,
        },
    )?;

    tracing::info!("Updated client {} <{}>", record.name, record.email);
    Ok(())
}

/// Delete a client account and its credential.
pub fn delete(id: &str) -> Result<(), CliError> {
    let ctx = Context::open()?;
    AccountService::new(&ctx.store).delete(&UserId::new(id))?;
    tracing::info!("Deleted client {id}");
    Ok(())
}

fn parse_email(raw: &str) -> Result<Email, CliError> {
    Email::parse(raw.trim()).map_err(|err| {
        CliError::Validation(vec![validate::FieldError {
            field: "email",
            message: err.to_string(),
        }])
    })
}

fn print_roster(records: &[ClientRecord]) {
    if records.is_empty() {
        tracing::info!("No clients");
        return;
    }
    for record in records {
        tracing::info!(
            "{}  {} <{}>  {}  {}",
            record.id,
            record.name,
            record.email,
            record.status,
            record.company.as_deref().unwrap_or("-"),
        );
    }
}
