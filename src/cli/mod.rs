//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the
//! lendapi binary.

use clap::{Parser, Subcommand, ValueEnum};

/// Lendcore API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "lendapi", about = "Lendcore API CLI", version)]
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
    /// Get a single entity by id.
    Get {
        /// The type of entity to get.
        entity: Entity,

        /// The entity id (borrower id, client id/tax id, or debt id).
        id: String,
    },

    /// List entities with optional filtering and pagination.
    List {
        /// The type of entity to list.
        entity: Entity,

        /// Page number (1-indexed).
        #[arg(long)]
        page: Option<u32>,

        /// Number of items per page.
        #[arg(long)]
        per_page: Option<u32>,

        /// Borrower id filter (borrower-field and authorization listings).
        #[arg(long)]
        borrower: Option<String>,
    },
}

/// Entity types that can be operated on.
#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum Entity {
    /// A borrower record.
    #[value(alias = "borrowers")]
    Borrower,
    /// A typed borrower field.
    #[value(alias = "fields", alias = "borrower-fields")]
    Field,
    /// A consent authorization.
    #[value(alias = "authorizations")]
    Authorization,
    /// A credit-management client.
    #[value(alias = "clients")]
    Client,
    /// A debt.
    #[value(alias = "debts")]
    Debt,
}
