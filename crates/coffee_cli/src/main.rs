//! Terminal front-end for the coffee catalog.
//!
//! # Responsibility
//! - Offer list/show/add/edit over the same core operations a desktop UI uses.
//! - Render records as a plain text table and errors as one-line messages.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use coffee_core::{
    default_log_level, init_logging, parse_coffee_state, parse_roast_degree, CatalogService,
    CoffeeForm, CoffeeRecord, CoffeeState, CoffeeStore, RoastDegree, StoreConfig,
    DEFAULT_DB_FILE_NAME,
};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "coffee", version, about = "Coffee catalog manager")]
struct Cli {
    /// SQLite database file holding the `coffee` table.
    #[arg(long, env = "COFFEE_DB_PATH", default_value = DEFAULT_DB_FILE_NAME)]
    db: PathBuf,

    /// Fail instead of creating the database file when it is missing.
    #[arg(long)]
    existing_only: bool,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long)]
    log_dir: Option<String>,

    #[arg(long, default_value_t = default_log_level().to_string())]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every record.
    List,
    /// Print one record.
    Show { id: i64 },
    /// Add a record.
    Add(AddArgs),
    /// Overwrite a record. Omitted fields keep their current value.
    Edit(EditArgs),
    /// Print the selectable roast degrees and states.
    Options,
}

#[derive(Debug, Args)]
struct AddArgs {
    #[arg(long)]
    name: String,
    #[arg(long, value_parser = parse_roast_degree)]
    roast: RoastDegree,
    #[arg(long, value_parser = parse_coffee_state)]
    state: CoffeeState,
    #[arg(long, default_value = "")]
    flavor: String,
    #[arg(long)]
    price: String,
    /// Grams per package; leave out when unknown.
    #[arg(long, default_value = "")]
    volume: String,
}

#[derive(Debug, Args)]
struct EditArgs {
    id: i64,
    #[arg(long)]
    name: Option<String>,
    #[arg(long, value_parser = parse_roast_degree)]
    roast: Option<RoastDegree>,
    #[arg(long, value_parser = parse_coffee_state)]
    state: Option<CoffeeState>,
    #[arg(long)]
    flavor: Option<String>,
    #[arg(long)]
    price: Option<String>,
    /// Pass an empty string to clear the volume.
    #[arg(long)]
    volume: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        init_logging(&cli.log_level, log_dir)
            .map_err(anyhow::Error::msg)
            .context("failed to initialize logging")?;
    }

    let mut config = StoreConfig::with_path(&cli.db);
    if cli.existing_only {
        config = config.require_existing();
    }
    let service = CatalogService::new(CoffeeStore::new(config));

    match cli.command {
        Command::List => {
            let summary = service.load_catalog().context("failed to load catalog")?;
            print_table(&summary.records);
            println!("{}", summary.message);
        }
        Command::Show { id } => {
            let record = service
                .record(id)
                .with_context(|| format!("failed to load coffee {id}"))?;
            print_table(std::slice::from_ref(&record));
        }
        Command::Add(args) => {
            let form = CoffeeForm {
                sort_name: args.name,
                roast_degree: args.roast,
                state: args.state,
                flavor_description: args.flavor,
                price: args.price,
                package_volume: args.volume,
            };
            let id = service.add(&form).context("failed to add coffee")?;
            println!("Added coffee {id}.");
        }
        Command::Edit(args) => {
            let id = args.id;
            let current = service
                .record(id)
                .with_context(|| format!("failed to load coffee {id}"))?;
            let form = edit_form(&current, args);
            service
                .edit(id, &form)
                .with_context(|| format!("failed to edit coffee {id}"))?;
            println!("Updated coffee {id}.");
        }
        Command::Options => {
            let roasts: Vec<_> = RoastDegree::ALL.iter().map(|d| d.as_str()).collect();
            let states: Vec<_> = CoffeeState::ALL.iter().map(|s| s.as_str()).collect();
            println!("roast: {}", roasts.join(", "));
            println!("state: {}", states.join(", "));
        }
    }

    Ok(())
}

fn edit_form(current: &CoffeeRecord, args: EditArgs) -> CoffeeForm {
    CoffeeForm {
        sort_name: args.name.unwrap_or_else(|| current.sort_name.clone()),
        roast_degree: args.roast.unwrap_or(current.roast_degree),
        state: args.state.unwrap_or(current.state),
        flavor_description: args
            .flavor
            .unwrap_or_else(|| current.flavor_description.clone()),
        price: args.price.unwrap_or_else(|| current.price.to_string()),
        package_volume: args.volume.unwrap_or_else(|| {
            current
                .package_volume
                .map(|volume| volume.to_string())
                .unwrap_or_default()
        }),
    }
}

fn print_table(records: &[CoffeeRecord]) {
    println!(
        "{:>4}  {:<20}  {:<6}  {:<6}  {:>10}  {:>8}  Flavor",
        "ID", "Sort", "Roast", "State", "Price", "Volume"
    );
    for record in records {
        let volume = record
            .package_volume
            .map(|volume| volume.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>4}  {:<20}  {:<6}  {:<6}  {:>10.2}  {:>8}  {}",
            record.id,
            record.sort_name,
            record.roast_degree.as_str(),
            record.state.as_str(),
            record.price,
            volume,
            record.flavor_description
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{edit_form, Cli, Command, EditArgs};
    use clap::{CommandFactory, Parser};
    use coffee_core::{CoffeeRecord, CoffeeState, RoastDegree};

    fn record() -> CoffeeRecord {
        CoffeeRecord {
            id: 3,
            sort_name: "Arabica".to_string(),
            roast_degree: RoastDegree::Medium,
            state: CoffeeState::Bean,
            flavor_description: "nutty".to_string(),
            price: 450.0,
            package_volume: Some(250),
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn add_parses_closed_list_values() {
        let cli = Cli::try_parse_from([
            "coffee", "add", "--name", "Kenya", "--roast", "Dark", "--state", "ground",
            "--price", "300",
        ])
        .unwrap();
        match cli.command {
            Command::Add(args) => {
                assert_eq!(args.roast, RoastDegree::Dark);
                assert_eq!(args.state, CoffeeState::Ground);
                assert_eq!(args.volume, "");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn add_rejects_unknown_roast() {
        let result = Cli::try_parse_from([
            "coffee", "add", "--name", "Kenya", "--roast", "burnt", "--state", "bean",
            "--price", "300",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn edit_form_keeps_omitted_fields_and_can_clear_volume() {
        let args = EditArgs {
            id: 3,
            name: None,
            roast: Some(RoastDegree::Dark),
            state: None,
            flavor: None,
            price: None,
            volume: Some(String::new()),
        };

        let form = edit_form(&record(), args);
        assert_eq!(form.sort_name, "Arabica");
        assert_eq!(form.roast_degree, RoastDegree::Dark);
        assert_eq!(form.state, CoffeeState::Bean);
        assert_eq!(form.price, "450");
        assert_eq!(form.package_volume, "");
    }
}
