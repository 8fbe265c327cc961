//! Command-line interface.
//!
//! ## Commands
//!
//! - `list` - Show one page of restaurants
//! - `categories` - List known categories
//! - `filters` - Show the filter-option catalog
//! - `create` / `update <id>` - Save a restaurant
//! - `delete <id>` - Delete a restaurant
//! - `browse` - Interactive session over the directory screen
//!
//! Settings come from the environment (see [`Config`]); `--api-url` and
//! `--per-page` override them.

pub mod browse;

use std::io::{self, BufRead, Write};

use clap::{Args, Parser, Subcommand};

use crate::api::ApiClient;
use crate::config::Config;
use crate::errors::AppError;
use crate::form::{FormEditor, FormMode, RestaurantForm};
use crate::models::{ParkingKind, RestaurantId};
use crate::state::{FilterChange, FilterStore, ListParams, Sort};
use crate::view::render_list;

/// Result type of command handlers.
pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Restaurant Directory command-line client.
#[derive(Debug, Parser)]
#[command(name = "restaurant-directory")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Backend base URL (overrides RESTAURANTS_API_URL).
    #[arg(long)]
    pub api_url: Option<String>,

    /// Page size (overrides RESTAURANTS_PER_PAGE).
    #[arg(long)]
    pub per_page: Option<u32>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Apply command-line overrides on top of `config`.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(url) = &self.api_url {
            config.api_url = url.trim_end_matches('/').to_string();
        }
        if let Some(per_page) = self.per_page.filter(|n| *n > 0) {
            config.per_page = per_page;
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show one page of restaurants.
    List(ListArgs),
    /// List known categories.
    Categories,
    /// Show the values offered for each filter.
    Filters,
    /// Create a restaurant.
    Create(RecordArgs),
    /// Replace the fields of an existing restaurant.
    Update {
        id: String,
        #[command(flatten)]
        record: RecordArgs,
    },
    /// Delete a restaurant.
    Delete {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Interactive browsing session.
    Browse,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Filter, sort and page selection for `list`.
#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Filter as KEY=VALUE (repeatable), e.g. `city=Phoenix` or `wifi=free`.
    #[arg(long = "filter", short = 'f', value_name = "KEY=VALUE")]
    pub filters: Vec<String>,

    /// Require a parking kind (repeatable): garage, street, validated, lot, valet.
    #[arg(long = "parking", value_name = "KIND")]
    pub parking: Vec<String>,

    /// Sort field: stars, review_count or name.
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort order: asc or desc.
    #[arg(long, requires = "sort")]
    pub order: Option<String>,

    #[arg(long, default_value_t = 1)]
    pub page: u32,
}

impl ListArgs {
    /// Build list parameters, going through the same merge rules as the
    /// interactive front-end.
    pub fn to_params(&self, per_page: u32) -> Result<ListParams, AppError> {
        let mut store = FilterStore::new(per_page);

        let changes = self
            .filters
            .iter()
            .map(|raw| {
                let (key, value) = split_assignment(raw)?;
                FilterChange::parse(key, value)
            })
            .collect::<Result<Vec<_>, _>>()?;
        store.merge(changes);

        for raw in &self.parking {
            store.toggle_parking(parse_parking_kind(raw)?);
        }
        if let Some(field) = &self.sort {
            store.set_sort(Some(Sort::parse(field, self.order.as_deref())?));
        }
        store.set_page(self.page);

        Ok(store.params().clone())
    }
}

/// Record fields for `create` and `update`.
#[derive(Debug, Clone, Args)]
pub struct RecordArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub address: String,
    #[arg(long)]
    pub city: String,
    /// Two-letter state code.
    #[arg(long)]
    pub state: String,
    /// Comma-separated categories.
    #[arg(long, default_value = "")]
    pub categories: String,
    /// Price tier 1-4.
    #[arg(long = "price-range", default_value = "1")]
    pub price_range: String,
    /// no, free or paid.
    #[arg(long, default_value = "no")]
    pub wifi: String,
    /// Parking kind offered (repeatable).
    #[arg(long = "parking", value_name = "KIND")]
    pub parking: Vec<String>,
}

impl RecordArgs {
    pub fn to_form(&self) -> Result<RestaurantForm, AppError> {
        let mut form = RestaurantForm::default();
        for (key, value) in [
            ("name", &self.name),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("categories", &self.categories),
            ("price_range", &self.price_range),
            ("wifi", &self.wifi),
        ] {
            form.set_field(key, value)?;
        }
        for raw in &self.parking {
            form.parking.set(parse_parking_kind(raw)?, true);
        }
        form.validate()?;
        Ok(form)
    }
}

/// Split `key=value`.
pub fn split_assignment(raw: &str) -> Result<(&str, &str), AppError> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim(), value.trim()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| AppError::InvalidFilter(format!("expected KEY=VALUE, got {:?}", raw)))
}

pub fn parse_parking_kind(raw: &str) -> Result<ParkingKind, AppError> {
    ParkingKind::from_str(raw).ok_or_else(|| {
        AppError::InvalidFilter(format!(
            "unknown parking kind {:?} (expected garage, street, validated, lot or valet)",
            raw
        ))
    })
}

/// Run the parsed command.
pub async fn execute(cli: Cli, config: Config) -> CliResult {
    let api = ApiClient::new(&config)?;
    let format = cli.format;

    match cli.command {
        Commands::List(args) => list(&api, &args, &config, format).await,
        Commands::Categories => categories(&api, format).await,
        Commands::Filters => filters(&api, format).await,
        Commands::Create(record) => save(&api, FormMode::Create, &record, format).await,
        Commands::Update { id, record } => {
            save(&api, FormMode::Edit(RestaurantId::new(id)), &record, format).await
        }
        Commands::Delete { id, yes } => delete(&api, &RestaurantId::new(id), yes, format).await,
        Commands::Browse => browse::run(api, &config).await,
    }
}

async fn list(api: &ApiClient, args: &ListArgs, config: &Config, format: OutputFormat) -> CliResult {
    let params = args.to_params(config.per_page)?;
    let page = api.list(&params).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&page)?),
        OutputFormat::Text => {
            println!("{}", render_list(&page.restaurants, params.page, page.total_pages));
            if page.rejected > 0 {
                eprintln!("{} malformed record(s) skipped", page.rejected);
            }
        }
    }
    Ok(())
}

async fn categories(api: &ApiClient, format: OutputFormat) -> CliResult {
    let categories = api.list_categories().await?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&categories)?),
        OutputFormat::Text => {
            for category in &categories {
                println!("{}", category);
            }
        }
    }
    Ok(())
}

async fn filters(api: &ApiClient, format: OutputFormat) -> CliResult {
    let options = api.filter_options().await?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&options)?),
        OutputFormat::Text => {
            let parking = options
                .parking_kinds()
                .iter()
                .map(|kind| kind.as_str())
                .collect::<Vec<_>>();
            for (label, values) in [
                ("price_range", options.price_range.join(", ")),
                ("wifi", options.wifi.join(", ")),
                ("alcohol", options.alcohol.join(", ")),
                ("smoking", options.smoking.join(", ")),
                ("delivery", options.delivery.join(", ")),
                ("pets_allowed", options.pets_allowed.join(", ")),
                ("parking", parking.join(", ")),
            ] {
                println!("{:<13} {}", label, values);
            }
        }
    }
    Ok(())
}

async fn save(api: &ApiClient, mode: FormMode, record: &RecordArgs, format: OutputFormat) -> CliResult {
    let mut editor = FormEditor::new(mode, record.to_form()?);
    let ack = editor.submit(api).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&ack)?),
        OutputFormat::Text => {
            let message = ack.message.as_deref().unwrap_or("Saved");
            match &ack.id {
                Some(id) => println!("{} ({})", message, id),
                None => println!("{}", message),
            }
        }
    }
    Ok(())
}

async fn delete(api: &ApiClient, id: &RestaurantId, yes: bool, format: OutputFormat) -> CliResult {
    if !yes && !confirm(&format!("Delete restaurant {}? This action cannot be undone.", id))? {
        println!("Cancelled");
        return Ok(());
    }

    let ack = api.delete(id).await?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&ack)?),
        OutputFormat::Text => println!("{}", ack.message.as_deref().unwrap_or("Deleted")),
    }
    Ok(())
}

fn confirm(question: &str) -> io::Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PriceRange, WifiTier};
    use crate::state::{SortField, SortOrder};

    #[test]
    fn test_overrides_from_flags() {
        let cli = Cli::parse_from([
            "restaurant-directory",
            "--api-url",
            "http://api.example.com/",
            "--per-page",
            "12",
            "--format",
            "json",
            "categories",
        ]);

        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.api_url, "http://api.example.com");
        assert_eq!(config.per_page, 12);
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(cli.command, Commands::Categories));
    }

    #[test]
    fn test_list_args_to_params() {
        let cli = Cli::parse_from([
            "restaurant-directory",
            "list",
            "-f",
            "city=Phoenix",
            "--filter",
            "wifi=free",
            "--filter",
            "price_range_min=",
            "--parking",
            "garage",
            "--sort",
            "stars",
            "--order",
            "asc",
            "--page",
            "3",
        ]);
        let Commands::List(args) = cli.command else {
            panic!("expected list command");
        };

        let params = args.to_params(30).unwrap();
        assert_eq!(params.page, 3);
        assert_eq!(params.filters.city.as_deref(), Some("Phoenix"));
        assert_eq!(params.filters.wifi, Some(WifiTier::Free));
        assert_eq!(params.filters.price_range_min, None);
        assert_eq!(params.sort, Some(Sort::new(SortField::Stars, SortOrder::Asc)));

        let pairs = params.query_pairs();
        assert!(pairs.contains(&("parking", r#"{"garage":true}"#.to_string())));
        assert!(!pairs.iter().any(|(k, _)| *k == "price_range_min"));
    }

    #[test]
    fn test_list_args_reject_bad_input() {
        let args = ListArgs {
            filters: vec!["city".into()],
            ..Default::default()
        };
        assert!(args.to_params(30).is_err());

        let args = ListArgs {
            parking: vec!["helipad".into()],
            ..Default::default()
        };
        assert!(args.to_params(30).is_err());
    }

    #[test]
    fn test_record_args_to_form() {
        let cli = Cli::parse_from([
            "restaurant-directory",
            "update",
            "abc123",
            "--name",
            "Pho Real",
            "--address",
            "1 Main St",
            "--city",
            "Austin",
            "--state",
            "TX",
            "--price-range",
            "2",
            "--wifi",
            "free",
            "--parking",
            "lot",
        ]);
        let Commands::Update { id, record } = cli.command else {
            panic!("expected update command");
        };
        assert_eq!(id, "abc123");

        let form = record.to_form().unwrap();
        assert_eq!(form.price_range, PriceRange::Moderate);
        assert_eq!(form.wifi, WifiTier::Free);
        assert!(form.parking.lot);
        assert!(!form.parking.garage);

        let bad = RecordArgs {
            state: "Texas".into(),
            ..record
        };
        assert!(bad.to_form().is_err());
    }

    #[test]
    fn test_split_assignment() {
        assert_eq!(split_assignment("city = Tampa").unwrap(), ("city", "Tampa"));
        assert_eq!(split_assignment("wifi=").unwrap(), ("wifi", ""));
        assert!(split_assignment("=x").is_err());
    }
}
