//! StockTrack command-line interface.

mod render;

use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use anyhow::{Context, bail};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::json;

use stocktrack_barcode::{
    BarcodeFormat, calculate_ean13_check_digit, country_from_barcode, generate_random_barcode,
    is_plausible_barcode, is_valid_ean13, validate_barcode_format,
};
use stocktrack_core::ProductId;
use stocktrack_infra::{
    FileStorage, StoreConfig, config::DATA_DIR_ENV, config::STORAGE_KEY_ENV, export_csv,
    export_file_name, parse_csv,
};
use stocktrack_inventory::{InventoryStore, ScanResolution, ScanSession};
use stocktrack_products::{ProductDraft, ProductPatch, SortKey, SortOrder, sort_products};

#[derive(Debug, Parser)]
#[command(name = "stocktrack", about = "Small-shop inventory tracker", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// Directory holding the inventory document [env: STOCKTRACK_DATA_DIR]
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Storage key (file name stem) of the inventory document [env: STOCKTRACK_STORAGE_KEY]
    #[arg(long, global = true)]
    storage_key: Option<String>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Barcode utilities (no inventory access)
    Barcode(BarcodeCommand),
    #[command(flatten)]
    Inventory(InventoryCommand),
}

#[derive(Debug, Subcommand)]
enum InventoryCommand {
    /// List all products
    List(ListArgs),
    /// Show one product
    Show { id: ProductId },
    /// Add a product
    Add(AddArgs),
    /// Change fields of a product
    Update(UpdateArgs),
    /// Set the stock quantity of a product (negative values become 0)
    SetStock {
        id: ProductId,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Delete a product
    Delete { id: ProductId },
    /// Find a product by exact barcode
    Find { barcode: String },
    /// Search by name, barcode or supplier
    Search { term: String },
    /// Show current stock and expiry alerts
    Alerts,
    /// Show aggregate statistics
    Stats,
    /// Full report: statistics, alerts and products
    Report,
    /// Resolve scanned codes (reads stdin, one per line, when none are given)
    Scan { codes: Vec<String> },
    /// Export products as CSV
    Export {
        /// Output file; `-` for stdout. Defaults to inventory_<date>.csv
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Import products from CSV
    Import { path: PathBuf },
    /// Drop all data and restore the demo inventory
    Clear {
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Args)]
struct ListArgs {
    #[arg(long)]
    sort: Option<SortKey>,
    #[arg(long, requires = "sort")]
    desc: bool,
}

#[derive(Debug, Args)]
struct AddArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    barcode: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    quantity: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    min_stock: Option<String>,
    #[arg(long)]
    expiry: Option<String>,
    #[arg(long)]
    supplier: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    price: Option<String>,
}

impl From<AddArgs> for ProductDraft {
    fn from(args: AddArgs) -> Self {
        ProductDraft {
            name: args.name,
            barcode: args.barcode,
            quantity: args.quantity.map(Into::into),
            min_stock: args.min_stock.map(Into::into),
            expiry_date: args.expiry,
            supplier: args.supplier,
            price: args.price.map(Into::into),
        }
    }
}

#[derive(Debug, Args)]
struct UpdateArgs {
    id: ProductId,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    barcode: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    quantity: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    min_stock: Option<String>,
    #[arg(long)]
    expiry: Option<String>,
    #[arg(long)]
    supplier: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    price: Option<String>,
}

impl UpdateArgs {
    fn into_patch(self) -> (ProductId, ProductPatch) {
        let patch = ProductPatch {
            name: self.name,
            barcode: self.barcode,
            quantity: self.quantity.map(Into::into),
            min_stock: self.min_stock.map(Into::into),
            expiry_date: self.expiry,
            supplier: self.supplier,
            price: self.price.map(Into::into),
        };
        (self.id, patch)
    }
}

#[derive(Debug, Args)]
struct BarcodeCommand {
    #[command(subcommand)]
    command: BarcodeSubcommand,
}

#[derive(Debug, Subcommand)]
enum BarcodeSubcommand {
    /// Detect the symbology and check the EAN-13 check digit
    Validate { code: String },
    /// Compute the EAN-13 check digit for the first 12 digits
    CheckDigit { code: String },
    /// Country of origin from the GS1 prefix
    Country { code: String },
    /// Generate random barcodes
    Generate {
        #[arg(long, default_value = "ean13")]
        format: BarcodeFormat,
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
}

fn main() {
    stocktrack_observability::init();

    let cli = Cli::parse();

    if let Err(error) = run(cli) {
        eprintln!("error: {error:#}");
        process::exit(1);
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn store_config(global: &GlobalArgs) -> anyhow::Result<StoreConfig> {
    let mut config = StoreConfig::from_env()
        .with_context(|| format!("reading {DATA_DIR_ENV} / {STORAGE_KEY_ENV}"))?;
    if let Some(dir) = &global.data_dir {
        config = config.with_data_dir(dir);
    }
    if let Some(key) = &global.storage_key {
        config = config.with_storage_key(key.as_str())?;
    }
    Ok(config)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let json = cli.global.json;
    match cli.command {
        Commands::Barcode(BarcodeCommand { command }) => barcode(command, json),
        Commands::Inventory(command) => {
            let store = store_config(&cli.global)?.open_store();
            inventory(&store, command, json)
        }
    }
}

fn inventory(
    store: &InventoryStore<FileStorage>,
    command: InventoryCommand,
    json: bool,
) -> anyhow::Result<()> {
    match command {
        InventoryCommand::List(args) => list(store, args, json),
        InventoryCommand::Show { id } => {
            let product = store
                .get_product(id)?
                .with_context(|| format!("product {id} not found"))?;
            if json {
                print_json(&product)
            } else {
                println!("{}", render::product_details(&product));
                Ok(())
            }
        }
        InventoryCommand::Add(args) => {
            let id = store.add_product(args.into())?;
            if json {
                print_json(&json!({ "id": id }))
            } else {
                println!("Added product {id}");
                Ok(())
            }
        }
        InventoryCommand::Update(args) => {
            let (id, patch) = args.into_patch();
            if patch.is_empty() {
                bail!("nothing to update: pass at least one field flag");
            }
            if !store.update_product(id, patch)? {
                bail!("product {id} not found");
            }
            println!("Updated product {id}");
            Ok(())
        }
        InventoryCommand::SetStock { id, quantity } => {
            if !store.update_product_stock(id, quantity)? {
                bail!("product {id} not found");
            }
            println!("Stock of product {id} set to {}", quantity.max(0));
            Ok(())
        }
        InventoryCommand::Delete { id } => {
            store.delete_product_by_id(id)?;
            println!("Deleted product {id}");
            Ok(())
        }
        InventoryCommand::Find { barcode } => {
            let found = store.find_product_by_barcode(&barcode)?;
            match (json, found) {
                (true, found) => print_json(&found),
                (false, Some(product)) => {
                    println!("{}", render::product_details(&product));
                    Ok(())
                }
                (false, None) => {
                    println!("No product with barcode {barcode}");
                    Ok(())
                }
            }
        }
        InventoryCommand::Search { term } => {
            let products = store.search_products(&term)?;
            if json {
                print_json(&products)
            } else {
                println!("{}", render::products_table(&products));
                Ok(())
            }
        }
        InventoryCommand::Alerts => {
            let alerts = store.get_alerts(today())?;
            if json {
                print_json(&alerts)
            } else {
                println!("{}", render::alerts_table(&alerts));
                Ok(())
            }
        }
        InventoryCommand::Stats => {
            let stats = store.get_inventory_stats(today())?;
            if json {
                print_json(&stats)
            } else {
                println!("{}", render::stats_table(&stats));
                Ok(())
            }
        }
        InventoryCommand::Report => {
            let report = store.generate_report(Local::now().naive_local())?;
            if json {
                print_json(&report)
            } else {
                println!("{}", render::report_text(&report));
                Ok(())
            }
        }
        InventoryCommand::Scan { codes } => scan(store, codes, json),
        InventoryCommand::Export { output } => export(store, output),
        InventoryCommand::Import { path } => {
            let file = File::open(&path).with_context(|| format!("opening {}", path.display()))?;
            let drafts = parse_csv(file).with_context(|| format!("reading {}", path.display()))?;
            let imported = store.import_products(drafts)?;
            println!("Imported {imported} products");
            Ok(())
        }
        InventoryCommand::Clear { yes } => {
            if !yes {
                bail!("refusing to clear inventory without --yes");
            }
            store.clear_all()?;
            println!("Inventory cleared; demo products restored");
            Ok(())
        }
    }
}

fn list(store: &InventoryStore<FileStorage>, args: ListArgs, json: bool) -> anyhow::Result<()> {
    let mut products = store.get_products()?;
    if let Some(key) = args.sort {
        let order = if args.desc {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        };
        sort_products(&mut products, key, order);
    }

    if json {
        print_json(&products)
    } else {
        println!("{}", render::products_table(&products));
        Ok(())
    }
}

fn scan(store: &InventoryStore<FileStorage>, codes: Vec<String>, json: bool) -> anyhow::Result<()> {
    let mut session = ScanSession::default();
    let mut handle = |code: &str| -> anyhow::Result<()> {
        let Some(resolution) = session.observe(store, code, Instant::now())? else {
            tracing::debug!(code, "repeat scan suppressed");
            return Ok(());
        };
        if json {
            print_json(&scan_json(&resolution))
        } else {
            println!("{}", render::scan_text(&resolution));
            Ok(())
        }
    };

    if codes.is_empty() {
        for line in io::stdin().lock().lines() {
            handle(&line?)?;
        }
    } else {
        for code in &codes {
            handle(code)?;
        }
    }
    Ok(())
}

fn scan_json(resolution: &ScanResolution) -> serde_json::Value {
    match resolution {
        ScanResolution::Ignored => json!({ "status": "ignored" }),
        ScanResolution::Known(product) => json!({ "status": "known", "product": product }),
        ScanResolution::Unknown {
            code,
            format,
            valid_checksum,
            country,
        } => json!({
            "status": "unknown",
            "code": code,
            "format": format.name(),
            "validChecksum": valid_checksum,
            "country": country,
        }),
    }
}

fn export(store: &InventoryStore<FileStorage>, output: Option<PathBuf>) -> anyhow::Result<()> {
    let products = store.get_products()?;
    let path = output.unwrap_or_else(|| PathBuf::from(export_file_name(today())));

    if path.as_os_str() == "-" {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        export_csv(&products, &mut lock)?;
        lock.flush()?;
        return Ok(());
    }

    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    export_csv(&products, file)?;
    tracing::info!(path = %path.display(), count = products.len(), "exported csv");
    println!("Exported {} products to {}", products.len(), path.display());
    Ok(())
}

fn barcode(command: BarcodeSubcommand, json: bool) -> anyhow::Result<()> {
    match command {
        BarcodeSubcommand::Validate { code } => {
            let check = validate_barcode_format(&code);
            let checksum = (check.format == BarcodeFormat::Ean13).then(|| is_valid_ean13(&code));
            let country = country_from_barcode(&code);
            if json {
                return print_json(&json!({
                    "code": code,
                    "valid": check.valid,
                    "format": check.format.name(),
                    "plausible": is_plausible_barcode(&code),
                    "validChecksum": checksum,
                    "country": country,
                }));
            }
            println!("format:    {}", check.format);
            println!("plausible: {}", is_plausible_barcode(&code));
            if let Some(ok) = checksum {
                println!("checksum:  {}", if ok { "valid" } else { "invalid" });
            }
            println!("country:   {country}");
            Ok(())
        }
        BarcodeSubcommand::CheckDigit { code } => {
            let digit = calculate_ean13_check_digit(&code)
                .with_context(|| format!("{code:?} does not start with 12 digits"))?;
            if json {
                print_json(&json!({ "code": code, "checkDigit": digit }))
            } else {
                println!("{digit}");
                Ok(())
            }
        }
        BarcodeSubcommand::Country { code } => {
            let country = country_from_barcode(&code);
            if json {
                print_json(&json!({ "code": code, "country": country }))
            } else {
                println!("{country}");
                Ok(())
            }
        }
        BarcodeSubcommand::Generate { format, count } => {
            let codes: Vec<String> = (0..count).map(|_| generate_random_barcode(format)).collect();
            if json {
                print_json(&codes)
            } else {
                for code in codes {
                    println!("{code}");
                }
                Ok(())
            }
        }
    }
}
