use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;

use product_catalog::catalog::{Product, ProductId};
use product_catalog::client::CatalogClient;

#[derive(Parser)]
#[command(name = "catalog-cli")]
#[command(about = "Command-line client for the product catalog service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check service status
    Health,
    /// List all products
    List,
    /// Show one product with its links
    Get { id: u64 },
    /// Add a product
    Create(ProductArgs),
    /// Replace a product's fields
    Update {
        id: u64,
        #[command(flatten)]
        fields: ProductArgs,
    },
    /// Remove a product
    Delete { id: u64 },
}

#[derive(Args)]
struct ProductArgs {
    #[arg(long)]
    code: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    quantity: i32,
    #[arg(long)]
    price: Decimal,
}

impl ProductArgs {
    fn into_product(self) -> Product {
        Product::new(self.code, self.name, self.quantity, self.price)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = CatalogClient::new(&cli.url);

    match cli.command {
        Commands::Health => print_json(&client.health().await?)?,
        Commands::List => print_json(&client.list().await?)?,
        Commands::Get { id } => match client.get(ProductId(id)).await? {
            Some(resource) => print_json(&resource)?,
            None => eprintln!("Product {} not found", id),
        },
        Commands::Create(fields) => {
            let created = client.create(&fields.into_product()).await?;
            if let Some(location) = &created.location {
                eprintln!("Location: {}", location);
            }
            print_json(&created.product)?;
        }
        Commands::Update { id, fields } => {
            let mut product = fields.into_product();
            product.id = ProductId(id);
            if client.update(product.id, &product).await? {
                eprintln!("Product {} updated", id);
            } else {
                eprintln!("Product {} not found", id);
            }
        }
        Commands::Delete { id } => {
            if client.delete(ProductId(id)).await? {
                eprintln!("Product {} deleted", id);
            } else {
                eprintln!("Product {} not found", id);
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
