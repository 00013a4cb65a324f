use std::process::ExitCode;

use clap::Parser;
use offers_client::{Product, ProductService, DEFAULT_LIMIT};
use offers_core::client::DEFAULT_BASE_URL;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "offers")]
#[command(about = "Show the current price-comparison offers for the Xbox Series X")]
struct Cli {
    /// Scheme and host of the widget API
    #[arg(long, env = "OFFERS_API_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Maximum number of offers to show
    #[arg(short, long, env = "OFFERS_LIMIT", default_value_t = DEFAULT_LIMIT)]
    limit: usize,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    let service = ProductService::new(&cli.base_url);

    let products = match service.fetch_products(cli.limit).await {
        Ok(products) => products,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&products) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{}", render_text(&products));
    }
    ExitCode::SUCCESS
}

fn render_text(products: &[Product]) -> String {
    let mut out = String::new();
    for product in products {
        let stock = if product.in_stock { "in stock" } else { "out of stock" };
        out.push_str(&format!(
            "{}\n  {} at {} ({stock})\n  {}\n",
            product.name,
            product.display_price(),
            product.merchant.name,
            product.link
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use offers_client::Merchant;

    #[test]
    fn render_text_lists_each_product() {
        let products = vec![Product {
            id: 1,
            name: "Xbox Series X".to_string(),
            price: "499".to_string(),
            currency_iso: "GBP".to_string(),
            currency_symbol: "&pound;".to_string(),
            link: "https://example.com/1".to_string(),
            image: None,
            merchant: Merchant {
                name: "Currys".to_string(),
                logo_url: String::new(),
            },
            in_stock: false,
        }];
        assert_eq!(
            render_text(&products),
            "Xbox Series X\n  £499.00 at Currys (out of stock)\n  https://example.com/1\n"
        );
    }

    #[test]
    fn cli_defaults() {
        let cli = Cli::try_parse_from(["offers"]).unwrap();
        assert_eq!(cli.limit, 4);
        assert!(!cli.json);
    }
}
