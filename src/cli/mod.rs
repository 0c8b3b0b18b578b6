use std::{
    io::{self, Write},
    time::Duration,
};

use clap::{Args, Parser, Subcommand, ValueEnum};
use storefront::{
    cart::{CartStore, FileStorage, NotificationLog},
    catalog::{ALL_CATEGORIES, Catalog, CatalogError},
    checkout::{
        CardStatus, CheckoutError, CheckoutFlow, Route, ShippingDetails, SimulatedPaymentWidget,
        SubmitOutcome,
    },
    display,
    facade::{CartError, CartFacade},
    products::Product,
};
use thiserror::Error;

pub(crate) mod config;
pub(crate) mod logging;

use config::StorefrontConfig;

#[derive(Debug, Parser)]
#[command(
    name = "storefront",
    about = "Storefront catalog, cart and checkout",
    long_about = None
)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) config: StorefrontConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List products, optionally in one category
    Products {
        /// Category id
        #[arg(short, long, default_value = ALL_CATEGORIES)]
        category: String,
    },

    /// Show one product
    Product {
        /// Product id
        id: String,
    },

    /// List featured products
    Featured,

    /// List categories
    Categories,

    /// Find products by name
    Search {
        /// Text to look for in product names
        term: String,
    },

    /// Inspect or change the cart
    Cart(CartCommand),

    /// Pay for the cart
    Checkout(CheckoutArgs),
}

#[derive(Debug, Args)]
struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show cart contents and totals
    Show,

    /// Add a product
    Add {
        /// Product id
        id: String,

        /// Units to add
        #[arg(short, long)]
        quantity: Option<u32>,
    },

    /// Remove a product
    Remove {
        /// Product id
        id: String,
    },

    /// Set a product's quantity; zero or less removes it
    Set {
        /// Product id
        id: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Remove everything
    Clear,
}

#[derive(Debug, Args)]
struct CheckoutArgs {
    /// Full name
    #[arg(long)]
    name: String,

    /// Contact email
    #[arg(long)]
    email: String,

    /// Shipping address
    #[arg(long)]
    address: String,

    /// Card form state the simulated payment widget reports
    #[arg(long, value_enum, default_value_t = CardArg::Complete)]
    card: CardArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CardArg {
    Complete,
    Incomplete,
    Missing,
}

impl From<CardArg> for CardStatus {
    fn from(card: CardArg) -> Self {
        match card {
            CardArg::Complete => CardStatus::Complete,
            CardArg::Incomplete => CardStatus::Incomplete,
            CardArg::Missing => CardStatus::Missing,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),

    #[error("Product not found: {0}")]
    UnknownProduct(String),

    #[error("{0}")]
    PaymentRejected(String),
}

type Cart = CartFacade<FileStorage, NotificationLog>;

impl Cli {
    pub(crate) async fn run(self) -> Result<(), CliError> {
        let catalog = match &self.config.catalog {
            Some(path) => Catalog::from_path(path)?,
            None => Catalog::bundled()?,
        };

        let notifications = NotificationLog::new();
        let cart: Cart = CartFacade::new(CartStore::load_with_notifier(
            FileStorage::new(&self.config.cart_file),
            notifications.clone(),
            catalog.currency(),
        ));

        let mut out = io::stdout().lock();

        let result = match self.command {
            Commands::Products { category } => {
                let products = catalog.by_category(&category);
                display::write_products(&mut out, products, catalog.currency())
                    .map_err(CliError::from)
            }
            Commands::Product { id } => {
                let product = find(&catalog, &id)?;
                display::write_product(&mut out, product, catalog.currency())
                    .map_err(CliError::from)
            }
            Commands::Featured => {
                display::write_products(&mut out, catalog.featured(), catalog.currency())
                    .map_err(CliError::from)
            }
            Commands::Categories => write_categories(&mut out, &catalog),
            Commands::Search { term } => {
                display::write_products(&mut out, catalog.search(&term), catalog.currency())
                    .map_err(CliError::from)
            }
            Commands::Cart(CartCommand { command }) => run_cart(&mut out, &catalog, &cart, command),
            Commands::Checkout(args) => {
                let delay = self.config.payment_delay_ms;
                run_checkout(&mut out, &cart, args, delay).await
            }
        };

        display::write_notifications(&mut out, &notifications.drain())?;

        result
    }
}

fn find<'a>(catalog: &'a Catalog, id: &str) -> Result<&'a Product, CliError> {
    catalog
        .get(id)
        .ok_or_else(|| CliError::UnknownProduct(id.to_string()))
}

fn write_categories(out: &mut impl Write, catalog: &Catalog) -> Result<(), CliError> {
    for category in catalog.categories() {
        let count = catalog.by_category(&category.id).count();
        writeln!(out, "{:<12} {} ({count})", category.id, category.name)?;
    }

    Ok(())
}

fn run_cart(
    out: &mut impl Write,
    catalog: &Catalog,
    cart: &Cart,
    command: CartSubcommand,
) -> Result<(), CliError> {
    match command {
        CartSubcommand::Show => {}
        CartSubcommand::Add { id, quantity } => {
            cart.add_to_cart(find(catalog, &id)?, quantity)?;
        }
        CartSubcommand::Remove { id } => cart.remove_from_cart(&id),
        CartSubcommand::Set { id, quantity } => cart.update_quantity(&id, quantity),
        CartSubcommand::Clear => cart.clear_cart(),
    }

    cart.with_state(|state| display::write_cart(out, state))?;

    Ok(())
}

async fn run_checkout(
    out: &mut impl Write,
    cart: &Cart,
    args: CheckoutArgs,
    payment_delay_ms: u64,
) -> Result<(), CliError> {
    let flow =
        CheckoutFlow::with_details(ShippingDetails::new(args.name, args.email, args.address));
    let widget =
        SimulatedPaymentWidget::new(args.card.into(), Duration::from_millis(payment_delay_ms));

    if !cart.is_empty() {
        writeln!(out, "Pay {}", flow.amount_due(cart))?;
    }

    match flow.submit(cart, &widget).await? {
        SubmitOutcome::Redirect(Route::Shop) => {
            writeln!(
                out,
                "Your cart is empty. Continue shopping at {}",
                Route::Shop.path()
            )?;
        }
        SubmitOutcome::Redirect(route) => {
            writeln!(out, "Payment successful, redirecting to {}", route.path())?;
        }
        SubmitOutcome::WidgetNotReady => {
            writeln!(out, "Payment provider is still loading, try again")?;
        }
        SubmitOutcome::Rejected(message) => return Err(CliError::PaymentRejected(message)),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use storefront::checkout::INVALID_CARD_MESSAGE;
    use testresult::TestResult;

    use super::*;

    fn cart_at(path: &Path, catalog: &Catalog) -> Cart {
        CartFacade::new(CartStore::load_with_notifier(
            FileStorage::new(path),
            NotificationLog::new(),
            catalog.currency(),
        ))
    }

    fn checkout_args(card: CardArg) -> CheckoutArgs {
        CheckoutArgs {
            name: "Grace Hopper".to_string(),
            email: "grace@example.com".to_string(),
            address: "1 Compiler Lane".to_string(),
            card,
        }
    }

    #[test]
    fn negative_quantity_parses_and_removes_line() -> TestResult {
        let cli = Cli::try_parse_from(["storefront", "cart", "set", "5", "-1"])?;

        let Commands::Cart(CartCommand { command }) = cli.command else {
            return Err("expected a cart command".into());
        };

        let catalog = Catalog::bundled()?;
        let dir = tempfile::tempdir()?;
        let cart = cart_at(&dir.path().join("cart.json"), &catalog);
        let mut out = Vec::new();

        run_cart(
            &mut out,
            &catalog,
            &cart,
            CartSubcommand::Add {
                id: "5".to_string(),
                quantity: Some(2),
            },
        )?;
        run_cart(&mut out, &catalog, &cart, command)?;

        assert!(cart.is_empty());
        assert!(String::from_utf8(out)?.ends_with("Your cart is empty.\n"));

        Ok(())
    }

    #[test]
    fn unknown_product_is_reported() -> TestResult {
        let catalog = Catalog::bundled()?;
        let dir = tempfile::tempdir()?;
        let cart = cart_at(&dir.path().join("cart.json"), &catalog);

        let result = run_cart(
            &mut Vec::new(),
            &catalog,
            &cart,
            CartSubcommand::Add {
                id: "42".to_string(),
                quantity: None,
            },
        );

        assert!(matches!(result, Err(CliError::UnknownProduct(id)) if id == "42"));

        Ok(())
    }

    #[tokio::test]
    async fn rejected_payment_is_an_error() -> TestResult {
        let catalog = Catalog::bundled()?;
        let dir = tempfile::tempdir()?;
        let cart = cart_at(&dir.path().join("cart.json"), &catalog);
        let mut out = Vec::new();

        cart.add_to_cart(catalog.get("3").ok_or("missing speaker")?, None)?;

        let args = checkout_args(CardArg::Incomplete);
        let result = run_checkout(&mut out, &cart, args, 0).await;

        assert!(matches!(
            &result,
            Err(CliError::PaymentRejected(message)) if message == INVALID_CARD_MESSAGE
        ));
        assert_eq!(cart.item_count(), 1);
        assert_eq!(String::from_utf8(out)?, "Pay $129.99\n");

        Ok(())
    }

    #[tokio::test]
    async fn completed_payment_redirects_to_success() -> TestResult {
        let catalog = Catalog::bundled()?;
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("cart.json");
        let cart = cart_at(&path, &catalog);
        let mut out = Vec::new();

        cart.add_to_cart(catalog.get("3").ok_or("missing speaker")?, None)?;

        let args = checkout_args(CardArg::Complete);
        run_checkout(&mut out, &cart, args, 0).await?;

        assert!(cart.is_empty());
        assert!(!path.exists());
        assert!(String::from_utf8(out)?.ends_with("redirecting to /payment-success\n"));

        Ok(())
    }
}
