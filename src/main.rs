//! Kabom command line: render storefront screens to stdout

use anyhow::{Context, bail};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use kabom::api::{ApiClient, CatalogSource};
use kabom::config::StorefrontConfig;
use kabom::core::events::Region;
use kabom::core::filter::{CustomerFilters, ProductFilters};
use kabom::core::money::format_brl;
use kabom::core::navigation::{Role, SubPage};
use kabom::entities::ProductKind;
use kabom::shell::{Storefront, spawn_event_log};
use kabom::storage::SeedCatalog;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "kabom",
    version,
    about = "Kabom Eletrônicos storefront, rendered to HTML"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Where the catalog comes from
    #[arg(long, value_enum, default_value = "seed", global = true)]
    source: SourceKind,

    /// YAML configuration file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// More logging (-v debug, -vv trace); RUST_LOG wins when set
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum SourceKind {
    /// Built-in demo catalog
    Seed,
    /// The catalog HTTP API
    Api,
}

#[derive(Subcommand)]
enum Command {
    /// Render a screen
    Render(RenderArgs),

    /// List the discount offers a customer may pick
    Offers {
        /// Customer id
        #[arg(long)]
        user: i64,
    },

    /// Products recommended alongside a product
    Recommend {
        /// Product id
        #[arg(long)]
        product: i64,
    },
}

#[derive(Args)]
struct RenderArgs {
    /// cliente, loja or home
    #[arg(long, default_value = "cliente")]
    role: Role,

    /// Sub-page slug (loja, descontos, carrinho, produtos, estoque, clientes, estatisticas, admin)
    #[arg(long)]
    page: Option<String>,

    /// Page of the list to show
    #[arg(long, default_value_t = 1)]
    page_number: usize,

    /// Products to put in the cart first
    #[arg(long = "add", value_name = "ID")]
    cart: Vec<i64>,

    /// Print only the list region
    #[arg(long)]
    list_only: bool,

    #[arg(long)]
    name: Option<String>,

    /// Product kind (Hardware, Dispositivo, Periférico)
    #[arg(long)]
    kind: Option<String>,

    #[arg(long)]
    price_min: Option<String>,

    #[arg(long)]
    price_max: Option<String>,

    #[arg(long)]
    min_discount: Option<String>,

    #[arg(long)]
    location: Option<String>,

    #[arg(long)]
    spent_min: Option<String>,

    #[arg(long)]
    spent_max: Option<String>,

    #[arg(long)]
    min_points: Option<String>,
}

impl RenderArgs {
    fn product_filters(&self) -> ProductFilters {
        ProductFilters {
            name: self.name.clone().unwrap_or_default(),
            kind: self.kind.as_deref().map(ProductKind::from_label),
            price_min: self.price_min.clone().unwrap_or_default(),
            price_max: self.price_max.clone().unwrap_or_default(),
            min_discount: self.min_discount.clone().unwrap_or_default(),
        }
    }

    fn customer_filters(&self) -> CustomerFilters {
        CustomerFilters {
            name: self.name.clone().unwrap_or_default(),
            location: self.location.clone().unwrap_or_default(),
            spent_min: self.spent_min.clone().unwrap_or_default(),
            spent_max: self.spent_max.clone().unwrap_or_default(),
            min_points: self.min_points.clone().unwrap_or_default(),
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "kabom=info",
        1 => "kabom=debug",
        _ => "kabom=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<StorefrontConfig> {
    let config = match path {
        Some(path) => StorefrontConfig::from_yaml_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => StorefrontConfig::default(),
    };
    Ok(config.with_env_overrides())
}

fn open_source(kind: SourceKind, config: &StorefrontConfig) -> anyhow::Result<Arc<dyn CatalogSource>> {
    Ok(match kind {
        SourceKind::Seed => Arc::new(SeedCatalog::new()),
        SourceKind::Api => Arc::new(ApiClient::from_config(config)?),
    })
}

fn render(app: &mut Storefront, args: &RenderArgs) -> anyhow::Result<()> {
    app.enter(args.role)?;
    if let Some(slug) = &args.page {
        let Some(page) = SubPage::parse_for(args.role, slug) else {
            bail!("unknown page '{}'", slug);
        };
        app.navigate(page)?;
    }
    for id in &args.cart {
        app.store().add_to_cart(*id)?;
    }

    let on_customers = app.store().read(|s| s.current_page() == Some(SubPage::Customers));
    if on_customers {
        app.apply_customer_filters(args.customer_filters())?;
    } else {
        app.apply_product_filters(args.product_filters())?;
    }
    app.sync()?;
    app.go_to_page(args.page_number)?;

    if app.access_denied() {
        tracing::warn!(role = %args.role, page = ?args.page, "page not available for this role");
    }

    if args.list_only {
        println!("{}", app.surface().get(Region::List).unwrap_or_default());
    } else {
        println!("{}", app.document()?);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_ref())?;
    let source = open_source(cli.source, &config)?;
    let mut app = Storefront::new(source, config)?;
    if cli.verbose > 0 {
        let _event_log = spawn_event_log(app.store());
    }

    let report = app.load().await?;
    for (section, message) in &report.failures {
        eprintln!("warning: could not load {}: {}", section, message);
    }
    app.render()?;

    match &cli.command {
        Command::Render(args) => render(&mut app, args)?,
        Command::Offers { user } => {
            let customer = app
                .store()
                .read(|s| s.catalog.customer(*user).cloned())
                .with_context(|| format!("customer {} not found", user))?;
            app.enter(Role::Customer)?;
            app.store().set_user(Some(customer));
            let offers = app.offers();
            if offers.is_empty() {
                println!("Nenhum desconto disponível para o seu perfil no momento.");
            }
            for offer in offers {
                println!("{} {} ({}): {}", offer.icon, offer.title, offer.badge, offer.description);
            }
        }
        Command::Recommend { product } => {
            for p in app.recommendations(*product).await? {
                println!("#{} {} [{}] {}", p.id, p.name, p.kind, format_brl(p.price));
            }
        }
    }
    Ok(())
}
