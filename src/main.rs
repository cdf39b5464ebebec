use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use comfy_table::{modifiers, presets, ContentArrangement, Table};
use terminal_size::{terminal_size, Width};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use yansi::Paint;

use observatory::api::{self, FragmentFetcher, HttpFragmentFetcher, NODES_PAGE_PATH};
use observatory::config::{self, DashboardConfig, DEFAULT_HOST, DEFAULT_PORT};
use observatory::dashboard::{AlertsPanel, Dashboard, LaunchPopover};
use observatory::models::{Alert, LaunchKind, INSTANCE_CATALOG};
use observatory::page::{lock_page, Page, SharedPage, NODES_TABLE};
use observatory::server::{self, ServerState};

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }
    table
}

fn print_alerts(alerts: &[Alert]) {
    if alerts.is_empty() {
        println!("{}", Paint::new("(no alerts)").dim());
        return;
    }
    let mut table = new_table();
    table.set_header(vec!["ID", "Kind", "Title", "Message"]);
    for a in alerts {
        table.add_row(vec![
            a.id.clone(),
            a.kind.map(|k| k.to_str()).unwrap_or("-").to_string(),
            a.title.clone(),
            a.message.clone(),
        ]);
    }
    println!("\n{table}\n");
}

fn visible_alerts(page: &SharedPage) -> Vec<Alert> {
    lock_page(page).visible_alerts().into_iter().cloned().collect()
}

fn print_instance_types() {
    let mut table = new_table();
    table.set_header(vec!["Instance type", "Category", "On-demand $/h"]);
    for t in INSTANCE_CATALOG {
        table.add_row(vec![t.name.to_string(), t.category.label().to_string(), format!("{:.4}", t.hourly_cost)]);
    }
    println!("\n{table}\n");
}

fn fail(msg: &str, detail: impl std::fmt::Display) -> ! {
    eprintln!("{}: {}", Paint::new(msg).red(), detail);
    process::exit(1);
}

fn load_config(env_file: Option<&str>) -> DashboardConfig {
    config::load_env_file(env_file);
    DashboardConfig::from_env().unwrap_or_else(|e| fail("Invalid configuration", e))
}

fn build_fetcher(config: &DashboardConfig) -> Arc<dyn FragmentFetcher> {
    match HttpFragmentFetcher::from_config(config) {
        Ok(f) => Arc::new(f),
        Err(e) => fail("Failed to create HTTP client", e),
    }
}

#[derive(Parser)]
#[command(
    name = "obs",
    author,
    version,
    about = "Observatory dashboard client",
    long_about = r#"obs - operate the observatory compute-node dashboard from a terminal.

It drives the same dashboard endpoints the web page uses: alert banners are
polled and dismissed, the launch form is fetched once and launches navigate to
the add-node endpoint. `obs serve` runs a local stand-in dashboard.

Examples:
  1) Run a local dashboard:
      obs serve --port 5000
  2) Watch alerts and launch interactively:
      OBSERVATORY_BASE_URL=http://127.0.0.1:5000 obs watch
  3) Launch a spot node:
      obs launch --instance-type p3.2xlarge --zone us-east-1a --spot
"#,
    after_help = "Use `obs <subcommand> --help` to get subcommand specific options."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Disable request/response echo
    #[arg(long, global = true)]
    silent: bool,
    /// Path to .env file
    #[arg(long, global = true)]
    env_file: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the stand-in dashboard server
    Serve {
        /// Host to bind to
        #[arg(long, default_value_t = String::from(DEFAULT_HOST))]
        host: String,
        /// Port to bind to
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
    /// Show or dismiss alert banners
    Alerts {
        #[command(subcommand)]
        sub: AlertCommands,
    },
    /// Launch a node through the launch popover
    #[command(long_about = "Fetch the launch form, check the requested rows and follow the add-node navigation, exactly as clicking Launch (or Spot bid) in the popover does.")]
    Launch {
        #[arg(long)]
        instance_type: String,
        #[arg(long)]
        zone: Option<String>,
        /// Bid for a spot instance instead of on-demand
        #[arg(long, default_value_t = false)]
        spot: bool,
    },
    /// List launchable instance types
    InstanceTypes,
    /// Bootstrap the dashboard and keep it live (commands on stdin)
    Watch,
}

#[derive(Subcommand)]
enum AlertCommands {
    /// Fetch and print the current alerts
    List {
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Clear one alert and print what remains
    Dismiss { alert_id: String },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }
    if cli.silent {
        api::set_silent(true);
    }

    let env_file = cli.env_file.as_deref();
    match cli.command {
        Commands::Serve { host, port } => {
            config::load_env_file(env_file);
            let listener = match server::bind(&host, port).await {
                Ok(l) => l,
                Err(e) => fail(&format!("Failed to bind to {}:{}", host, port), e),
            };
            println!(
                "{} {}",
                Paint::new("Dashboard running on").green(),
                Paint::new(format!("http://{}:{}{}", host, port, NODES_PAGE_PATH)).cyan()
            );
            if let Err(e) = server::serve(listener, ServerState::new(config::get_zones())).await {
                fail("Server error", e);
            }
        }
        Commands::Alerts { sub } => {
            let config = load_config(env_file);
            let page = Page::new("").shared();
            let panel = AlertsPanel::new(page.clone(), build_fetcher(&config));
            let result = match &sub {
                AlertCommands::List { .. } => panel.refresh().await,
                AlertCommands::Dismiss { alert_id } => panel.dismiss(alert_id).await,
            };
            if let Err(e) = result {
                fail("Failed to populate alerts", e);
            }
            let alerts = visible_alerts(&page);
            match sub {
                AlertCommands::List { json: true } => match serde_json::to_string_pretty(&alerts) {
                    Ok(s) => println!("{}", s),
                    Err(e) => fail("Failed to encode alerts", e),
                },
                _ => print_alerts(&alerts),
            }
        }
        Commands::Launch {
            instance_type,
            zone,
            spot,
        } => {
            let config = load_config(env_file);
            let fetcher = build_fetcher(&config);
            let page = Page::new("").shared();
            let popover = LaunchPopover::new(page.clone(), fetcher.clone());
            if let Err(e) = popover.initialize().await {
                fail("Failed to populate launch panel", e);
            }
            if let Err(e) = popover.select_instance_type(&instance_type) {
                fail("Cannot select instance type", e);
            }
            if let Err(e) = popover.select_zone(zone.as_deref()) {
                fail("Cannot select zone", e);
            }
            let kind = if spot { LaunchKind::Spot } else { LaunchKind::OnDemand };
            let Some(nav) = popover.on_launch(kind) else {
                fail("Launch failed", "launch panel not configured")
            };
            println!("{} {}", Paint::new("Navigating to").green(), Paint::new(&nav.url).cyan());
            if let Err(e) = fetcher.fetch(&nav.url).await {
                fail("Navigation failed", e);
            }
            let panel = AlertsPanel::new(page.clone(), fetcher);
            if panel.refresh().await.is_ok() {
                print_alerts(&visible_alerts(&page));
            }
        }
        Commands::InstanceTypes => print_instance_types(),
        Commands::Watch => {
            let config = load_config(env_file);
            watch(config).await;
        }
    }
}

const WATCH_HELP: &str = "commands: dismiss <id> | select <type> | zone <zone|none> | open | launch | spot | cancel | refresh | quit";

async fn watch(config: DashboardConfig) {
    let fetcher = build_fetcher(&config);
    let shell = match fetcher.fetch(NODES_PAGE_PATH).await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load the dashboard page; continuing without it.");
            String::new()
        }
    };
    let dashboard = Dashboard::bootstrap(shell, fetcher.clone(), config.poll_interval).await;
    println!("{}", Paint::new(WATCH_HELP).dim());

    let page = dashboard.page();
    let mut renders = dashboard.subscribe_alerts();
    let printer = tokio::spawn(async move {
        while renders.changed().await.is_ok() {
            print_alerts(&visible_alerts(&page));
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            line = lines.next_line() => line,
        };
        let line = match line {
            Ok(Some(l)) => l,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "stdin closed");
                break;
            }
        };
        let mut words = line.split_whitespace();
        match (words.next(), words.next()) {
            (None, _) => {}
            (Some("quit" | "exit"), _) => break,
            (Some("dismiss"), Some(id)) => {
                if let Err(e) = dashboard.close_alert(id) {
                    eprintln!("{}", Paint::new(e.to_string()).red());
                }
            }
            (Some("select"), Some(t)) => {
                if let Err(e) = dashboard.launch().select_instance_type(t) {
                    eprintln!("{}", Paint::new(e.to_string()).red());
                }
            }
            (Some("zone"), Some(z)) => {
                let zone = if z == "none" { None } else { Some(z) };
                if let Err(e) = dashboard.launch().select_zone(zone) {
                    eprintln!("{}", Paint::new(e.to_string()).red());
                }
            }
            (Some("open"), _) => match dashboard.launch().open() {
                Some(_) => println!("{}", Paint::new("launch popover open").dim()),
                None => eprintln!("{}", Paint::new("launch panel not loaded").red()),
            },
            (Some(cmd @ ("launch" | "spot")), _) => {
                let kind = if cmd == "spot" { LaunchKind::Spot } else { LaunchKind::OnDemand };
                if let Some(nav) = dashboard.launch_now(kind) {
                    println!("{} {}", Paint::new("Navigating to").green(), Paint::new(&nav.url).cyan());
                    // the server answers a launch by redirecting to the dashboard page
                    if let Ok(body) = fetcher.fetch(&nav.url).await {
                        dashboard.refresh_table(NODES_TABLE, body);
                    }
                    let _ = dashboard.alerts().refresh().await;
                }
            }
            (Some("cancel"), _) => {
                if !dashboard.launch().on_cancel() {
                    println!("{}", Paint::new("popover is not open").dim());
                }
            }
            (Some("refresh"), _) => {
                let _ = dashboard.alerts().refresh().await;
            }
            _ => println!("{}", Paint::new(WATCH_HELP).dim()),
        }
    }

    dashboard.shutdown().await;
    printer.abort();
}
