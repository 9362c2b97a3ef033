use anyhow::Result;
use clap::{Parser, Subcommand};

use finance_tracker::cli::{
    handle_audit_command, handle_category_command, handle_chart_command, handle_dashboard_command,
    handle_export_command, handle_goal_command, handle_report_command, handle_transaction_command,
    CategoryCommands, ChartCommands, ExportCommands, GoalCommands, ReportCommands,
    TransactionCommands,
};
use finance_tracker::config::{paths::FinancePaths, settings::Settings};
use finance_tracker::models::Category;
use finance_tracker::storage::Storage;

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Track income, expenses and savings goals from the terminal",
    long_about = "fintrack records income and expense transactions by category, \
                  tracks savings goals, and summarizes your finances with \
                  dashboards, monthly trends and printable reports."
)]
struct Cli {
    /// Disable colors in charts
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Savings goal commands
    #[command(subcommand)]
    Goal(GoalCommands),

    /// Totals, charts and recent transactions
    Dashboard,

    /// Monthly charts
    #[command(subcommand)]
    Chart(ChartCommands),

    /// Financial reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Data export and restore
    #[command(subcommand)]
    Export(ExportCommands),

    /// Show recent changes from the audit log
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },

    /// Create the data directory and default categories
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    finance_tracker::init_tracing();

    let cli = Cli::parse();

    let paths = FinancePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    let today = chrono::Local::now().date_naive();

    match cli.command {
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&storage, &settings, today, cmd)?;
        }
        Some(Commands::Category(cmd)) => {
            handle_category_command(&storage, cmd)?;
        }
        Some(Commands::Goal(cmd)) => {
            handle_goal_command(&storage, &settings, today, cmd)?;
        }
        Some(Commands::Dashboard) => {
            handle_dashboard_command(&storage, &settings, cli.plain)?;
        }
        Some(Commands::Chart(cmd)) => {
            handle_chart_command(&storage, &settings, today, cli.plain, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, &settings, today, cmd)?;
        }
        Some(Commands::Export(cmd)) => {
            handle_export_command(&storage, cmd)?;
        }
        Some(Commands::Audit { count }) => {
            handle_audit_command(&storage, count)?;
        }
        Some(Commands::Init) => {
            println!("Initializing finance tracker at: {}", paths.data_dir().display());
            finance_tracker::storage::init::initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Default categories:");
            for category in Category::defaults() {
                println!("  - {} ({})", category.name, category.kind.label());
            }
            println!();
            println!("Run 'fintrack transaction add' to record your first transaction.");
        }
        Some(Commands::Config) => {
            println!("Finance Tracker Configuration");
            println!("=============================");
            println!("Base directory:    {}", paths.base_dir().display());
            println!("Data directory:    {}", paths.data_dir().display());
            println!("Reports directory: {}", paths.reports_dir().display());
            println!("Settings file:     {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:     {}", settings.currency_symbol);
            println!("  Date format:         {}", settings.date_format);
            println!("  Top categories:      {}", settings.top_categories);
            println!("  Trend months:        {}", settings.trend_months);
            println!("  Monthly chart months: {}", settings.monthly_months);
            println!("  Recent transactions: {}", settings.recent_transactions);
            println!("  Report page lines:   {}", settings.page_lines);
        }
        None => {
            println!("fintrack - personal finance tracker");
            println!();
            println!("Run 'fintrack --help' for usage information.");
            if !storage.is_initialized() {
                println!("Run 'fintrack init' to get started.");
            }
        }
    }

    Ok(())
}
