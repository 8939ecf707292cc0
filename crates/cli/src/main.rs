use api_shared::hash_password;
use cardioscan_core::{
    CoreConfig, DashboardCounts, EmailAddress, NewUser, NonEmptyText, PlatformStats, ReportFilters,
    ReportPage, ReportService, ScanTypeFilter, ShardableUuid, StatusFilter, TimePeriodFilter,
    UserService,
};
use chrono::Local;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "cardioscan")]
#[command(about = "CardioScan report service CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List reports, newest first, optionally filtered and paged
    List {
        /// Status filter: all/normal/abnormal/critical
        #[arg(long)]
        status: Option<String>,
        /// Scan type filter: all/xray/ct/mri/echo
        #[arg(long)]
        scan_type: Option<String>,
        /// Time period filter: all/today/week/month/year
        #[arg(long)]
        period: Option<String>,
        /// 1-based page of the filtered view (10 reports per page)
        #[arg(long)]
        page: Option<usize>,
    },
    /// Show platform statistics
    Stats,
    /// Register a user account
    CreateUser {
        /// Account email address
        email: String,
        /// Account password
        password: String,
        /// Display name
        name: String,
    },
    /// Print the printable HTML document for one report
    Export {
        /// Canonical report id (32 lowercase hex characters)
        report_id: String,
    },
}

fn resolve_config() -> Result<CoreConfig, Box<dyn std::error::Error>> {
    let data_dir = std::env::var("CARDIOSCAN_DATA_DIR").unwrap_or_else(|_| "./data".into());
    let jwt_secret =
        std::env::var("CARDIOSCAN_JWT_SECRET").unwrap_or_else(|_| "local-dev-secret".into());
    Ok(CoreConfig::new(PathBuf::from(data_dir), jwt_secret, 12)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let cfg = Arc::new(resolve_config()?);

    match cli.command {
        Some(Commands::List {
            status,
            scan_type,
            period,
            page,
        }) => {
            let service = ReportService::new(cfg);
            let reports = service.list();
            let counts = DashboardCounts::tally(&reports);

            let filters = ReportFilters {
                status: status.as_deref().map(StatusFilter::parse).unwrap_or_default(),
                scan_type: scan_type
                    .as_deref()
                    .map(ScanTypeFilter::parse)
                    .unwrap_or_default(),
                period: period
                    .as_deref()
                    .map(TimePeriodFilter::parse)
                    .unwrap_or_default(),
            };
            let page = ReportPage::build(&reports, &filters, page.unwrap_or(1), &Local::now());

            if page.reports.is_empty() {
                println!("No reports found.");
            } else {
                for report in &page.reports {
                    println!(
                        "{}  {}  {} ({}, {})  {}  {}  {}%  {}",
                        report.id,
                        report.scan_date(),
                        report.patient_name,
                        report.age,
                        report.gender.display(),
                        report.scan_type.label(),
                        report.status,
                        report.confidence,
                        report.diagnosis
                    );
                }
                println!(
                    "Page {}/{} - {} matching, {} total ({} normal, {} abnormal, {} critical)",
                    page.page,
                    page.total_pages,
                    page.total_filtered,
                    counts.total,
                    counts.normal,
                    counts.abnormal,
                    counts.critical
                );
            }
        }
        Some(Commands::Stats) => {
            let service = ReportService::new(cfg);
            let stats = PlatformStats::compute(&service.list());
            println!("Total reports:    {}", stats.total_reports);
            println!("Average accuracy: {}%", stats.average_accuracy);
            println!("Unique patients:  {}", stats.unique_patients);
            for (label, count) in &stats.platform_usage {
                println!("  {label}: {count}");
            }
        }
        Some(Commands::CreateUser {
            email,
            password,
            name,
        }) => {
            let service = UserService::new(cfg);
            let email = EmailAddress::parse(&email)?;
            let name = NonEmptyText::new(&name)?;
            let password_hash = hash_password(&password)?;
            match service.create(NewUser {
                email,
                password_hash,
                name,
            }) {
                Ok(user) => println!("Created user {} ({})", user.id, user.email),
                Err(e) => eprintln!("Error creating user: {e}"),
            }
        }
        Some(Commands::Export { report_id }) => {
            let service = ReportService::new(cfg);
            let id = ShardableUuid::parse(&report_id)?;
            match service.get(&id) {
                Ok(report) => {
                    println!("{}", cardioscan_core::export::render_printable_report(&report));
                }
                Err(e) => eprintln!("Error exporting report: {e}"),
            }
        }
        None => {
            println!("Use 'cardioscan --help' for commands");
        }
    }

    Ok(())
}
