use std::io::Write;
use std::sync::Arc;

use chrono::{Local, TimeZone};
use clap::{Parser, Subcommand};
use log::info;

use crate::api::{HttpInventoryApi, InventoryApi};
use crate::classify::Route;
use crate::config::Config;
use crate::error::MedPulseError;
use crate::page::{AlertsPage, ReviewOutcome};
use crate::render::{render, PageFormat};

#[derive(Parser)]
#[command(
    name = "medpulse",
    version,
    about = "medPulse: pharmacy inventory alerts and notifications"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Show alerts, low stock medicines and expiry counts (default if no command specified)
    Show {
        /// Output format
        #[arg(long, short = 'f', value_enum, default_value_t = PageFormat::Text)]
        format: PageFormat,
    },

    /// Mark an alert as read and open the page it relates to
    Review {
        /// Alert identifier
        alert_id: String,
    },

    /// Delete an alert
    Dismiss {
        /// Alert identifier
        alert_id: String,
    },

    /// Add stock to a medicine from the low stock list
    Restock {
        /// Medicine identifier
        medicine_id: String,

        /// Number of units to add
        #[arg(long, short = 'q', value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,
    },
}

/// What to print once a command has run against the page
enum Step {
    Navigate(Route),
    Render(PageFormat),
}

impl Cli {
    pub fn handle_command_line() -> Result<(), MedPulseError> {
        let args = Cli::parse();

        // Default to Show if no command specified
        let command = args.command.unwrap_or(Command::Show {
            format: PageFormat::Text,
        });

        let api: Arc<dyn InventoryApi> = Arc::new(HttpInventoryApi::from_config()?);
        let limit = Config::get_alert_limit();

        let rt = tokio::runtime::Runtime::new()
            .map_err(|e| MedPulseError::Error(format!("Failed to create runtime: {}", e)))?;

        let mut stdout = std::io::stdout().lock();
        rt.block_on(Self::execute(command, api, limit, &Local, &mut stdout))
    }

    /// Mounts the alerts page, runs one command against it and writes the result to `out`.
    pub async fn execute<Tz>(
        command: Command,
        api: Arc<dyn InventoryApi>,
        limit: usize,
        tz: &Tz,
        out: &mut impl Write,
    ) -> Result<(), MedPulseError>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        info!("Running command: {:?}", command);
        let mut page = AlertsPage::mount(api, limit).await;

        // Notices queued by the load or the action are written even when the
        // action itself fails
        let step = Self::apply(&mut page, command).await;
        Self::write_notices(&mut page, out)?;

        match step? {
            Step::Navigate(route) => writeln!(out, "→ Opening {}", route)?,
            Step::Render(format) => {
                write!(out, "{}", render(&page, format, tz)?)?;
                if format == PageFormat::Json {
                    writeln!(out)?;
                }
            }
        }

        Ok(())
    }

    async fn apply(page: &mut AlertsPage, command: Command) -> Result<Step, MedPulseError> {
        match command {
            Command::Show { format } => Ok(Step::Render(format)),
            Command::Review { alert_id } => match page.review(&alert_id).await? {
                ReviewOutcome::Navigated(route) => Ok(Step::Navigate(route)),
                ReviewOutcome::NoDestination | ReviewOutcome::Failed => {
                    Ok(Step::Render(PageFormat::Text))
                }
            },
            Command::Dismiss { alert_id } => {
                page.dismiss(&alert_id).await?;
                Ok(Step::Render(PageFormat::Text))
            }
            Command::Restock {
                medicine_id,
                quantity,
            } => {
                page.open_restock(&medicine_id)?;
                if !page.submit_restock(quantity).await? {
                    page.close_restock();
                }
                Ok(Step::Render(PageFormat::Text))
            }
        }
    }

    fn write_notices(page: &mut AlertsPage, out: &mut impl Write) -> Result<(), MedPulseError> {
        let notices = page.take_notices();
        for notice in &notices {
            writeln!(out, "{}", notice)?;
        }
        if !notices.is_empty() {
            writeln!(out)?;
        }
        Ok(())
    }
}
