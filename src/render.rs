use std::fmt::{self, Display, Write};

use chrono::{DateTime, TimeZone};
use clap::ValueEnum;
use serde::Serialize;

use crate::classify::{alert_glyph, badge_variant, review_destination, BadgeVariant};
use crate::error::MedPulseError;
use crate::model::{Alert, Medicine};
use crate::page::{AlertsPage, Summary};

const TIMESTAMP_FORMAT: &str = "%b %d, %Y %H:%M";

/// Text stand-in for the badge colour
fn badge_marker(variant: BadgeVariant) -> &'static str {
    match variant {
        BadgeVariant::Success => "+",
        BadgeVariant::Warning => "!",
        BadgeVariant::Danger => "!!",
        BadgeVariant::Info => "i",
        BadgeVariant::Default => "-",
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum PageFormat {
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct AlertView<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    alert_type: &'a str,
    glyph: &'static str,
    title: &'a str,
    message: &'a str,
    severity: &'a str,
    badge: BadgeVariant,
    created_at: String,
    is_read: bool,
    destination: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct PageSnapshot<'a> {
    summary: Summary,
    alerts: Vec<AlertView<'a>>,
    low_stock: &'a [Medicine],
    expiring: &'a [Medicine],
}

pub fn render<Tz>(page: &AlertsPage, format: PageFormat, tz: &Tz) -> Result<String, MedPulseError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match format {
        PageFormat::Text => Ok(render_text(page, tz)),
        PageFormat::Json => render_json(page, tz),
    }
}

fn format_timestamp<Tz>(created_at: &DateTime<chrono::Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    created_at.with_timezone(tz).format(TIMESTAMP_FORMAT).to_string()
}

pub fn render_text<Tz>(page: &AlertsPage, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_text(&mut out, page, tz);
    out
}

fn write_text<Tz>(out: &mut String, page: &AlertsPage, tz: &Tz) -> fmt::Result
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if page.is_loading() {
        return writeln!(out, "Loading alerts...");
    }

    let summary = page.summary();

    writeln!(out, "Alerts & Notifications")?;
    writeln!(out, "Monitor critical inventory alerts and system notifications")?;
    writeln!(out)?;
    writeln!(
        out,
        "Low Stock Alerts: {}  |  Expiring Soon: {}  |  Total Alerts: {}",
        summary.low_stock, summary.expiring, summary.active_alerts
    )?;
    writeln!(out)?;

    writeln!(out, "System Alerts ({})", summary.active_alerts)?;
    if summary.active_alerts == 0 {
        writeln!(out, "  ✅ No active alerts at the moment")?;
    }
    for alert in page.active_alerts() {
        write_alert(out, alert, tz)?;
    }
    writeln!(out)?;

    writeln!(out, "Low Stock Medicines ({})", summary.low_stock)?;
    if page.low_stock().is_empty() {
        writeln!(out, "  📦 No low stock alerts at the moment")?;
    }
    for medicine in page.low_stock() {
        writeln!(out, "  {} [Min: {}]", medicine.name, medicine.min_quantity)?;
        writeln!(
            out,
            "    {} • Current Stock: {} · {}",
            medicine.category, medicine.quantity, medicine.id
        )?;
    }

    Ok(())
}

fn write_alert<Tz>(out: &mut String, alert: &Alert, tz: &Tz) -> fmt::Result
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    // Unread alerts are highlighted
    let marker = if alert.is_read { ' ' } else { '●' };
    writeln!(
        out,
        "{} {} {} [{} {}]",
        marker,
        alert_glyph(&alert.alert_type),
        alert.title,
        badge_marker(badge_variant(&alert.severity)),
        alert.severity
    )?;
    writeln!(out, "    {}", alert.message)?;
    writeln!(
        out,
        "    {} · {}",
        format_timestamp(&alert.created_at, tz),
        alert.id
    )
}

fn render_json<Tz>(page: &AlertsPage, tz: &Tz) -> Result<String, MedPulseError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let alerts = page
        .active_alerts()
        .map(|alert| AlertView {
            id: &alert.id,
            alert_type: alert.alert_type.as_str(),
            glyph: alert_glyph(&alert.alert_type),
            title: &alert.title,
            message: &alert.message,
            severity: alert.severity.as_str(),
            badge: badge_variant(&alert.severity),
            created_at: format_timestamp(&alert.created_at, tz),
            is_read: alert.is_read,
            destination: review_destination(&alert.alert_type).map(|r| r.path()),
        })
        .collect();

    let snapshot = PageSnapshot {
        summary: page.summary(),
        alerts,
        low_stock: page.low_stock(),
        expiring: page.expiring(),
    };

    Ok(serde_json::to_string_pretty(&snapshot)?)
}
