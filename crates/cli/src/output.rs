//! Terminal rendering.

use anyhow::Result;
use cwcrm_core::{Entity, EntityKind, FieldValue, Stored};
use cwcrm_views::{Alert, Severity};
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Text,
    Json,
}

pub fn print_kinds(format: Format) -> Result<()> {
    match format {
        Format::Json => {
            let kinds: Vec<_> = EntityKind::ALL
                .iter()
                .map(|k| {
                    json!({
                        "entity": k.slug(),
                        "resource": k.resource(),
                        "name": k.display_name(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&kinds)?);
        }
        Format::Text => {
            for kind in EntityKind::ALL {
                println!("{:<22} {}", kind.slug(), kind.display_name());
            }
        }
    }
    Ok(())
}

pub fn print_list<E: Entity + Default>(
    records: &[Stored<E>],
    total_count: Option<u64>,
    format: Format,
) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(records)?),
        Format::Text => {
            print!("{}", render_table(records));
            let total = total_count.unwrap_or(records.len() as u64);
            println!("{} of {total} {}", records.len(), E::KIND.display_name());
        }
    }
    Ok(())
}

pub fn print_record<E: Entity>(
    record: &Stored<E>,
    fields: Vec<FieldValue>,
    format: Format,
) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(record)?),
        Format::Text => {
            let width = fields.iter().map(|f| f.label.len()).max().unwrap_or(0);
            for field in fields {
                println!("{:<width$}  {}", field.label, field.value);
            }
        }
    }
    Ok(())
}

/// Print non-error alerts to stderr. Errors are reported by the exit path.
pub fn print_alerts(alerts: &[Alert], format: Format) -> Result<()> {
    for line in render_alerts(alerts, format)? {
        eprintln!("{line}");
    }
    Ok(())
}

/// One line per non-error alert: the message, or the alert as JSON.
fn render_alerts(alerts: &[Alert], format: Format) -> Result<Vec<String>> {
    alerts
        .iter()
        .filter(|a| a.severity != Severity::Error)
        .map(|alert| -> Result<String> {
            match format {
                Format::Json => Ok(serde_json::to_string(alert)?),
                Format::Text => Ok(alert.message.clone()),
            }
        })
        .collect()
}

/// Fixed-width table: `ID` followed by each entity field.
fn render_table<E: Entity + Default>(records: &[Stored<E>]) -> String {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            std::iter::once(r.id.to_string())
                .chain(r.fields.fields().into_iter().map(|f| f.value))
                .collect()
        })
        .collect();

    let header: Vec<String> = std::iter::once("ID".to_string())
        .chain(E::default().fields().into_iter().map(|f| f.label.to_string()))
        .collect();

    let mut widths: Vec<usize> = header.iter().map(String::len).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in std::iter::once(&header).chain(rows.iter()) {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
    out
}
