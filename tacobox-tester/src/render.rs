//! Plain-text presentation of an [`OrderView`].

use colored::Colorize;
use std::io::Write;

use tacobox_core::{OrderView, SelectionMode, StepStatus, format_price};

pub fn render_view(out: &mut dyn Write, view: &OrderView) -> std::io::Result<()> {
    // Stepper
    let stepper: Vec<String> = view
        .steps
        .iter()
        .map(|step| {
            let label = format!("{} {}", step.ordinal, step.title);
            match step.status {
                StepStatus::Current => format!("[{}]", label.bright_yellow().bold()),
                StepStatus::Completed => label.yellow().to_string(),
                StepStatus::Upcoming => label.dimmed().to_string(),
            }
        })
        .collect();
    writeln!(out, "{}", stepper.join("  ›  "))?;
    writeln!(out)?;
    writeln!(out, "{} {}", view.subtitle, view.title.bold())?;

    for card in &view.items {
        let marker = match (view.mode, card.selected_quantity) {
            (_, 0) => String::from("   "),
            (SelectionMode::PresenceOnly, _) => " ✔ ".green().to_string(),
            (SelectionMode::Quantified, qty) => format!("×{qty:<2}").green().to_string(),
        };
        writeln!(
            out,
            " {marker} [{}] {:20} {}",
            card.item_id,
            card.name,
            card.price_label.bright_red()
        )?;
    }

    let back = if view.can_go_back { "‹ prev" } else { "      " };
    let next = if view.can_go_forward { "next ›" } else { "" };
    writeln!(out, "\n {back}    {next}")?;

    if !view.summary.is_empty() {
        writeln!(out, "\n{}", "Résumé de la commande".bold())?;
        for line in &view.summary.lines {
            match view.mode {
                SelectionMode::Quantified => writeln!(
                    out,
                    "  ✕ [{}] {} ×{}  {}",
                    line.item_id,
                    line.name,
                    line.quantity,
                    format_price(line.line_total_cents)
                )?,
                SelectionMode::PresenceOnly => {
                    writeln!(out, "  ✕ [{}] {}", line.item_id, line.name)?;
                }
            }
        }
        writeln!(out, "  Total: {}", view.summary.total_label.bright_green().bold())?;
    }

    if let Some(pending) = &view.pending {
        writeln!(out)?;
        writeln!(
            out,
            "{} {}  – {} +   {}",
            "▶".bright_cyan(),
            pending.name.bold(),
            pending.quantity,
            pending.line_total_label
        )?;
        writeln!(out, "  (confirm | cancel | + | -)")?;
    }
    Ok(())
}
