//! Terminal rendering for birthdir types.
//!
//! Extension traits adding colored output to birthdir-core types using owo_colors.

use birthdir_core::holiday::Holiday;
use birthdir_core::rank::{RankedReminder, Summary, UrgencyTier};
use birthdir_core::view::DashboardView;
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self) -> String;
}

/// Colorize text according to the urgency tier
fn colorize_tier(tier: UrgencyTier, text: &str) -> String {
    match tier {
        UrgencyTier::Today => text.red().bold().to_string(),
        UrgencyTier::ThisWeek => text.yellow().to_string(),
        UrgencyTier::ThisMonth => text.blue().to_string(),
        UrgencyTier::Later => text.green().to_string(),
    }
}

impl Render for RankedReminder {
    fn render(&self) -> String {
        let badge = colorize_tier(self.urgency, &format!("{:>10}", self.countdown()));
        let when = self.next_occurrence.format("%a %b %-d").to_string();

        let age = match self.turning_age() {
            Some(age) => format!(" · turns {age}"),
            None => String::new(),
        };

        format!(
            "{} {} {}{} {}",
            badge,
            self.reminder.name.bold(),
            when.dimmed(),
            age.dimmed(),
            format!("[{}]", self.reminder.id.short()).dimmed()
        )
    }
}

impl Render for Holiday {
    fn render(&self) -> String {
        format!(
            "{} {}",
            self.iso_date.format("%a %b %-d").to_string().cyan(),
            self.name
        )
    }
}

impl Render for Summary {
    fn render(&self) -> String {
        format!(
            "{} today · {} this week · {} this month · {} total",
            self.today.to_string().red(),
            self.this_week.to_string().yellow(),
            self.this_month.to_string().blue(),
            self.total
        )
    }
}

/// Detail lines shown under a reminder in verbose mode
fn render_details(ranked: &RankedReminder) -> Vec<String> {
    let reminder = &ranked.reminder;
    let mut lines = Vec::new();

    if let Some(note) = &reminder.note {
        lines.push(format!("note: {note}"));
    }
    if let Some(contact) = &reminder.contact {
        lines.push(format!("contact: {contact}"));
    }
    if let Some(avatar) = &reminder.avatar_ref {
        lines.push(format!("avatar: {avatar}"));
    }

    lines
}

pub fn render_reminders(ranked: &[RankedReminder], verbose: bool) -> Vec<String> {
    let mut lines = Vec::new();

    for r in ranked {
        lines.push(format!("  {}", r.render()));
        if verbose {
            lines.extend(
                render_details(r)
                    .into_iter()
                    .map(|l| format!("{:>14}{}", "", l.dimmed())),
            );
        }
    }

    lines
}

pub fn render_view(view: &DashboardView, verbose: bool) -> String {
    let mut lines = Vec::new();

    lines.push("🎂 Birthdays".bold().to_string());
    if view.ranked_reminders.is_empty() {
        lines.push(
            "  No birthdays yet. Add one with: birthdir add --name <name> --date <YYYY-MM-DD>"
                .dimmed()
                .to_string(),
        );
    } else {
        lines.push(format!("  {}", view.summary.render()));
        lines.push(String::new());
        lines.extend(render_reminders(&view.ranked_reminders, verbose));
    }

    lines.push(String::new());
    lines.push("🎉 Upcoming holidays".bold().to_string());
    if view.upcoming_holidays.is_empty() {
        lines.push("  No more holidays this year".dimmed().to_string());
    } else {
        for holiday in &view.upcoming_holidays {
            lines.push(format!("  {}", holiday.render()));
        }
    }

    lines.join("\n")
}
