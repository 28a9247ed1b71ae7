//! Terminal rendering for sequences, placements and arrangements

use crate::config::SequenceConfig;
use crate::session::{Arrangement, RhythmSession};
use colored::*;
use rhythmic_core::{NotePlacement, Sequence};

/// Columns used to draw one bar
pub const LANE_WIDTH: usize = 64;

/// One-line summary of a sequence record
pub fn summary(index: usize, config: &SequenceConfig, sequence: &Sequence, selected: bool) -> String {
    let marker = if selected {
        "▶".bright_magenta().bold().to_string()
    } else {
        " ".to_string()
    };
    format!(
        "{} {:>2}. {:<17} {:>2} steps  d={:.2}  ch {:<2} pitch {:<2}  {}",
        marker,
        index + 1,
        config.mode.name().cyan(),
        config.steps,
        config.density,
        config.channel + 1,
        config.pitch,
        sequence
    )
}

/// Full parameter listing for one record
pub fn details(index: usize, config: &SequenceConfig, sequence: &Sequence) -> String {
    let mut out = format!("{} {}\n", "Sequence".bold(), (index + 1).to_string().bold());
    let rows = [
        ("mode", config.mode.name().to_string()),
        ("steps", config.steps.to_string()),
        ("density", format!("{:.2}", config.density)),
        ("rotation", config.rotation.to_string()),
        ("complexity", config.complexity.name().to_string()),
        ("style", config.style.name().to_string()),
        ("seed", config.seed.to_string()),
        (
            "step",
            format!(
                "{}/{} beat",
                config.step_size_numerator, config.step_size_denominator
            ),
        ),
        ("channel", (config.channel + 1).to_string()),
        ("pitch", config.pitch.to_string()),
        ("invert", on_off(config.invert)),
        ("fading", on_off(config.generate_fading_notes)),
    ];
    for (name, value) in rows {
        out.push_str(&format!("  {:<11}{}\n", name.green(), value));
    }
    out.push_str(&format!(
        "  {:<11}{} ({} active)",
        "pattern".green(),
        sequence,
        sequence.active_count()
    ));
    out
}

/// Every record, selected one marked
pub fn listing(session: &RhythmSession) -> String {
    session
        .entries()
        .enumerate()
        .map(|(i, (config, sequence))| summary(i, config, sequence, i == session.selected_index()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn on_off(value: bool) -> String {
    let text = if value { "on" } else { "off" };
    text.to_string()
}

fn lane_cells(notes: &[NotePlacement], parts_per_bar: i64) -> Vec<char> {
    let mut cells = vec!['.'; LANE_WIDTH];
    if parts_per_bar <= 0 {
        return cells;
    }
    let column = |part: i64| (part * LANE_WIDTH as i64 / parts_per_bar) as usize;
    for note in notes {
        let first = column(note.start).min(LANE_WIDTH - 1);
        let last = column(note.end).clamp(first + 1, LANE_WIDTH);
        let head = match (note.accent, note.opacity() < 1.0) {
            (true, _) => 'X',
            (false, true) => 'o',
            (false, false) => 'x',
        };
        cells[first] = if note.continues_last_pattern { '-' } else { head };
        for cell in &mut cells[first + 1..last] {
            *cell = '-';
        }
    }
    cells
}

/// Draw the notes of one bar as a fixed-width lane
pub fn bar_lane(notes: &[NotePlacement], parts_per_bar: i64) -> String {
    lane_cells(notes, parts_per_bar)
        .into_iter()
        .map(|c| {
            let s = c.to_string();
            match c {
                'X' => s.bright_yellow().bold().to_string(),
                'x' => s.bright_green().to_string(),
                'o' => s.cyan().dimmed().to_string(),
                '-' => s.green().dimmed().to_string(),
                _ => s.bright_black().to_string(),
            }
        })
        .collect()
}

/// Lanes for every channel and bar of an arrangement
pub fn arrangement(arrangement: &Arrangement) -> String {
    if arrangement.channels.is_empty() {
        return "Nothing to arrange".to_string();
    }
    let mut out = format!(
        "{} {} bar(s), {} note(s)\n",
        "Arrangement:".bold(),
        arrangement.bar_amount,
        arrangement.note_count()
    );
    for (channel, bars) in &arrangement.channels {
        out.push_str(&format!("{}\n", format!("Channel {}", channel + 1).green()));
        for (bar, notes) in bars.iter().enumerate() {
            let placements: Vec<NotePlacement> = notes
                .iter()
                .map(|n| NotePlacement {
                    step: 0,
                    start: n.start,
                    end: n.end,
                    size: n.size,
                    accent: n.accent,
                    probability: n.probability,
                    continues_last_pattern: n.continues_last_pattern,
                })
                .collect();
            out.push_str(&format!(
                "  {:>3} |{}|\n",
                bar + 1,
                bar_lane(&placements, arrangement.parts_per_bar)
            ));
        }
    }
    out.trim_end().to_string()
}
