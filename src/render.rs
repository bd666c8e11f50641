use std::fmt::Write;

use common::{ClientSnapshot, PredictionResult, RequestState};

pub const TITLE: &str = "SmartTrader Console";

/// Draws one frame of the console for the given snapshot.
pub fn render(snapshot: &ClientSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{TITLE}");
    let _ = writeln!(out, "Assume today's date is: {}", snapshot.date);
    out.push('\n');

    match &snapshot.state {
        RequestState::Loading => {
            out.push_str("Loading...\n");
            return out;
        }
        RequestState::Failed(reason) => {
            let _ = writeln!(out, "Prediction failed ({:?}): {}", reason.kind, reason.message);
            out.push('\n');
        }
        RequestState::Idle | RequestState::Loaded(_) => {}
    }

    out.push_str(&result_tables(snapshot.state.result()));
    out
}

/// The price summary and the strategy table. Cells are blank when there is no result.
pub fn result_tables(result: Option<&PredictionResult>) -> String {
    let price = |pick: fn(&PredictionResult) -> f64| {
        result.map(|r| format!("{:.2}", pick(r))).unwrap_or_default()
    };

    let summary = vec![
        ("Highest Price".to_string(), price(|r| r.high_price)),
        ("Lowest Price".to_string(), price(|r| r.low_price)),
        ("Average Closing Price".to_string(), price(|r| r.avg_price)),
    ];

    let strategy: Vec<(String, String)> = result
        .map(|r| {
            r.strategy
                .iter()
                .map(|step| (step.date.to_string(), step.action.to_string()))
                .collect()
        })
        .unwrap_or_default();

    let mut out = String::new();
    out.push_str("Predicted prices for the next five business days in USD are:\n");
    out.push_str(&table(None, &summary));
    out.push('\n');
    out.push_str("Recommended trading strategy:\n");
    out.push_str(&table(Some(("Date", "Action")), &strategy));
    out
}

fn table(header: Option<(&str, &str)>, rows: &[(String, String)]) -> String {
    let header_widths = header.map(|(a, b)| (a.len(), b.len())).unwrap_or((0, 0));
    let (left, right) = rows.iter().fold(header_widths, |(l, r), (a, b)| {
        (l.max(a.chars().count()), r.max(b.chars().count()))
    });

    let border = format!("+-{}-+-{}-+\n", "-".repeat(left), "-".repeat(right));
    let line = |a: &str, b: &str| format!("| {a:<left$} | {b:<right$} |\n");

    let mut out = border.clone();
    if let Some((a, b)) = header {
        out.push_str(&line(a, b));
        out.push_str(&border);
    }
    for (a, b) in rows {
        out.push_str(&line(a, b));
    }
    if !rows.is_empty() || header.is_none() {
        out.push_str(&border);
    }
    out
}
