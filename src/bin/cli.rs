use chrono::NaiveDate;
use leave_planner::export::format_display_date;
use leave_planner::holiday::sorted_by_date;
use leave_planner::{
    Holiday, LeaveRecommendation, PlannerConfig, RecommendationType, analyze_with_config,
    filter_by_type, load_holidays, save_ics, save_recommendations_to_csv,
    save_recommendations_to_json,
};
use std::io::{self, Write};
use std::str::FromStr;
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn render_text_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    // Compute column widths
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (ci, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            if ci < widths.len() && len > widths[ci] {
                widths[ci] = len;
            }
        }
    }

    // Build horizontal separator
    let mut sep = String::new();
    sep.push('+');
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    push_row(&mut out, &widths, headers.iter().copied());
    out.push_str(&sep);
    out.push('\n');
    for row in rows {
        push_row(&mut out, &widths, row.iter().map(String::as_str));
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn push_row<'a>(out: &mut String, widths: &[usize], cells: impl Iterator<Item = &'a str>) {
    out.push('|');
    for (ci, cell) in cells.enumerate() {
        out.push(' ');
        out.push_str(cell);
        let pad = widths
            .get(ci)
            .copied()
            .unwrap_or(0)
            .saturating_sub(cell.chars().count());
        if pad > 0 {
            out.push_str(&" ".repeat(pad));
        }
        out.push(' ');
        out.push('|');
    }
    out.push('\n');
}

fn render_holidays(holidays: &[Holiday]) -> String {
    let rows: Vec<Vec<String>> = sorted_by_date(holidays)
        .iter()
        .map(|h| {
            vec![
                h.date.to_string(),
                h.date.format("%a").to_string(),
                h.name.clone(),
            ]
        })
        .collect();
    render_text_table(&["date", "day", "holiday"], &rows)
}

fn render_recommendations(recs: &[LeaveRecommendation]) -> String {
    let rows: Vec<Vec<String>> = recs
        .iter()
        .enumerate()
        .map(|(idx, rec)| {
            let span = match (rec.first_date(), rec.last_date()) {
                (Some(first), Some(last)) if first != last => format!(
                    "{} - {}",
                    format_display_date(first),
                    format_display_date(last)
                ),
                (Some(first), _) => format_display_date(first),
                _ => String::new(),
            };
            vec![
                (idx + 1).to_string(),
                rec.kind.label().to_string(),
                span,
                rec.days_needed.to_string(),
                format!("{:.2}", rec.efficiency),
                rec.related_holiday.clone(),
                rec.strategy.clone(),
            ]
        })
        .collect();
    render_text_table(
        &[
            "#",
            "type",
            "dates",
            "days_needed",
            "efficiency",
            "holiday",
            "strategy",
        ],
        &rows,
    )
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  load <path>                        Load holidays from .csv, .json or .xlsx\n  add <YYYY-MM-DD> <name...>         Add a single holiday\n  clear                              Remove all holidays\n  holidays                           List loaded holidays\n  show [all|long|bridge|cluster]     Show ranked recommendations\n  types                              List recommendation types\n  config show                        Show analysis thresholds\n  config load <json_path>            Load analysis thresholds from JSON file\n  config save <json_path>            Save analysis thresholds to JSON file\n  export <csv|json|ics> <path>       Export recommendations\n  quit|exit                          Exit"
    );
}

fn print_types() {
    println!("Recommendation types:");
    for (key, description) in RecommendationType::variants() {
        println!("  {:<10} {}", key, description);
    }
}

fn print_config(config: &PlannerConfig) {
    println!("Bridge max gap days   : {}", config.bridge_max_gap_days);
    println!("Cluster window days   : {}", config.cluster_window_days);
    println!("Cluster max leave days: {}", config.cluster_max_leave_days);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut holidays: Vec<Holiday> = Vec::new();
    let mut config = PlannerConfig::default();
    let mut recommendations: Vec<LeaveRecommendation> = Vec::new();

    println!("Leave Planner (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        if let Err(e) = io::stdout().flush() {
            warn!(error = %e, "failed to flush prompt");
        }
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "failed to read command");
                break;
            }
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "types" => print_types(),
            "load" => match parts.next() {
                Some(path) => match load_holidays(path) {
                    Ok(loaded) => {
                        holidays = loaded;
                        recommendations = analyze_with_config(&holidays, &config);
                        println!(
                            "Loaded {} holidays from {} ({} recommendations).",
                            holidays.len(),
                            path,
                            recommendations.len()
                        );
                    }
                    Err(e) => println!("Error loading holidays: {}", e),
                },
                None => println!("Usage: load <path>"),
            },
            "add" => {
                let date_s = parts.next();
                let name = parts.collect::<Vec<_>>().join(" ");
                match date_s {
                    Some(date_s) if !name.is_empty() => {
                        let date = match NaiveDate::parse_from_str(date_s, "%Y-%m-%d") {
                            Ok(d) => d,
                            Err(_) => {
                                println!("Invalid date (YYYY-MM-DD)");
                                continue;
                            }
                        };
                        holidays.push(Holiday::new(date, name.clone()));
                        recommendations = analyze_with_config(&holidays, &config);
                        println!(
                            "Added {} on {} ({} recommendations).",
                            name,
                            date,
                            recommendations.len()
                        );
                    }
                    _ => println!("Usage: add <YYYY-MM-DD> <name...>"),
                }
            }
            "clear" => {
                holidays.clear();
                recommendations.clear();
                println!("Cleared holidays.");
            }
            "holidays" => {
                if holidays.is_empty() {
                    println!("No holidays loaded.");
                } else {
                    println!("{}", render_holidays(&holidays));
                }
            }
            "show" => {
                let kind = match parts.next() {
                    None | Some("all") => None,
                    Some(other) => match RecommendationType::from_str(other) {
                        Ok(kind) => Some(kind),
                        Err(e) => {
                            println!("{}", e);
                            continue;
                        }
                    },
                };
                let shown = filter_by_type(&recommendations, kind);
                if shown.is_empty() {
                    println!("No strategic leave opportunities found.");
                } else {
                    println!("{}", render_recommendations(&shown));
                }
            }
            "config" => match (parts.next(), parts.next()) {
                (Some("show"), _) => print_config(&config),
                (Some("load"), Some(path)) => match PlannerConfig::from_json_file(path) {
                    Ok(loaded) => {
                        config = loaded;
                        recommendations = analyze_with_config(&holidays, &config);
                        println!("Configuration loaded from {}.", path);
                        print_config(&config);
                    }
                    Err(e) => println!("Error loading configuration: {}", e),
                },
                (Some("save"), Some(path)) => match config.save_json(path) {
                    Ok(()) => println!("Configuration saved to {}.", path),
                    Err(e) => println!("Error saving configuration: {}", e),
                },
                _ => println!("Usage: config <show|load <json_path>|save <json_path>>"),
            },
            "export" => {
                let format = parts.next();
                let path = parts.next();
                let result = match (format, path) {
                    (Some("csv"), Some(path)) => save_recommendations_to_csv(&recommendations, path),
                    (Some("json"), Some(path)) => {
                        save_recommendations_to_json(&recommendations, path)
                    }
                    (Some("ics"), Some(path)) => save_ics(path, &holidays, &recommendations),
                    _ => {
                        println!("Usage: export <csv|json|ics> <path>");
                        continue;
                    }
                };
                match result {
                    Ok(()) => println!(
                        "Exported {} recommendations to {}.",
                        recommendations.len(),
                        path.unwrap_or_default()
                    ),
                    Err(e) => println!("Export error: {}", e),
                }
            }
            _ => println!("Unknown command. Type 'help'."),
        }
    }
}
