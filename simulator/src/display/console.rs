use crate::display::format::{format_distance, format_travel_time};
use crate::display::model::DisplayModel;
use anyhow::Context;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

/// Terminal front end: prints each refresh and optionally appends it to a log file.
pub struct Console {
    json: bool,
    report_path: Option<PathBuf>,
}

impl Console {
    pub fn new(json: bool, report_path: Option<PathBuf>) -> Self {
        Self { json, report_path }
    }

    pub fn publish(&self, models: &[DisplayModel]) -> anyhow::Result<()> {
        let mut lines = Vec::with_capacity(models.len());
        for model in models {
            let line = if self.json {
                serde_json::to_string(model).context("serializing display model")?
            } else {
                render_line(model)
            };
            println!("{}", line);
            lines.push(line);
        }

        if let Some(path) = &self.report_path {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating report directory {}", parent.display()))?;
            }
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening report {}", path.display()))?;
            for line in &lines {
                writeln!(file, "{}", line)
                    .with_context(|| format!("writing report {}", path.display()))?;
            }
        }
        Ok(())
    }

    pub fn publish_status(&self, message: &str) {
        if !self.json {
            println!("[signal] {}", message);
        }
    }
}

pub fn render_line(model: &DisplayModel) -> String {
    let mut line = format!(
        "{} [{}] {} {}s",
        model.site_name, model.site_id, model.phase, model.remaining_seconds
    );

    if let Some(route) = &model.route {
        line.push_str(" | travel ");
        line.push_str(&format_travel_time(route.travel_seconds));
        if let Some(distance) = route.distance_m {
            line.push_str(&format!(" ({})", format_distance(distance)));
        }
        line.push_str(&format!(
            " -> {} on arrival at {}",
            route.arrival_phase,
            route.arrival_instant.format("%H:%M:%S")
        ));
    }
    line
}
