use log::{info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reads a single-column reference table (elements.csv, bonds.csv).
/// The first line is a header and is skipped, every other non-empty line contributes
/// its first comma separated field with surrounding quotes removed.
/// Returns pairs (line number in file, value); line numbers start from 1.
pub fn load_reference_column(file_name: &str) -> Result<Vec<(usize, String)>, String> {
    let path = Path::new(file_name);
    if !path.exists() {
        return Err(format!("File '{}' does not exist", file_name));
    }

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => return Err(format!("Failed to open file '{}': {}", file_name, e)),
    };

    let reader = BufReader::new(file);
    let mut lines = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        match line {
            Ok(line) => lines.push((i + 1, line)),
            Err(e) => {
                return Err(format!(
                    "Failed to read line {} of '{}': {}",
                    i + 1,
                    file_name,
                    e
                ));
            }
        }
    }

    if lines.is_empty() {
        return Err(format!("File '{}' is empty, header expected", file_name));
    }

    let values: Vec<(usize, String)> = lines
        .into_iter()
        .skip(1)
        .filter_map(|(line_number, line)| {
            let value = first_field(&line);
            if value.is_empty() {
                None
            } else {
                Some((line_number, value))
            }
        })
        .collect();

    if values.is_empty() {
        warn!("Reference table '{}' contains only a header", file_name);
    }
    info!(
        "Loaded {} entries from reference table '{}'",
        values.len(),
        file_name
    );
    Ok(values)
}

fn first_field(line: &str) -> String {
    let field = line.split(',').next().unwrap_or("").trim();
    field.trim_matches('"').trim().to_string()
}
