//! Presentation of ranked results: text table, JSON and CSV.

use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::ExportError;
use crate::optimizer::ranking::BuildResult;

/// Separator used when a build is flattened into one cell.
pub const BUILD_SEPARATOR: &str = "; ";

pub fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

#[derive(Debug, Serialize)]
struct RankedEntry<'a> {
    rank: usize,
    #[serde(flatten)]
    result: &'a BuildResult,
}

/// Pretty JSON array with a 1-based `rank` on each entry.
pub fn to_json(results: &[BuildResult]) -> Result<String, ExportError> {
    let entries: Vec<RankedEntry<'_>> = results
        .iter()
        .enumerate()
        .map(|(index, result)| RankedEntry { rank: index + 1, result })
        .collect();
    Ok(serde_json::to_string_pretty(&entries)?)
}

/// Tab-separated table. Composite results get one DPS% column per scenario.
pub fn render_table(results: &[BuildResult], scenario_names: &[String]) -> String {
    let mut out = String::new();
    let _ = write!(out, "rank\tdps\tdps%\tdpspg%");
    let per_scenario = results.first().map_or(0, |r| r.scenario_results.len());
    for index in 0..per_scenario {
        let _ = write!(out, "\t{}%", column_name(scenario_names, index));
    }
    let _ = writeln!(out, "\tbuild");

    for (index, result) in results.iter().enumerate() {
        let _ = write!(
            out,
            "{}\t{:.0}\t{}\t{}",
            index + 1,
            result.dps,
            format_percent(result.dps_fraction),
            format_percent(result.dpspg_fraction)
        );
        for part in &result.scenario_results {
            let _ = write!(out, "\t{}", format_percent(part.dps_fraction));
        }
        let _ = writeln!(out, "\t{}", result.build.join(BUILD_SEPARATOR));
    }
    out
}

fn column_name(scenario_names: &[String], index: usize) -> String {
    scenario_names
        .get(index)
        .cloned()
        .unwrap_or_else(|| format!("scenario{}", index + 1))
}

pub fn write_csv<W: Write>(writer: W, results: &[BuildResult], scenario_names: &[String]) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let per_scenario = results.first().map_or(0, |r| r.scenario_results.len());

    let mut header = vec![
        "rank".to_string(),
        "build".to_string(),
        "dps".to_string(),
        "dps_fraction".to_string(),
        "dps_per_gold".to_string(),
        "dpspg_fraction".to_string(),
    ];
    for index in 0..per_scenario {
        let name = column_name(scenario_names, index);
        header.push(format!("{name}_dps"));
        header.push(format!("{name}_dps_fraction"));
        header.push(format!("{name}_dpspg_fraction"));
    }
    csv_writer.write_record(&header)?;

    for (index, result) in results.iter().enumerate() {
        let mut record = vec![
            (index + 1).to_string(),
            result.build.join(BUILD_SEPARATOR),
            format!("{:.4}", result.dps),
            format!("{:.6}", result.dps_fraction),
            format!("{:.8}", result.dps_per_gold),
            format!("{:.6}", result.dpspg_fraction),
        ];
        for part in &result.scenario_results {
            record.push(format!("{:.4}", part.dps));
            record.push(format!("{:.6}", part.dps_fraction));
            record.push(format!("{:.6}", part.dpspg_fraction));
        }
        csv_writer.write_record(&record)?;
    }
    csv_writer.flush().map_err(|source| ExportError::Io {
        path: "<csv>".to_string(),
        source,
    })?;
    Ok(())
}

pub fn write_csv_file(
    path: impl AsRef<Path>,
    results: &[BuildResult],
    scenario_names: &[String],
) -> Result<(), ExportError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    write_csv(file, results, scenario_names)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(build: &[&str], dps: f64, dps_fraction: f64) -> BuildResult {
        BuildResult {
            build: build.iter().map(|name| name.to_string()).collect(),
            stats: None,
            breakdown: None,
            dps,
            dps_fraction,
            dps_per_gold: dps / 1000.0,
            dpspg_fraction: dps_fraction,
            scenario_results: Vec::new(),
        }
    }

    #[test]
    fn percent_has_one_decimal() {
        assert_eq!(format_percent(1.0), "100.0%");
        assert_eq!(format_percent(0.8765), "87.7%");
    }

    #[test]
    fn table_lists_rank_and_build() {
        let results = vec![result(&["Deathbringer", "Rage"], 300.4, 1.0), result(&["Rage"], 150.0, 0.5)];
        let table = render_table(&results, &[]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "rank\tdps\tdps%\tdpspg%\tbuild");
        assert_eq!(lines[1], "1\t300\t100.0%\t100.0%\tDeathbringer; Rage");
        assert_eq!(lines[2], "2\t150\t50.0%\t50.0%\tRage");
    }

    #[test]
    fn composite_rows_get_scenario_columns() {
        let mut composite = result(&["Rage"], 100.0, 0.75);
        composite.scenario_results = vec![result(&["Rage"], 120.0, 1.0), result(&["Rage"], 80.0, 0.5)];
        let names = vec!["squishy".to_string(), "tank".to_string()];

        let table = render_table(std::slice::from_ref(&composite), &names);
        assert!(table.starts_with("rank\tdps\tdps%\tdpspg%\tsquishy%\ttank%\tbuild"));

        let mut buffer = Vec::new();
        write_csv(&mut buffer, &[composite], &names).expect("csv write");
        let text = String::from_utf8(buffer).expect("utf8");
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("rank,build,dps,dps_fraction,dps_per_gold,dpspg_fraction,squishy_dps,squishy_dps_fraction,squishy_dpspg_fraction,tank_dps,tank_dps_fraction,tank_dpspg_fraction")
        );
        let row = lines.next().expect("one row");
        assert!(row.starts_with("1,Rage,100.0000,0.750000,"));
    }

    #[test]
    fn json_carries_rank() {
        let results = vec![result(&["Rage"], 150.0, 1.0)];
        let json = to_json(&results).expect("json");
        let parsed: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(parsed[0]["rank"], 1);
        assert_eq!(parsed[0]["build"][0], "Rage");
        assert!(parsed[0].get("stats").is_none());
    }
}
