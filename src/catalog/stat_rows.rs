//! Tooltip stat rows → [StatAggregate].
//!
//! Percent rows (`"+25%"`) become fractions, flat rows (`"+40"`) are taken as
//! is. Penetration is flat or percent depending on the trailing `%`. Row names
//! the model does not use are ignored.

use crate::combat::{StatAggregate, StatKind};
use crate::data::raw::RawStatRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowShape {
    Percent(StatKind),
    Flat(StatKind),
    /// Flat when the value has no `%`, percent otherwise.
    Either { flat: StatKind, percent: StatKind },
}

fn row_shape(description: &str) -> Option<RowShape> {
    let shape = match description.trim() {
        "Attack Speed" => RowShape::Percent(StatKind::AttackSpeed),
        "Critical Strike Chance" | "Physical Critical Strike Chance" => {
            RowShape::Percent(StatKind::CritChance)
        }
        "Physical Penetration" => RowShape::Either {
            flat: StatKind::FlatPen,
            percent: StatKind::PercentPen,
        },
        "Physical Power" => RowShape::Flat(StatKind::PhysicalPower),
        "Basic Attack Damage" => RowShape::Flat(StatKind::BasicAttack),
        "Mana" => RowShape::Flat(StatKind::Mana),
        _ => return None,
    };
    Some(shape)
}

/// Whether the model reads this row name.
pub fn is_recognized(description: &str) -> bool {
    row_shape(description).is_some()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRow {
    pub description: String,
    pub value: String,
}

/// Parses one row. `Ok(None)` for names the model ignores.
pub fn parse_stat_row(description: &str, value: &str) -> Result<Option<(StatKind, f64)>, MalformedRow> {
    let Some(shape) = row_shape(description) else {
        return Ok(None);
    };
    let malformed = || MalformedRow {
        description: description.to_string(),
        value: value.to_string(),
    };

    let trimmed = value.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let (number, is_percent) = match unsigned.strip_suffix('%') {
        Some(number) => (number.trim(), true),
        None => (unsigned, false),
    };
    let parsed: f64 = number.parse().map_err(|_| malformed())?;
    if !parsed.is_finite() {
        return Err(malformed());
    }

    let entry = match (shape, is_percent) {
        (RowShape::Percent(kind), true) => (kind, parsed / 100.0),
        (RowShape::Flat(kind), false) => (kind, parsed),
        (RowShape::Either { percent, .. }, true) => (percent, parsed / 100.0),
        (RowShape::Either { flat, .. }, false) => (flat, parsed),
        _ => return Err(malformed()),
    };
    Ok(Some(entry))
}

/// Sums every recognised row; malformed rows are skipped and returned.
pub fn aggregate_stat_rows(rows: &[RawStatRow]) -> (StatAggregate, Vec<MalformedRow>) {
    let mut stats = StatAggregate::new();
    let mut malformed = Vec::new();
    for row in rows {
        match parse_stat_row(&row.description, &row.value) {
            Ok(Some((kind, value))) => stats.apply(kind, value),
            Ok(None) => {}
            Err(bad) => malformed.push(bad),
        }
    }
    (stats, malformed)
}
