//! Stacking curves shared by passive effects. Both are pure functions of a
//! small integer domain, so the common range is tabulated once on first use.

use std::sync::OnceLock;

/// Hit counts covered by the lookup tables; larger counts are computed directly.
pub const TABLE_MAX_HITS: u32 = 32;
/// Stack limits covered by the lookup table.
pub const TABLE_MAX_STACKS: u32 = 10;

/// Mean stack count seen by `hits` consecutive hits when every hit adds one
/// stack (up to `max_stacks`) after it lands. The first hit sees zero stacks.
pub fn average_stacks(hits: u32, max_stacks: u32) -> f64 {
    if hits <= TABLE_MAX_HITS && max_stacks <= TABLE_MAX_STACKS {
        return average_stacks_table()[hits as usize][max_stacks as usize];
    }
    average_stacks_direct(hits, max_stacks)
}

fn average_stacks_direct(hits: u32, max_stacks: u32) -> f64 {
    if hits == 0 {
        return 0.0;
    }
    let total: u64 = (0..hits).map(|i| u64::from(i.min(max_stacks))).sum();
    total as f64 / f64::from(hits)
}

fn average_stacks_table() -> &'static Vec<Vec<f64>> {
    static TABLE: OnceLock<Vec<Vec<f64>>> = OnceLock::new();
    TABLE.get_or_init(|| {
        (0..=TABLE_MAX_HITS)
            .map(|hits| {
                (0..=TABLE_MAX_STACKS)
                    .map(|max_stacks| average_stacks_direct(hits, max_stacks))
                    .collect()
            })
            .collect()
    })
}

/// Fraction of `hits` basic attacks that land after at least one earlier crit.
///
/// Crit chance is clamped to `[0, 1]` and rounded to a whole percent.
pub fn crit_uptime(hits: u32, crit_chance: f64) -> f64 {
    let percent = crit_percent(crit_chance);
    if hits <= TABLE_MAX_HITS {
        return crit_uptime_table()[hits as usize][percent as usize];
    }
    crit_uptime_direct(hits, percent)
}

fn crit_percent(crit_chance: f64) -> u32 {
    if !crit_chance.is_finite() {
        return 0;
    }
    (crit_chance.clamp(0.0, 1.0) * 100.0).round() as u32
}

fn crit_uptime_direct(hits: u32, percent: u32) -> f64 {
    if hits == 0 {
        return 0.0;
    }
    let miss = 1.0 - f64::from(percent) / 100.0;
    let total: f64 = (0..hits).map(|i| 1.0 - miss.powi(i as i32)).sum();
    total / f64::from(hits)
}

fn crit_uptime_table() -> &'static Vec<Vec<f64>> {
    static TABLE: OnceLock<Vec<Vec<f64>>> = OnceLock::new();
    TABLE.get_or_init(|| {
        (0..=TABLE_MAX_HITS)
            .map(|hits| (0..=100).map(|percent| crit_uptime_direct(hits, percent)).collect())
            .collect()
    })
}
