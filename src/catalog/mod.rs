//! Item catalog: raw API records filtered down to the starter and normal pools
//! a build draws from, each converted into a [StatAggregate] plus its passive.

pub mod baseline;
pub mod diagnostics;
pub mod stat_rows;

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::combat::{Role, StatAggregate};
use crate::data::raw::{RawCharacter, RawItem, RawStatRow};
use crate::passives::{lookup, registry, PassiveEffect};

pub use baseline::ArchetypeBaseline;
pub use diagnostics::{CatalogDiagnostic, DiagnosticKind, DiagnosticsReport, Severity};

/// Filtering and classification knobs. Defaults describe physical hunter items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogRules {
    pub evolved_prefix: String,
    pub denylist_suffix: String,
    /// A starter is kept only if its name contains one of these.
    pub starter_markers: Vec<String>,
    pub offensive_stats: Vec<String>,
    pub defensive_stats: Vec<String>,
    pub reference_level: u32,
    pub starter_tier: u32,
    pub normal_tier: u32,
    pub evolved_tier: u32,
}

impl Default for CatalogRules {
    fn default() -> Self {
        let strings = |names: &[&str]| -> Vec<String> { names.iter().map(|name| name.to_string()).collect() };
        Self {
            evolved_prefix: "Evolved ".to_string(),
            denylist_suffix: "Acorn".to_string(),
            starter_markers: strings(&["Death", "Cowl", "Arrow", "Manikin", "Bluestone"]),
            offensive_stats: strings(&["Physical Power", "Attack Speed"]),
            defensive_stats: strings(&[
                "Physical Protection",
                "Magical Protection",
                "Health",
                "Magical Power",
            ]),
            reference_level: 20,
            starter_tier: 2,
            normal_tier: 3,
            evolved_tier: 4,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CatalogItem {
    pub id: u64,
    pub name: String,
    pub tier: u32,
    /// Parsed stat rows plus the full upgrade-chain price.
    pub stats: StatAggregate,
    pub passive: Option<PassiveEffect>,
    pub passive_text: Option<String>,
    pub stat_rows: Vec<RawStatRow>,
}

impl CatalogItem {
    /// Item with the given stats and the registered passive for `name`, if any.
    pub fn new(name: impl Into<String>, stats: StatAggregate) -> Self {
        let name = name.into();
        let passive = lookup(&name);
        Self {
            id: 0,
            name,
            tier: 0,
            stats,
            passive,
            passive_text: None,
            stat_rows: Vec::new(),
        }
    }

    pub fn price(&self) -> f64 {
        self.stats.price
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    role: Role,
    starters: BTreeMap<String, CatalogItem>,
    normals: BTreeMap<String, CatalogItem>,
    baseline: ArchetypeBaseline,
    diagnostics: DiagnosticsReport,
}

impl Catalog {
    pub fn new(role: Role, baseline: ArchetypeBaseline) -> Self {
        Self {
            role,
            starters: BTreeMap::new(),
            normals: BTreeMap::new(),
            baseline,
            diagnostics: DiagnosticsReport::default(),
        }
    }

    pub fn with_starter(mut self, item: CatalogItem) -> Self {
        self.starters.insert(item.name.clone(), item);
        self
    }

    pub fn with_normal(mut self, item: CatalogItem) -> Self {
        self.normals.insert(item.name.clone(), item);
        self
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn baseline(&self) -> &ArchetypeBaseline {
        &self.baseline
    }

    pub fn diagnostics(&self) -> &DiagnosticsReport {
        &self.diagnostics
    }

    pub fn starters(&self) -> &BTreeMap<String, CatalogItem> {
        &self.starters
    }

    pub fn normals(&self) -> &BTreeMap<String, CatalogItem> {
        &self.normals
    }

    pub fn starter_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.starters.keys().map(String::as_str)
    }

    pub fn normal_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.normals.keys().map(String::as_str)
    }

    pub fn is_starter(&self, name: &str) -> bool {
        self.starters.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&CatalogItem> {
        self.starters.get(name).or_else(|| self.normals.get(name))
    }

    /// Starters first, then normals, each name-sorted.
    pub fn items(&self) -> impl Iterator<Item = &CatalogItem> + '_ {
        self.starters.values().chain(self.normals.values())
    }

    pub fn len(&self) -> usize {
        self.starters.len() + self.normals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// [build_catalog_with_rules] with the default physical-hunter rules.
pub fn build_catalog(raw_items: &[RawItem], raw_characters: &[RawCharacter], role: Role) -> Catalog {
    build_catalog_with_rules(raw_items, raw_characters, role, &CatalogRules::default())
}

pub fn build_catalog_with_rules(
    raw_items: &[RawItem],
    raw_characters: &[RawCharacter],
    role: Role,
    rules: &CatalogRules,
) -> Catalog {
    let baseline = ArchetypeBaseline::from_roster(raw_characters, role, rules.reference_level);
    let mut catalog = Catalog::new(role, baseline);
    if baseline.is_empty() {
        catalog.diagnostics.push(
            DiagnosticKind::EmptyRoster,
            role.as_str(),
            "no roster entry has this role; baseline stats are zero",
        );
    }

    let (starters, normals) = classify(raw_items, role, rules);
    let by_id: HashMap<u64, &RawItem> = raw_items.iter().map(|item| (item.id, item)).collect();
    let registry = registry();
    let mut unused: HashSet<&'static str> = registry.names().collect();

    for (raw, is_starter) in starters
        .into_iter()
        .map(|raw| (raw, true))
        .chain(normals.into_iter().map(|raw| (raw, false)))
    {
        let item = convert_item(raw, &by_id, &mut catalog.diagnostics);
        if registry.contains(&item.name) {
            unused.remove(item.name.as_str());
        } else if item.passive_text.is_some() {
            catalog.diagnostics.push(
                DiagnosticKind::UnrecognizedPassive,
                item.name.clone(),
                "item has passive text but no registered effect",
            );
        }
        let pool = if is_starter {
            &mut catalog.starters
        } else {
            &mut catalog.normals
        };
        pool.insert(item.name.clone(), item);
    }

    let mut unused: Vec<&str> = unused.into_iter().collect();
    unused.sort_unstable();
    for name in unused {
        catalog.diagnostics.push(
            DiagnosticKind::UnusedPassive,
            name,
            "registered passive never appears in the catalog",
        );
    }

    tracing::debug!(
        role = %role,
        starters = catalog.starters.len(),
        normals = catalog.normals.len(),
        diagnostics = catalog.diagnostics.len(),
        "catalog built"
    );
    catalog
}

/// Splits raw records into starter and normal candidates that survive every filter.
fn classify<'a>(
    raw_items: &'a [RawItem],
    role: Role,
    rules: &CatalogRules,
) -> (Vec<&'a RawItem>, Vec<&'a RawItem>) {
    let mut starters = Vec::new();
    let mut normals = Vec::new();

    for item in raw_items.iter().filter(|item| item.is_active()) {
        let name = item.device_name.as_str();
        let is_starter = item.tier == rules.starter_tier && item.starting_item;
        let is_normal = !is_starter
            && (item.tier == rules.normal_tier
                || (item.tier == rules.evolved_tier && name.starts_with(&rules.evolved_prefix)));
        if !is_starter && !is_normal {
            continue;
        }
        if item.is_restricted_for(role.as_str()) || name.ends_with(&rules.denylist_suffix) {
            continue;
        }

        if is_starter {
            if rules.starter_markers.iter().any(|marker| name.contains(marker.as_str())) {
                starters.push(item);
            }
            continue;
        }

        let has_row = |names: &[String]| {
            item.stat_rows()
                .iter()
                .any(|row| names.iter().any(|wanted| wanted == row.description.trim()))
        };
        if has_row(&rules.offensive_stats) && !has_row(&rules.defensive_stats) {
            normals.push(item);
        }
    }

    let superseded: HashSet<&str> = normals
        .iter()
        .filter_map(|item| item.device_name.strip_prefix(rules.evolved_prefix.as_str()))
        .collect();
    normals.retain(|item| !superseded.contains(item.device_name.as_str()));

    (starters, normals)
}

fn convert_item(raw: &RawItem, by_id: &HashMap<u64, &RawItem>, diagnostics: &mut DiagnosticsReport) -> CatalogItem {
    let (mut stats, malformed) = stat_rows::aggregate_stat_rows(raw.stat_rows());
    for row in malformed {
        diagnostics.push(
            DiagnosticKind::MalformedStatValue,
            raw.device_name.clone(),
            format!("'{}' has unparseable value '{}'", row.description, row.value),
        );
    }
    stats.price = chain_price(raw, by_id, diagnostics);

    CatalogItem {
        id: raw.id,
        name: raw.device_name.clone(),
        tier: raw.tier,
        stats,
        passive: lookup(&raw.device_name),
        passive_text: raw.passive_text().map(str::to_string),
        stat_rows: raw.stat_rows().to_vec(),
    }
}

/// Sums the item's price with every item below it in its upgrade chain.
fn chain_price(raw: &RawItem, by_id: &HashMap<u64, &RawItem>, diagnostics: &mut DiagnosticsReport) -> f64 {
    let mut total = f64::from(raw.price);
    let mut visited = HashSet::from([raw.id]);
    let mut next = raw.child_item_id;

    while next != 0 {
        if !visited.insert(next) {
            diagnostics.push(
                DiagnosticKind::BrokenPriceChain,
                raw.device_name.clone(),
                format!("upgrade chain loops back to item {next}"),
            );
            break;
        }
        let Some(child) = by_id.get(&next) else {
            diagnostics.push(
                DiagnosticKind::BrokenPriceChain,
                raw.device_name.clone(),
                format!("unknown child item {next}"),
            );
            break;
        };
        total += f64::from(child.price);
        next = child.child_item_id;
    }
    total
}
