//! Lazy enumeration of every legal build.
//!
//! Open slots are filled by choosing groups from `[starters, normal_1, ..,
//! normal_n]` (combinations, lexicographic) and then taking one member of each
//! chosen group (odometer, last group fastest). The starter pool is a single
//! group, so a build never holds two starters; every normal item is its own
//! group, so none repeats.

use std::iter::FusedIterator;

use crate::catalog::Catalog;
use crate::error::BuildError;

/// Item names, forced items first.
pub type Build = Vec<String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildGenerator {
    forced: Vec<String>,
    groups: Vec<Vec<String>>,
    open_slots: usize,
    starter_groups: usize,
}

/// Validates the forced list against the catalog and prepares the groups.
pub fn generate_builds(
    catalog: &Catalog,
    forced_items: &[String],
    build_size: usize,
) -> Result<BuildGenerator, BuildError> {
    if forced_items.len() > build_size {
        return Err(BuildError::TooManyForcedItems {
            forced: forced_items.len(),
            build_size,
        });
    }

    let mut starters: Vec<String> = catalog.starter_names().map(str::to_string).collect();
    let mut normals: Vec<String> = catalog.normal_names().map(str::to_string).collect();
    let mut forced_starter: Option<&str> = None;

    for name in forced_items {
        if let Some(index) = starters.iter().position(|starter| starter == name) {
            if let Some(first) = forced_starter {
                return Err(BuildError::MultipleStarters {
                    first: first.to_string(),
                    second: name.clone(),
                });
            }
            starters.remove(index);
            forced_starter = Some(name.as_str());
        } else if let Some(index) = normals.iter().position(|normal| normal == name) {
            normals.remove(index);
        } else {
            return Err(BuildError::UnknownItem(name.clone()));
        }
    }

    let mut groups = Vec::with_capacity(normals.len() + 1);
    if forced_starter.is_none() && !starters.is_empty() {
        groups.push(starters);
    }
    let starter_groups = groups.len();
    groups.extend(normals.into_iter().map(|name| vec![name]));

    Ok(BuildGenerator {
        forced: forced_items.to_vec(),
        groups,
        open_slots: build_size - forced_items.len(),
        starter_groups,
    })
}

impl BuildGenerator {
    pub fn forced(&self) -> &[String] {
        &self.forced
    }

    pub fn build_size(&self) -> usize {
        self.forced.len() + self.open_slots
    }

    /// Fresh iterator from the first build. Each call restarts the sequence.
    pub fn iter(&self) -> BuildIter<'_> {
        BuildIter::new(self)
    }

    /// Number of builds, computed without enumerating. Saturates at `usize::MAX`.
    pub fn len(&self) -> usize {
        usize::try_from(self.count()).unwrap_or(usize::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    fn count(&self) -> u128 {
        let singletons = (self.groups.len() - self.starter_groups) as u128;
        let k = self.open_slots as u128;
        let without_starter = binomial(singletons, k);
        if self.starter_groups == 0 || k == 0 {
            return without_starter;
        }
        let starters = self.groups[0].len() as u128;
        without_starter.saturating_add(starters.saturating_mul(binomial(singletons, k - 1)))
    }
}

impl<'a> IntoIterator for &'a BuildGenerator {
    type Item = Build;
    type IntoIter = BuildIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn binomial(n: u128, k: u128) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        // Exact at every step: result * (n - i) is divisible by (i + 1).
        result = result.saturating_mul(n - i) / (i + 1);
    }
    result
}

/// Streaming iterator over one generator's builds.
#[derive(Debug, Clone)]
pub struct BuildIter<'a> {
    generator: &'a BuildGenerator,
    /// Indices of the chosen groups, strictly increasing.
    chosen: Vec<usize>,
    /// Member index within each chosen group.
    members: Vec<usize>,
    remaining: usize,
    done: bool,
}

impl<'a> BuildIter<'a> {
    fn new(generator: &'a BuildGenerator) -> Self {
        let k = generator.open_slots;
        Self {
            generator,
            chosen: (0..k).collect(),
            members: vec![0; k],
            remaining: generator.len(),
            done: k > generator.groups.len(),
        }
    }

    fn current(&self) -> Build {
        let mut build = Vec::with_capacity(self.generator.build_size());
        build.extend(self.generator.forced.iter().cloned());
        build.extend(
            self.chosen
                .iter()
                .zip(&self.members)
                .map(|(&group, &member)| self.generator.groups[group][member].clone()),
        );
        build
    }

    /// Moves to the next build; returns false when the sequence is exhausted.
    fn advance(&mut self) -> bool {
        let groups = &self.generator.groups;
        for slot in (0..self.members.len()).rev() {
            self.members[slot] += 1;
            if self.members[slot] < groups[self.chosen[slot]].len() {
                return true;
            }
            self.members[slot] = 0;
        }

        let k = self.chosen.len();
        let n = groups.len();
        for slot in (0..k).rev() {
            if self.chosen[slot] < n - k + slot {
                self.chosen[slot] += 1;
                for next in slot + 1..k {
                    self.chosen[next] = self.chosen[next - 1] + 1;
                }
                return true;
            }
        }
        false
    }
}

impl Iterator for BuildIter<'_> {
    type Item = Build;

    fn next(&mut self) -> Option<Build> {
        if self.done {
            return None;
        }
        let build = self.current();
        self.done = !self.advance();
        self.remaining = self.remaining.saturating_sub(1);
        Some(build)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            (self.remaining, Some(self.remaining))
        }
    }
}

impl FusedIterator for BuildIter<'_> {}
