use std::collections::BTreeMap;

use serde::Serialize;

use super::model::Table;
use super::passenger::{passengers, AgeGroup, PassengerClass, FEMALE, MALE};
use crate::error::AggregationError;

// ---------------------------------------------------------------------------
// Guarded rates
// ---------------------------------------------------------------------------

/// `survivors / total * 100`, or `0.0` for an empty partition.
///
/// An empty partition has no defined rate; reporting 0% keeps every chart
/// and summary line numeric instead of carrying NaN through.
pub fn survival_rate(survivors: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        survivors as f64 / total as f64 * 100.0
    }
}

/// Survivor and passenger counts of one partition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GroupStats {
    pub survivors: usize,
    pub total: usize,
}

impl GroupStats {
    fn record(&mut self, survived: bool) {
        self.total += 1;
        self.survivors += usize::from(survived);
    }

    pub fn rate(&self) -> f64 {
        survival_rate(self.survivors, self.total)
    }
}

// ---------------------------------------------------------------------------
// Survival by sex
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurvivalBySex {
    /// One entry per sex value present in the table, sorted by name.
    pub groups: BTreeMap<String, GroupStats>,
}

impl SurvivalBySex {
    /// sex → survival rate in percent.
    pub fn rates(&self) -> BTreeMap<String, f64> {
        self.groups
            .iter()
            .map(|(sex, stats)| (sex.clone(), stats.rate()))
            .collect()
    }
}

/// Partition passengers by sex and compute each partition's survival rate.
pub fn survival_by_sex(table: &Table) -> Result<SurvivalBySex, AggregationError> {
    let mut groups: BTreeMap<String, GroupStats> = BTreeMap::new();
    for p in passengers(table)? {
        groups.entry(p.sex).or_default().record(p.survived);
    }
    log::debug!("survival by sex: {groups:?}");
    Ok(SurvivalBySex { groups })
}

// ---------------------------------------------------------------------------
// Survivors by age group and sex
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurvivorsByAgeAndSex {
    /// sex → survivor count per age group, in [`AgeGroup::ALL`] order.
    /// Always contains `"male"` and `"female"`.
    pub counts: BTreeMap<String, [usize; 5]>,
}

impl SurvivorsByAgeAndSex {
    /// Counts for one sex; all zeros if the sex does not occur.
    pub fn counts_for(&self, sex: &str) -> [usize; 5] {
        self.counts.get(sex).copied().unwrap_or_default()
    }
}

/// Count survivors per (sex, age group). Passengers without a usable age
/// are left out.
pub fn survivors_by_age_and_sex(table: &Table) -> Result<SurvivorsByAgeAndSex, AggregationError> {
    let mut counts: BTreeMap<String, [usize; 5]> = [MALE, FEMALE]
        .into_iter()
        .map(|sex| (sex.to_string(), [0; 5]))
        .collect();

    for p in passengers(table)? {
        let Some(group) = p.age_group() else {
            continue;
        };
        if p.survived {
            counts.entry(p.sex).or_default()[group.index()] += 1;
        }
    }
    log::debug!("survivors by age group and sex: {counts:?}");
    Ok(SurvivorsByAgeAndSex { counts })
}

// ---------------------------------------------------------------------------
// Survival by class
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurvivalByClass {
    /// All three classes, including empty ones.
    pub classes: BTreeMap<PassengerClass, GroupStats>,
    /// Every passenger, with or without a class.
    pub overall: GroupStats,
}

impl SurvivalByClass {
    pub fn class(&self, class: PassengerClass) -> GroupStats {
        self.classes.get(&class).copied().unwrap_or_default()
    }

    /// Survival rate over the whole table, drawn as the reference line.
    pub fn overall_rate(&self) -> f64 {
        self.overall.rate()
    }

    /// Highest per-class rate, `0.0` if every class is empty.
    pub fn max_rate(&self) -> f64 {
        self.classes
            .values()
            .map(GroupStats::rate)
            .fold(0.0, f64::max)
    }
}

/// Partition passengers by class and compute `(rate, survivors, total)` per
/// class, plus the overall rate.
pub fn survival_by_class(table: &Table) -> Result<SurvivalByClass, AggregationError> {
    let mut classes: BTreeMap<PassengerClass, GroupStats> = PassengerClass::ALL
        .into_iter()
        .map(|c| (c, GroupStats::default()))
        .collect();
    let mut overall = GroupStats::default();

    for p in passengers(table)? {
        overall.record(p.survived);
        if let Some(class) = p.pclass {
            classes.entry(class).or_default().record(p.survived);
        }
    }
    log::debug!("survival by class: {classes:?}, overall {overall:?}");
    Ok(SurvivalByClass { classes, overall })
}
