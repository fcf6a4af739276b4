//! Birth/Survival rule notation.
//!
//! Rules are written `B<set>/S<set>`: the birth set lists the neighbor counts
//! that bring a dead cell to life, the survival set the counts that keep a
//! live cell alive. `B3/S23` is Conway's Life, `B2/S` is Seeds.
//!
//! In the canonical notation each threshold is one decimal digit, so counts
//! of 10 or more cannot be written that way. Larger kernels use the extended
//! form, a comma-separated list per half: `B3,10,11/S2,3`. A half containing
//! a comma is read in the extended form; a single trailing comma is allowed,
//! which is how a lone large threshold is written (`B12,/S23`). Thresholds
//! may not repeat within a half in either form.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{AutomatonError, Result};
use crate::kernel::Kernel;

/// Bounds a rule is validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleLimits {
    /// Largest neighbor count the active kernel can produce.
    pub max_neighbor_count: u16,
    /// Whether `B/S` (nothing is ever born, nothing survives) is accepted.
    pub allow_empty: bool,
}

impl RuleLimits {
    pub fn for_kernel(kernel: &Kernel) -> Self {
        Self {
            max_neighbor_count: kernel.max_neighbor_count(),
            allow_empty: true,
        }
    }
}

impl Default for RuleLimits {
    fn default() -> Self {
        Self::for_kernel(&Kernel::default())
    }
}

/// Parsed birth and survival sets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuleSpec {
    birth: BTreeSet<u16>,
    survival: BTreeSet<u16>,
}

impl RuleSpec {
    /// Builds a rule directly from threshold sets. No range validation; use
    /// [`RuleSpec::check_range`] before running it against a kernel.
    pub fn new(
        birth: impl IntoIterator<Item = u16>,
        survival: impl IntoIterator<Item = u16>,
    ) -> Self {
        Self {
            birth: birth.into_iter().collect(),
            survival: survival.into_iter().collect(),
        }
    }

    /// Parses `rule` and validates it against `limits`.
    pub fn parse(rule: &str, limits: &RuleLimits) -> Result<Self> {
        let mut halves = rule.trim().split('/');
        let (birth_half, survival_half) = match (halves.next(), halves.next(), halves.next()) {
            (Some(birth), Some(survival), None) => (birth, survival),
            _ => {
                return Err(AutomatonError::rule_format(
                    rule,
                    "expected exactly one '/' between the B and S halves",
                ));
            }
        };

        let spec = Self {
            birth: parse_half(rule, birth_half, 'B')?,
            survival: parse_half(rule, survival_half, 'S')?,
        };

        spec.check_range(rule, limits.max_neighbor_count)?;
        if !limits.allow_empty && spec.is_empty() {
            return Err(AutomatonError::EmptyRule {
                rule: rule.to_string(),
            });
        }
        Ok(spec)
    }

    /// Parses `rule` against the neighbor range of `kernel`. Empty rules are
    /// accepted.
    pub fn parse_for(rule: &str, kernel: &Kernel) -> Result<Self> {
        Self::parse(rule, &RuleLimits::for_kernel(kernel))
    }

    /// Fails with [`AutomatonError::RuleOutOfRange`] if any threshold is
    /// above `max`. `rule` is only used for the error message.
    pub fn check_range(&self, rule: &str, max: u16) -> Result<()> {
        match self.max_threshold() {
            Some(count) if count > max => Err(AutomatonError::RuleOutOfRange {
                rule: rule.to_string(),
                count,
                max,
            }),
            _ => Ok(()),
        }
    }

    pub fn birth(&self) -> &BTreeSet<u16> {
        &self.birth
    }

    pub fn survival(&self) -> &BTreeSet<u16> {
        &self.survival
    }

    pub fn is_birth(&self, count: u16) -> bool {
        self.birth.contains(&count)
    }

    pub fn is_survival(&self, count: u16) -> bool {
        self.survival.contains(&count)
    }

    /// True when both sets are empty.
    pub fn is_empty(&self) -> bool {
        self.birth.is_empty() && self.survival.is_empty()
    }

    /// Largest threshold in either set.
    pub fn max_threshold(&self) -> Option<u16> {
        self.birth.iter().chain(&self.survival).copied().max()
    }

    /// Dense lookup tables `(birth, survival)` indexed by neighbor count,
    /// covering `0..=max`.
    pub(crate) fn lookup(&self, max: u16) -> (Vec<bool>, Vec<bool>) {
        let table =
            |set: &BTreeSet<u16>| -> Vec<bool> { (0..=max).map(|n| set.contains(&n)).collect() };
        (table(&self.birth), table(&self.survival))
    }
}

fn parse_half(rule: &str, half: &str, prefix: char) -> Result<BTreeSet<u16>> {
    let mut chars = half.chars();
    match chars.next() {
        Some(c) if c.eq_ignore_ascii_case(&prefix) => {}
        _ => {
            return Err(AutomatonError::rule_format(
                rule,
                format!("expected '{prefix}' at the start of {half:?}"),
            ));
        }
    }
    let body = chars.as_str();

    let mut set = BTreeSet::new();
    let mut insert = |count: u16| {
        if set.insert(count) {
            Ok(())
        } else {
            Err(AutomatonError::rule_format(
                rule,
                format!("threshold {count} repeated in the {prefix} half"),
            ))
        }
    };

    if body.contains(',') {
        let list = body.trim_end().strip_suffix(',').unwrap_or(body);
        for item in list.split(',').map(str::trim) {
            if item.is_empty() || !item.bytes().all(|b| b.is_ascii_digit()) {
                return Err(AutomatonError::rule_format(
                    rule,
                    format!("{item:?} is not a neighbor count"),
                ));
            }
            let count = item.parse::<u16>().map_err(|_| {
                AutomatonError::rule_format(rule, format!("threshold {item} is too large"))
            })?;
            insert(count)?;
        }
    } else {
        for c in body.chars() {
            let digit = c.to_digit(10).ok_or_else(|| {
                AutomatonError::rule_format(rule, format!("{c:?} is not a digit"))
            })?;
            insert(digit as u16)?;
        }
    }

    Ok(set)
}

fn write_set(f: &mut fmt::Formatter<'_>, set: &BTreeSet<u16>) -> fmt::Result {
    if set.iter().all(|&n| n <= 9) {
        for n in set {
            write!(f, "{n}")?;
        }
    } else {
        let items: Vec<String> = set.iter().map(u16::to_string).collect();
        write!(f, "{}", items.join(","))?;
        if items.len() == 1 {
            f.write_str(",")?;
        }
    }
    Ok(())
}

impl fmt::Display for RuleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("B")?;
        write_set(f, &self.birth)?;
        f.write_str("/S")?;
        write_set(f, &self.survival)
    }
}

impl FromStr for RuleSpec {
    type Err = AutomatonError;

    /// Parses against the 3×3 Moore range (thresholds 0..=8).
    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s, &RuleLimits::default())
    }
}

/// Well-known rules for the 3×3 Moore neighborhood.
pub mod presets {
    /// Conway's Game of Life.
    pub const LIFE: &str = "B3/S23";
    /// HighLife, which has a self-replicating pattern.
    pub const HIGH_LIFE: &str = "B36/S23";
    /// Seeds: every live cell dies each generation.
    pub const SEEDS: &str = "B2/S";
    /// Day & Night, symmetric under inversion.
    pub const DAY_AND_NIGHT: &str = "B3678/S34678";
    /// Amoeba-like growth.
    pub const DIAMOEBA: &str = "B35678/S5678";
    /// Maze-like corridors.
    pub const MAZE: &str = "B3/S12345";
    /// Every pattern eventually replicates.
    pub const REPLICATOR: &str = "B1357/S1357";
    /// Irregular, slowly decaying growth.
    pub const B368_S245: &str = "B368/S245";

    /// `(name, rule)` pairs in display order.
    pub const ALL: &[(&str, &str)] = &[
        ("Life", LIFE),
        ("HighLife", HIGH_LIFE),
        ("Seeds", SEEDS),
        ("Day & Night", DAY_AND_NIGHT),
        ("Diamoeba", DIAMOEBA),
        ("Maze", MAZE),
        ("Replicator", REPLICATOR),
        ("B368/S245", B368_S245),
    ];
}
