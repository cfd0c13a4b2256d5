//! Multiverse controller
//!
//! Owns every universe of a level. Gates are applied across all universes;
//! once per frame `simplify` merges equivalent branches, prunes negligible
//! ones, and renormalizes so total probability is 1.

use serde::{Deserialize, Serialize};

use super::complex::Complex;
use super::error::{SimError, SimResult};
use super::gate::Gate;
use super::universe::Universe;
use crate::settings::{MergePolicy, Settings};

/// Owner of the universe list for one level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiverseController {
    settings: Settings,
    universes: Vec<Universe>,
    /// Simulated seconds since the level started
    pub time: f64,
    /// Frames stepped
    pub frame: u64,
}

impl MultiverseController {
    /// A level with one certain universe, every object at its spawn point
    pub fn new(settings: Settings) -> Self {
        let universes = vec![Universe::new(settings.object_count)];
        log::info!("Created multiverse with {} objects", settings.object_count);
        Self {
            settings,
            universes,
            time: 0.0,
            frame: 0,
        }
    }

    /// A level starting from an explicit universe list
    pub fn with_universes(settings: Settings, universes: Vec<Universe>) -> SimResult<Self> {
        let mut controller = Self {
            settings,
            universes: Vec::with_capacity(universes.len()),
            time: 0.0,
            frame: 0,
        };
        for u in universes {
            controller.push_universe(u)?;
        }
        Ok(controller)
    }

    /// Restore a controller from its JSON snapshot, validating every universe
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let controller: Self = serde_json::from_str(json)?;
        controller
            .validate()
            .map_err(<serde_json::Error as serde::de::Error>::custom)?;
        Ok(controller)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn object_count(&self) -> usize {
        self.settings.object_count
    }

    pub fn universes(&self) -> &[Universe] {
        &self.universes
    }

    pub fn len(&self) -> usize {
        self.universes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.universes.is_empty()
    }

    /// Sum of |amplitude|² over all universes
    pub fn total_probability(&self) -> f64 {
        self.universes.iter().map(Universe::probability).sum()
    }

    /// Add a universe; its object count must match the level's
    pub fn push_universe(&mut self, universe: Universe) -> SimResult<()> {
        self.check_shape(&universe)?;
        self.universes.push(universe);
        Ok(())
    }

    fn check_shape(&self, universe: &Universe) -> SimResult<()> {
        let expected = self.object_count();
        if universe.object_count() != expected {
            return Err(SimError::ShapeMismatch {
                expected,
                found: universe.object_count(),
            });
        }
        Ok(())
    }

    /// Check every universe against the level's object count
    pub fn validate(&self) -> SimResult<()> {
        self.universes.iter().try_for_each(|u| self.check_shape(u))
    }

    fn check_index(&self, index: usize) -> SimResult<()> {
        let count = self.object_count();
        if index >= count {
            return Err(SimError::ObjectOutOfRange { index, count });
        }
        Ok(())
    }

    /// Apply a gate, looked up by name, to every universe whose controls are all on
    pub fn apply_gate_named(
        &mut self,
        gate: &str,
        target: usize,
        controls: &[usize],
    ) -> SimResult<()> {
        let gate: Gate = gate.parse()?;
        self.apply_gate(gate, target, controls)
    }

    /// Apply a gate to every universe whose controls are all on.
    ///
    /// Never merges, prunes or renormalizes; that is left to [`simplify`](Self::simplify).
    pub fn apply_gate(&mut self, gate: Gate, target: usize, controls: &[usize]) -> SimResult<()> {
        self.check_index(target)?;
        controls.iter().try_for_each(|&c| self.check_index(c))?;

        let before = self.universes.len();
        let universes = std::mem::take(&mut self.universes);
        self.universes = universes
            .into_iter()
            .flat_map(|u| {
                if u.controls_on(controls) {
                    gate.apply(u, target)
                } else {
                    std::iter::once(u).chain(None)
                }
            })
            .collect();

        if gate.branches() {
            log::debug!(
                "Applied {gate} to object {target} (controls {controls:?}): \
                 {before} -> {} universes",
                self.universes.len()
            );
        } else {
            log::trace!("Applied {gate} to object {target} (controls {controls:?})");
        }
        Ok(())
    }

    /// Merge equivalent universes, prune negligible ones, renormalize.
    ///
    /// Fails with [`SimError::EmptyMultiverse`] when nothing survives pruning;
    /// the universe list is left empty in that case.
    pub fn simplify(&mut self) -> SimResult<()> {
        let before = self.universes.len();
        let policy = self.settings.merge;

        let mut merged: Vec<Universe> = Vec::with_capacity(before);
        for u in std::mem::take(&mut self.universes) {
            match merged.iter_mut().find(|rep| equivalent(rep, &u, &policy)) {
                Some(rep) => rep.amplitude = rep.amplitude + u.amplitude,
                None => merged.push(u),
            }
        }
        let after_merge = merged.len();

        let threshold = self.settings.prune_threshold;
        merged.retain(|u| u.probability() > threshold);

        log::trace!(
            "Simplify: {before} universes, {after_merge} after merge, {} after prune",
            merged.len()
        );

        if merged.is_empty() {
            log::error!("All {before} universes pruned; multiverse is empty");
            return Err(SimError::EmptyMultiverse);
        }

        let sum: f64 = merged.iter().map(Universe::probability).sum();
        let norm = Complex::real(sum.sqrt());
        for u in &mut merged {
            u.amplitude = u.amplitude.try_div(norm)?;
        }
        self.universes = merged;
        Ok(())
    }

    /// Mutable access for the frame step
    pub(crate) fn universes_mut(&mut self) -> &mut [Universe] {
        &mut self.universes
    }
}

/// Two universes are the same branch when every object's on/off flag agrees,
/// and, if the policy asks for it, continuous state is within tolerance
pub fn equivalent(a: &Universe, b: &Universe, policy: &MergePolicy) -> bool {
    a.objects.iter().zip(&b.objects).all(|(s1, s2)| {
        s1.on_off == s2.on_off
            && (!policy.compare_continuous
                || s1.continuous_close(s2, policy.position_tolerance, policy.velocity_tolerance))
    })
}
