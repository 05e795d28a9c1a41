use rand::rngs::StdRng;
use rand::SeedableRng;

use super::equation::Equation;
use super::ConfigKey;
use crate::error::GameError;
use crate::settings::GenerationProfile;

/// Hands out equations for one config key, recycling the ones that leave
/// the conveyor instead of building new ones.
pub struct EquationPool {
    key: ConfigKey,
    profile: GenerationProfile,
    free: Vec<Equation>,
    allocations: usize,
    rng: StdRng,
}

impl EquationPool {
    pub fn new(key: ConfigKey, profile: GenerationProfile) -> Result<Self, GameError> {
        Self::with_rng(key, profile, StdRng::from_entropy())
    }

    pub fn with_rng(key: ConfigKey, profile: GenerationProfile, rng: StdRng) -> Result<Self, GameError> {
        profile.validate(key)?;
        Ok(Self {
            key,
            profile,
            free: Vec::new(),
            allocations: 0,
            rng,
        })
    }

    pub fn key(&self) -> ConfigKey {
        self.key
    }

    pub fn preallocate(&mut self, n: usize) {
        self.free.reserve(n);
        for _ in 0..n {
            self.free.push(Equation::blank());
            self.allocations += 1;
        }
    }

    pub fn obtain(&mut self) -> Equation {
        let mut eq = match self.free.pop() {
            Some(eq) => eq,
            None => {
                self.allocations += 1;
                log::debug!("pool for {} grew to {} equations", self.key, self.allocations);
                Equation::blank()
            }
        };
        eq.regenerate(&mut self.rng, &self.profile, self.key.parameter.operators());
        eq
    }

    pub fn release(&mut self, eq: Equation) {
        self.free.push(eq);
    }

    #[cfg(test)]
    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    /// Total equations ever built by this pool.
    #[cfg(test)]
    pub fn allocations(&self) -> usize {
        self.allocations
    }

    pub fn clear(&mut self) {
        self.free.clear();
    }
}
