use bevy::prelude::Resource;
use boilsim::prelude::{FrameReport, Simulation};

/// Bevy-side owner of the simulation context
#[derive(Resource)]
pub struct BoilingSimulation {
    pub inner: Simulation,
    pub paused: bool,
    pub last_report: Option<FrameReport>,
}

impl BoilingSimulation {
    pub fn new(inner: Simulation) -> Self {
        Self {
            inner,
            paused: false,
            last_report: None,
        }
    }

    /// Advance one tick unless paused
    pub fn step(&mut self) -> Option<FrameReport> {
        if self.paused {
            return None;
        }
        let report = self.inner.step();
        self.last_report = Some(report);
        Some(report)
    }

    pub fn replace(&mut self, inner: Simulation) {
        self.inner = inner;
        self.last_report = None;
    }
}

impl Default for BoilingSimulation {
    fn default() -> Self {
        Self::new(Simulation::new(boilsim::get_config()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boilsim::config::BoilSimConfig;

    fn resource() -> BoilingSimulation {
        BoilingSimulation::new(Simulation::with_seed(BoilSimConfig::default(), 11))
    }

    #[test]
    fn test_step_records_report() {
        let mut sim = resource();

        let report = sim.step().unwrap();

        assert_eq!(report.tick, 1);
        assert_eq!(sim.last_report, Some(report));
    }

    #[test]
    fn test_paused_does_not_advance() {
        let mut sim = resource();
        sim.paused = true;

        assert!(sim.step().is_none());
        assert_eq!(sim.inner.tick(), 0);
        assert!(sim.last_report.is_none());
    }

    #[test]
    fn test_replace_clears_last_report() {
        let mut sim = resource();
        sim.step();

        sim.replace(Simulation::with_seed(BoilSimConfig::default(), 12));

        assert!(sim.last_report.is_none());
        assert_eq!(sim.inner.seed(), 12);
    }
}
