//! Tick driver: turns one external frame into a batch of simulation steps
//!
//! The driver owns a [`Simulation`] and is meant to be called from whatever
//! frame loop the host has. Each [`Driver::tick`] splits the scaled frame
//! time into `substeps` equal steps. Pausing and stopping only change what
//! a tick does; there is no clock or scheduling here.

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::integrator::{Integrator, SemiImplicitEuler};
use crate::simulation::Simulation;

/// Per-tick stepping configuration
///
/// # Examples
///
/// ```
/// use fieldsim::driver::DriverConfig;
///
/// let config: DriverConfig = serde_json::from_str(r#"{ "substeps": 4 }"#).unwrap();
/// assert_eq!(config.substeps, 4);
/// assert_eq!(config.speed, 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DriverConfig {
    /// Number of `step` calls per tick
    pub substeps: u32,
    /// Multiplier applied to the frame time before it is split
    pub speed: f64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            substeps: 1,
            speed: 1.0,
        }
    }
}

impl DriverConfig {
    pub fn validate(&self) -> Result<()> {
        if self.substeps == 0 {
            return Err(SimError::InvalidConfig(
                "substeps must be at least 1".to_string(),
            ));
        }
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "speed must be finite and non-negative, got {}",
                self.speed
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Running,
    Paused,
    /// Terminal: a stopped driver never steps again
    Stopped,
}

/// Runs a simulation at a configured sub-step count and speed
///
/// # Examples
///
/// ```
/// use fieldsim::driver::{Driver, DriverConfig};
/// use fieldsim::simulation::Simulation;
///
/// let config = DriverConfig { substeps: 4, speed: 2.0 };
/// let mut driver = Driver::new(Simulation::new(), config).unwrap();
///
/// assert_eq!(driver.tick(0.5), 4);
/// assert_eq!(driver.simulation().time(), 1.0);
///
/// driver.pause();
/// assert_eq!(driver.tick(0.5), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Driver<I: Integrator = SemiImplicitEuler> {
    simulation: Simulation<I>,
    config: DriverConfig,
    status: RunStatus,
    ticks: u64,
}

impl<I: Integrator> Driver<I> {
    /// Creates a running driver; fails if the config is invalid
    pub fn new(simulation: Simulation<I>, config: DriverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            simulation,
            config,
            status: RunStatus::Running,
            ticks: 0,
        })
    }

    /// Advances the simulation by one external frame of `frame_dt` seconds
    ///
    /// # Returns
    ///
    /// The number of steps taken: `substeps` while running, zero while
    /// paused or stopped, or when `frame_dt` is negative or not finite.
    pub fn tick(&mut self, frame_dt: f64) -> u32 {
        if self.status != RunStatus::Running {
            return 0;
        }
        if !frame_dt.is_finite() || frame_dt < 0.0 {
            warn!("ignoring tick with invalid frame time {frame_dt}");
            return 0;
        }

        let substeps = self.config.substeps;
        let dt = frame_dt * self.config.speed / f64::from(substeps);
        for _ in 0..substeps {
            self.simulation.step(dt);
        }

        self.ticks += 1;
        trace!("tick {}: {substeps} steps of {dt}", self.ticks);
        substeps
    }

    pub fn pause(&mut self) {
        if self.status == RunStatus::Running {
            debug!("driver paused at tick {}", self.ticks);
            self.status = RunStatus::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.status == RunStatus::Paused {
            debug!("driver resumed at tick {}", self.ticks);
            self.status = RunStatus::Running;
        }
    }

    pub fn stop(&mut self) {
        debug!("driver stopped after {} ticks", self.ticks);
        self.status = RunStatus::Stopped;
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// Number of ticks that actually stepped the simulation
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn config(&self) -> DriverConfig {
        self.config
    }

    /// Replaces the config; the old one stays if the new one is invalid
    pub fn set_config(&mut self, config: DriverConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn simulation(&self) -> &Simulation<I> {
        &self.simulation
    }

    pub fn simulation_mut(&mut self) -> &mut Simulation<I> {
        &mut self.simulation
    }

    pub fn into_simulation(self) -> Simulation<I> {
        self.simulation
    }
}
