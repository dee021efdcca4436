//! Simulation driver.
//!
//! Each time step the real state is advanced, a noisy measurement of it is synthesised and the
//! filter is cycled through predict and update with that measurement. The real, measured and
//! estimated value of every state component is appended to an [`OutputTable`].
//!
//! A run either completes every step or fails as a whole; the first error aborts it.

use std::sync::atomic::{AtomicBool, Ordering};

use rand::rngs::StdRng;
use rand_core::RngCore;
use serde::Serialize;

use crate::error::{EstimateError, Result};
use crate::estimators::covariance::KalmanFilter;
use crate::linalg::{Matrix, Vector};
use crate::noise::NoiseGenerator;
use crate::parameters::ModelParameters;
use crate::process::{advance_real, observe_real};

/// The three values recorded for each state component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Real,
    Measured,
    Estimated,
}

/// Real, measured and estimated value of one state component at one step.
///
/// `measured` is NaN for a component no observation channel measures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub real: f64,
    pub measured: f64,
    pub estimated: f64,
}

impl Sample {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Real => self.real,
            Category::Measured => self.measured,
            Category::Estimated => self.estimated,
        }
    }

    /// Estimation error, estimated - real.
    pub fn error(&self) -> f64 {
        self.estimated - self.real
    }
}

/// One time step of the output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub step: usize,
    /// One sample per state component, in state vector order
    pub samples: Vec<Sample>,
}

impl Row {
    fn new(step: usize, real: &Vector, measured: &Vector, estimated: &Vector, channels: &[Option<usize>]) -> Row {
        let samples = real
            .iter()
            .zip(estimated.iter())
            .zip(channels)
            .map(|((&real, &estimated), &channel)| Sample {
                real,
                measured: channel.and_then(|k| measured.get(k).copied()).unwrap_or(f64::NAN),
                estimated,
            })
            .collect();
        Row { step, samples }
    }
}

/// The observation channel that measures state component `quantity`.
///
/// That is a row of `observation` selecting exactly that component. An all zero row at the
/// component's own index is an absent sensor and still reports its channel. Otherwise the
/// component is not measured.
fn measured_channel(observation: &Matrix, quantity: usize) -> Option<usize> {
    let selects = observation.row_iter().position(|r| {
        r.iter()
            .enumerate()
            .all(|(j, &h)| h == if j == quantity { 1. } else { 0. })
    });
    selects.or_else(|| {
        let absent = quantity < observation.nrows() && observation.row(quantity).iter().all(|&h| h == 0.);
        absent.then_some(quantity)
    })
}

/// Chronological table of simulation output, one row per time step.
///
/// Rows are only ever appended, the table is handed off whole when a run completes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OutputTable {
    rows: Vec<Row>,
}

impl OutputTable {
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of state components recorded per row.
    pub fn quantities(&self) -> usize {
        self.rows.first().map_or(0, |r| r.samples.len())
    }

    /// One curve: the value of `category` for state component `quantity` at every step.
    pub fn series(&self, quantity: usize, category: Category) -> Vec<f64> {
        self.rows
            .iter()
            .map(|r| r.samples.get(quantity).map_or(f64::NAN, |s| s.get(category)))
            .collect()
    }

    /// The step indices as a plot axis.
    pub fn time_axis(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.step as f64).collect()
    }

    /// A row flattened as real, measured, estimated for each component in turn.
    ///
    /// For the reference configuration: x_real, x_measured, x_estimate, v_real, v_measured, v_estimate.
    pub fn flat_row(&self, step: usize) -> Option<Vec<f64>> {
        self.rows.get(step).map(|r| {
            r.samples
                .iter()
                .flat_map(|s| [s.real, s.measured, s.estimated])
                .collect()
        })
    }

    fn push(&mut self, row: Row) {
        self.rows.push(row);
    }
}

impl FromIterator<Row> for OutputTable {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        OutputTable {
            rows: iter.into_iter().collect(),
        }
    }
}

/// A simulation run.
///
/// Exclusively owns its parameters and noise source, so independent runs can be executed in
/// parallel without coordination.
pub struct Simulation<R: RngCore> {
    params: ModelParameters,
    noise: NoiseGenerator<R>,
}

impl Simulation<StdRng> {
    /// A reproducible run, identical seeds give identical tables.
    pub fn seeded(params: ModelParameters, seed: u64) -> Result<Self> {
        Simulation::new(params, NoiseGenerator::seeded(seed))
    }

    pub fn from_entropy(params: ModelParameters) -> Result<Self> {
        Simulation::new(params, NoiseGenerator::from_entropy())
    }
}

impl<R: RngCore> Simulation<R> {
    /// Fails with [`EstimateError::ShapeMismatch`] or [`EstimateError::InvalidStdDev`] if the
    /// parameters are inconsistent.
    pub fn new(params: ModelParameters, noise: NoiseGenerator<R>) -> Result<Self> {
        params.validate()?;
        Ok(Simulation { params, noise })
    }

    pub fn params(&self) -> &ModelParameters {
        &self.params
    }

    /// Step by step execution, one [`Row`] per time step.
    pub fn steps(self) -> Result<SimulationSteps<R>> {
        let filter = KalmanFilter::new(&self.params)?;
        let channels = (0..self.params.dim())
            .map(|i| measured_channel(&self.params.observation, i))
            .collect();
        Ok(SimulationSteps {
            channels,
            real: self.params.initial_real.clone(),
            u: self.params.control_input(),
            params: self.params,
            noise: self.noise,
            filter,
            step: 0,
            failed: false,
        })
    }

    /// Runs every time step and returns the complete table.
    pub fn run(self) -> Result<OutputTable> {
        drive(self.steps()?, || false)
    }

    /// As [`run`](Simulation::run), but `cancel` is checked between steps. Once it is set the
    /// run fails with [`EstimateError::Cancelled`].
    pub fn run_cancellable(self, cancel: &AtomicBool) -> Result<OutputTable> {
        drive(self.steps()?, || cancel.load(Ordering::Relaxed))
    }
}

fn drive<R: RngCore>(mut steps: SimulationSteps<R>, cancelled: impl Fn() -> bool) -> Result<OutputTable> {
    let total = steps.params.steps;
    log::info!(
        "simulating {} steps, state dim {} observation dim {}",
        total,
        steps.params.dim(),
        steps.params.observe_dim()
    );

    let mut table = OutputTable::default();
    loop {
        if table.len() < total && cancelled() {
            log::warn!("simulation cancelled at step {} of {}", table.len(), total);
            return Err(EstimateError::Cancelled { completed: table.len() });
        }
        match steps.next() {
            Some(Ok(row)) => table.push(row),
            Some(Err(e)) => {
                log::warn!("simulation aborted at step {} of {}: {}", table.len(), total, e);
                return Err(e);
            }
            None => break,
        }
    }

    log::info!("simulation complete, {} rows", table.len());
    Ok(table)
}

/// Runs `params` with a seeded noise source.
pub fn run(params: ModelParameters, seed: u64) -> Result<OutputTable> {
    Simulation::seeded(params, seed)?.run()
}

/// Iterator over the time steps of a [`Simulation`].
///
/// Yields nothing further after the first error.
pub struct SimulationSteps<R: RngCore> {
    params: ModelParameters,
    noise: NoiseGenerator<R>,
    filter: KalmanFilter,
    real: Vector,
    u: Vector,
    /// Observation channel of each state component
    channels: Vec<Option<usize>>,
    step: usize,
    failed: bool,
}

impl<R: RngCore> SimulationSteps<R> {
    /// Number of steps produced so far.
    pub fn completed(&self) -> usize {
        self.step
    }

    /// The filter as of the last completed step.
    pub fn filter(&self) -> &KalmanFilter {
        &self.filter
    }

    fn advance(&mut self) -> Result<Row> {
        let p = &self.params;
        let real = advance_real(
            &self.real,
            &p.state_transition,
            &p.control,
            &self.u,
            &p.real_process_noise,
            &mut self.noise,
        )?;
        let measured = observe_real(&real, &p.observation, &p.real_measurement_noise, &mut self.noise)?;

        self.filter.predict()?;
        let estimated = self.filter.update(&measured)?;

        let row = Row::new(self.step, &real, &measured, &estimated, &self.channels);
        log::trace!(
            "step {} real={:?} measured={:?} estimated={:?}",
            self.step,
            real.as_slice(),
            measured.as_slice(),
            estimated.as_slice()
        );

        self.real = real;
        self.step += 1;
        Ok(row)
    }
}

impl<R: RngCore> Iterator for SimulationSteps<R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.step >= self.params.steps {
            return None;
        }
        let row = self.advance();
        self.failed = row.is_err();
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.failed {
            0
        } else {
            self.params.steps - self.step
        };
        (0, Some(remaining))
    }
}
