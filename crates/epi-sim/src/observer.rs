//! Simulation observer trait for progress reporting and data collection.

use epi_core::Tick;

use crate::ModelView;

/// Callbacks invoked by [`CityModel::run`][crate::CityModel::run] and
/// [`CityModel::run_steps`][crate::CityModel::run_steps] at step boundaries.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { pathogen: PathogenId }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_step_end(&mut self, tick: Tick, view: &ModelView<'_>) {
///         let c = view.compartment_counts(self.pathogen);
///         println!("{tick}: {} infectious", c.infectious);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before the update that will produce `tick`.
    fn on_step_start(&mut self, _tick: Tick) {}

    /// Called after every update.  `tick` is the tick just completed.
    fn on_step_end(&mut self, _tick: Tick, _view: &ModelView<'_>) {}

    /// Called every `config.output_interval_steps` steps, after
    /// `on_step_end`.
    fn on_snapshot(&mut self, _tick: Tick, _view: &ModelView<'_>) {}

    /// Called once when [`run`][crate::CityModel::run] reaches the end tick.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
