//! Builder utilities for configuring parameter sweeps.
//!
//! Exposes the execution strategy selection surface and the validation
//! performed before a [`SweepConfig`] can run.

use tracing::instrument;

use crate::{
    change::{ChangePolicy, ChangeTracker},
    error::SweepError,
    graph::ParametricGraph,
    sweep::{ParameterRange, Parameters, SweepReport, Sweeper},
    weight::WeightFunction,
};

/// Indicates how a [`SweepConfig`] schedules the per-sample MST builds.
///
/// `Sequential` builds trees one after another on the calling thread.
/// `Parallel` distributes builds over the rayon pool and is only available
/// when the `parallel` feature is enabled; both produce identical reports.
///
/// # Examples
/// ```
/// use driftree_core::ExecutionStrategy;
///
/// let strategy = ExecutionStrategy::default();
/// assert_eq!(strategy, ExecutionStrategy::Sequential);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ExecutionStrategy {
    /// Build each sample's tree in turn on the calling thread.
    #[default]
    Sequential,
    /// Build trees concurrently, then compare them in parameter order.
    Parallel,
}

#[derive(Debug, Clone, PartialEq)]
enum ParameterSpec {
    Range { start: f64, end: f64, step: f64 },
    Explicit(Vec<f64>),
}

/// Configures and validates [`SweepConfig`] instances.
///
/// # Examples
/// ```
/// use driftree_core::{ChangePolicy, ExecutionStrategy, SweepBuilder};
///
/// let config = SweepBuilder::new()
///     .with_range(0.0, 10.0, 2.5)
///     .with_change_policy(ChangePolicy::EdgeId)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(config.parameters().len(), 5);
/// assert_eq!(config.change_policy(), ChangePolicy::EdgeId);
/// assert_eq!(config.execution_strategy(), ExecutionStrategy::Sequential);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SweepBuilder {
    parameters: ParameterSpec,
    change_policy: ChangePolicy,
    execution_strategy: ExecutionStrategy,
}

impl Default for SweepBuilder {
    fn default() -> Self {
        let range = ParameterRange::default();
        Self {
            parameters: ParameterSpec::Range {
                start: range.start(),
                end: range.end(),
                step: range.step(),
            },
            change_policy: ChangePolicy::default(),
            execution_strategy: ExecutionStrategy::default(),
        }
    }
}

impl SweepBuilder {
    /// Creates a builder sweeping `0..=100` in steps of `5`.
    ///
    /// # Examples
    /// ```
    /// use driftree_core::SweepBuilder;
    ///
    /// let config = SweepBuilder::new().build().expect("defaults are valid");
    /// assert_eq!(config.parameters().len(), 21);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sweeps the inclusive range `start..=end` in increments of `step`.
    ///
    /// Replaces any previously configured parameters. Validation is deferred
    /// to [`SweepBuilder::build`].
    #[must_use]
    pub fn with_range(mut self, start: f64, end: f64, step: f64) -> Self {
        self.parameters = ParameterSpec::Range { start, end, step };
        self
    }

    /// Sweeps exactly `values`, in the given order.
    ///
    /// # Examples
    /// ```
    /// use driftree_core::SweepBuilder;
    ///
    /// let config = SweepBuilder::new()
    ///     .with_parameters(vec![3.0, 1.0])
    ///     .build()
    ///     .expect("values are finite");
    /// assert_eq!(config.parameters().to_vec(), [3.0, 1.0]);
    /// ```
    #[must_use]
    pub fn with_parameters(mut self, values: Vec<f64>) -> Self {
        self.parameters = ParameterSpec::Explicit(values);
        self
    }

    /// Selects how consecutive trees are compared.
    #[must_use]
    pub fn with_change_policy(mut self, policy: ChangePolicy) -> Self {
        self.change_policy = policy;
        self
    }

    /// Returns the configured change policy.
    #[must_use]
    pub fn change_policy(&self) -> ChangePolicy {
        self.change_policy
    }

    /// Sets the execution strategy used when running the sweep.
    #[must_use]
    pub fn with_execution_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.execution_strategy = strategy;
        self
    }

    /// Returns the currently configured execution strategy.
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Validates the configuration and constructs a [`SweepConfig`].
    ///
    /// # Errors
    /// Returns [`SweepError::NonFiniteParameter`], [`SweepError::InvalidStep`]
    /// or [`SweepError::InvalidRange`] for an invalid parameter domain, and
    /// [`SweepError::BackendUnavailable`] when [`ExecutionStrategy::Parallel`]
    /// is requested from a build without the `parallel` feature.
    pub fn build(self) -> Result<SweepConfig, SweepError> {
        let parameters = match self.parameters {
            ParameterSpec::Range { start, end, step } => {
                Parameters::Range(ParameterRange::new(start, end, step)?)
            }
            ParameterSpec::Explicit(values) => Parameters::explicit(values)?,
        };

        if self.execution_strategy == ExecutionStrategy::Parallel && !cfg!(feature = "parallel") {
            return Err(SweepError::BackendUnavailable {
                requested: self.execution_strategy,
            });
        }

        Ok(SweepConfig {
            parameters,
            change_policy: self.change_policy,
            execution_strategy: self.execution_strategy,
        })
    }
}

/// A validated sweep configuration, ready to run against any graph.
///
/// # Examples
/// ```
/// use driftree_core::{ParametricGraph, Sinusoidal, SweepBuilder};
///
/// let graph = ParametricGraph::from_records([
///     (1, 2, 1.0, 0.0),
///     (2, 3, 1.0, 0.0),
///     (1, 3, 5.0, -5.0),
/// ])
/// .expect("records are valid");
/// let config = SweepBuilder::new()
///     .with_parameters(vec![0.0, std::f64::consts::FRAC_PI_2])
///     .build()
///     .expect("configuration is valid");
/// let report = config.run(&graph, &Sinusoidal).expect("sweep succeeds");
/// assert_eq!(report.total_instability(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    parameters: Parameters,
    change_policy: ChangePolicy,
    execution_strategy: ExecutionStrategy,
}

impl SweepConfig {
    /// Returns the validated parameter values.
    #[must_use]
    #[rustfmt::skip]
    pub fn parameters(&self) -> &Parameters { &self.parameters }

    /// Returns the change policy.
    #[must_use]
    #[rustfmt::skip]
    pub fn change_policy(&self) -> ChangePolicy { self.change_policy }

    /// Returns the execution strategy.
    #[must_use]
    #[rustfmt::skip]
    pub fn execution_strategy(&self) -> ExecutionStrategy { self.execution_strategy }

    /// Returns a [`Sweeper`] over `graph` configured with this change policy.
    #[must_use]
    pub fn sweeper<'g, W: WeightFunction>(
        &self,
        graph: &'g ParametricGraph,
        weight: &'g W,
    ) -> Sweeper<'g, W> {
        Sweeper::new(graph, weight, ChangeTracker::new(self.change_policy))
    }

    /// Runs the sweep against `graph`, dispatching on the execution strategy.
    ///
    /// # Errors
    /// Returns [`SweepError::Sample`] when an MST build fails and
    /// [`SweepError::BackendUnavailable`] if the strategy cannot be honoured.
    #[instrument(
        name = "core.run",
        err,
        skip(self, graph, weight),
        fields(
            strategy = ?self.execution_strategy,
            edges = graph.len(),
            nodes = graph.node_count(),
        ),
    )]
    pub fn run<W: WeightFunction>(
        &self,
        graph: &ParametricGraph,
        weight: &W,
    ) -> Result<SweepReport, SweepError> {
        let sweeper = self.sweeper(graph, weight);
        match self.execution_strategy {
            ExecutionStrategy::Sequential => sweeper.collect_report(&self.parameters),
            #[cfg(feature = "parallel")]
            ExecutionStrategy::Parallel => sweeper.sweep_parallel(&self.parameters),
            #[cfg(not(feature = "parallel"))]
            ExecutionStrategy::Parallel => Err(SweepError::BackendUnavailable {
                requested: ExecutionStrategy::Parallel,
            }),
        }
    }
}
