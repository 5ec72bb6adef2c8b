//! Parameter sweeps over a [`ParametricGraph`].
//!
//! A [`Sweeper`] pairs an [`MstBuilder`] with a [`ChangeTracker`]. For every
//! parameter value it builds the tree, compares it against the tree of the
//! previous value and emits a [`SweepSample`]. The lazy [`Sweep`] iterator
//! stops after the first failing sample; [`Sweeper::collect_report`]
//! materialises a whole sweep into a [`SweepReport`].

mod params;

use std::iter::FusedIterator;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{info, instrument};

use crate::{
    change::{ChangePolicy, ChangeRecord, ChangeTracker},
    edge::EdgeId,
    error::SweepError,
    graph::ParametricGraph,
    mst::{MstBuilder, MstResult},
    weight::WeightFunction,
};

pub use self::params::{ParameterIter, ParameterRange, Parameters};

/// One step of a sweep: the tree at `parameter` and its change record.
#[derive(Clone, Debug, PartialEq)]
pub struct SweepSample {
    parameter: f64,
    mst: MstResult,
    change: ChangeRecord,
}

impl SweepSample {
    /// Returns the parameter value of the sample.
    #[must_use]
    #[rustfmt::skip]
    pub fn parameter(&self) -> f64 { self.parameter }

    /// Returns the tree built at the sample's parameter.
    #[must_use]
    #[rustfmt::skip]
    pub fn mst(&self) -> &MstResult { &self.mst }

    /// Returns the change relative to the preceding sample.
    #[must_use]
    #[rustfmt::skip]
    pub fn change(&self) -> &ChangeRecord { &self.change }

    /// Returns the instability count of the change record.
    #[must_use]
    pub fn instability(&self) -> usize {
        self.change.instability()
    }
}

/// A point in a sweep where the tree differs from the one before it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition<'a> {
    previous: &'a SweepSample,
    current: &'a SweepSample,
}

impl<'a> Transition<'a> {
    /// Returns the parameter at which the new tree was observed.
    #[must_use]
    pub fn parameter(&self) -> f64 {
        self.current.parameter()
    }

    /// Returns the sample preceding the change.
    #[must_use]
    #[rustfmt::skip]
    pub fn previous(&self) -> &'a SweepSample { self.previous }

    /// Returns the sample at which the change was observed.
    #[must_use]
    #[rustfmt::skip]
    pub fn current(&self) -> &'a SweepSample { self.current }

    /// Returns the tree edge ids before the change, in union order.
    #[must_use]
    pub fn old_edges(&self) -> Vec<EdgeId> {
        self.previous.mst().edge_ids().collect()
    }

    /// Returns the tree edge ids after the change, in union order.
    #[must_use]
    pub fn new_edges(&self) -> Vec<EdgeId> {
        self.current.mst().edge_ids().collect()
    }

    /// Returns the change record of the later sample.
    #[must_use]
    pub fn change(&self) -> &'a ChangeRecord {
        self.current.change()
    }
}

/// The materialised result of a completed sweep.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SweepReport {
    samples: Vec<SweepSample>,
}

impl SweepReport {
    /// Returns the samples in sweep order.
    #[must_use]
    #[rustfmt::skip]
    pub fn samples(&self) -> &[SweepSample] { &self.samples }

    /// Consumes the report, returning its samples.
    #[must_use]
    pub fn into_samples(self) -> Vec<SweepSample> {
        self.samples
    }

    /// Returns the number of samples.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.samples.len() }

    /// Returns `true` when the sweep visited no parameter value.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.samples.is_empty() }

    /// Iterates the samples whose tree differs from their predecessor.
    ///
    /// "Differs" is judged by the sweep's [`ChangePolicy`]. Under
    /// [`ChangePolicy::NodePair`] a swap between parallel edges joining the
    /// same two nodes leaves the node pairs unchanged, so it is not listed
    /// even though the edge-id lists differ. Sweep with
    /// [`ChangePolicy::EdgeId`] to list such swaps.
    pub fn transitions(&self) -> impl Iterator<Item = Transition<'_>> + '_ {
        self.samples
            .windows(2)
            .filter(|pair| !pair[1].change().is_unchanged())
            .map(|pair| Transition {
                previous: &pair[0],
                current: &pair[1],
            })
    }

    /// Returns the sum of instability counts across all samples.
    #[must_use]
    pub fn total_instability(&self) -> usize {
        self.samples.iter().map(SweepSample::instability).sum()
    }
}

impl FromIterator<SweepSample> for SweepReport {
    fn from_iter<I: IntoIterator<Item = SweepSample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

/// Drives MST builds and change tracking across parameter values.
///
/// # Examples
/// ```
/// use driftree_core::{ChangeTracker, ParametricGraph, Parameters, Sinusoidal, Sweeper};
///
/// let graph = ParametricGraph::from_records([
///     (1, 2, 1.0, 0.0),
///     (2, 3, 1.0, 0.0),
///     (1, 3, 5.0, -5.0),
/// ])
/// .expect("records are valid");
/// let sweeper = Sweeper::new(&graph, &Sinusoidal, ChangeTracker::default());
/// let parameters = Parameters::explicit(vec![0.0, std::f64::consts::FRAC_PI_2])
///     .expect("values are finite");
///
/// let report = sweeper.collect_report(&parameters).expect("sweep succeeds");
/// let instability: Vec<usize> = report.samples().iter().map(|s| s.instability()).collect();
/// assert_eq!(instability, [0, 2]);
/// assert_eq!(report.transitions().count(), 1);
/// ```
#[derive(Debug)]
pub struct Sweeper<'g, W> {
    builder: MstBuilder<'g, W>,
    tracker: ChangeTracker,
}

impl<W> Clone for Sweeper<'_, W> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<W> Copy for Sweeper<'_, W> {}

impl<'g, W: WeightFunction> Sweeper<'g, W> {
    /// Creates a sweeper over `graph` evaluating weights with `weight`.
    #[must_use]
    pub const fn new(graph: &'g ParametricGraph, weight: &'g W, tracker: ChangeTracker) -> Self {
        Self {
            builder: MstBuilder::new(graph, weight),
            tracker,
        }
    }

    /// Returns the policy used to compare consecutive trees.
    #[must_use]
    pub fn change_policy(&self) -> ChangePolicy {
        self.tracker.policy()
    }

    /// Starts a lazy sweep over `parameters`.
    ///
    /// Each call starts afresh, so a sweeper can be reused for any number of
    /// sweeps. The iterator yields samples in input order; after the first
    /// error it yields nothing further.
    pub fn sweep<P>(&self, parameters: P) -> Sweep<'g, W, P::IntoIter>
    where
        P: IntoIterator<Item = f64>,
    {
        Sweep {
            builder: self.builder,
            tracker: self.tracker,
            parameters: parameters.into_iter(),
            previous: None,
            finished: false,
        }
    }

    /// Runs a complete sweep and collects every sample.
    ///
    /// # Errors
    /// Returns [`SweepError::Sample`] carrying the failing parameter when any
    /// MST build fails.
    #[instrument(
        name = "core.sweep",
        err,
        skip(self, parameters),
        fields(samples = parameters.len(), policy = ?self.tracker.policy()),
    )]
    pub fn collect_report(&self, parameters: &Parameters) -> Result<SweepReport, SweepError> {
        let report = self.sweep(parameters.iter()).collect::<Result<SweepReport, _>>()?;
        log_report(&report);
        Ok(report)
    }

    /// Runs a complete sweep with MST builds distributed over rayon workers.
    ///
    /// Trees are built independently and then compared in parameter order, so
    /// the report is identical to [`Sweeper::collect_report`]. When several
    /// samples fail, the error of the earliest one is returned.
    ///
    /// # Errors
    /// Returns [`SweepError::Sample`] carrying the failing parameter when any
    /// MST build fails.
    #[cfg(feature = "parallel")]
    #[cfg_attr(docsrs, doc(cfg(feature = "parallel")))]
    #[instrument(
        name = "core.sweep_parallel",
        err,
        skip(self, parameters),
        fields(samples = parameters.len(), policy = ?self.tracker.policy()),
    )]
    pub fn sweep_parallel(&self, parameters: &Parameters) -> Result<SweepReport, SweepError> {
        let values = parameters.to_vec();
        let builder = self.builder;
        let trees: Vec<Result<MstResult, SweepError>> = values
            .par_iter()
            .map(|&parameter| {
                builder
                    .build(parameter)
                    .map_err(|source| SweepError::Sample { parameter, source })
            })
            .collect();

        let mut samples = Vec::with_capacity(trees.len());
        let mut previous: Option<MstResult> = None;
        for tree in trees {
            let mst = tree?;
            let change = self.tracker.compare(previous.as_ref(), &mst);
            previous = Some(mst.clone());
            samples.push(SweepSample {
                parameter: mst.parameter(),
                mst,
                change,
            });
        }

        let report = SweepReport { samples };
        log_report(&report);
        Ok(report)
    }
}

fn log_report(report: &SweepReport) {
    info!(
        samples = report.len(),
        transitions = report.transitions().count(),
        total_instability = report.total_instability(),
        "sweep completed"
    );
}

/// Lazy iterator returned by [`Sweeper::sweep`].
#[derive(Debug)]
pub struct Sweep<'g, W, I> {
    builder: MstBuilder<'g, W>,
    tracker: ChangeTracker,
    parameters: I,
    previous: Option<MstResult>,
    finished: bool,
}

impl<W, I> Iterator for Sweep<'_, W, I>
where
    W: WeightFunction,
    I: Iterator<Item = f64>,
{
    type Item = Result<SweepSample, SweepError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let Some(parameter) = self.parameters.next() else {
            self.finished = true;
            return None;
        };

        let mst = match self.builder.build(parameter) {
            Ok(mst) => mst,
            Err(source) => {
                self.finished = true;
                return Some(Err(SweepError::Sample { parameter, source }));
            }
        };
        let change = self.tracker.compare(self.previous.as_ref(), &mst);
        self.previous = Some(mst.clone());
        Some(Ok(SweepSample {
            parameter,
            mst,
            change,
        }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            (0, Some(0))
        } else {
            (0, self.parameters.size_hint().1)
        }
    }
}

impl<W, I> FusedIterator for Sweep<'_, W, I>
where
    W: WeightFunction,
    I: Iterator<Item = f64>,
{
}
