//! Circuit primitives and the bias / small-signal models built on them.

/// DC operating point solver.
pub mod bias;
/// Lumped component definitions and traits.
pub mod component;
/// Aggregate network composition helpers.
pub mod network;
/// Component values, control ranges, and slider conversion.
pub mod parameters;
/// Frequency-dependent gain models and sweeps.
pub mod response;
/// Maximum power transfer from a Thevenin source.
pub mod thevenin;

pub use bias::{solve_bias, BiasPoint};
pub use component::{Capacitor, Component, Resistor};
pub use network::ParallelNetwork;
pub use parameters::{CircuitParameters, Configuration, ParameterRanges, Range, SliderSettings};
pub use response::{
    CommonBaseStage, CommonEmitterStage, FrequencyResponse, FrequencyResponseEvaluator, GainPoint,
    PointBreakdown, SmallSignalModel,
};
pub use thevenin::{PowerPoint, TheveninSource};
