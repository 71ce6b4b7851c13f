//! Convenience re-exports for driving amplifier analyses.

pub use crate::analysis::{analyze, AmplifierAnalysis, AnalysisConfig};
pub use crate::circuits::{
    bias::{solve_bias, BiasPoint},
    component::{Capacitor, Component, Resistor},
    network::ParallelNetwork,
    parameters::{CircuitParameters, Configuration, ParameterRanges, Range, SliderSettings},
    response::{
        CommonBaseStage, CommonEmitterStage, FrequencyResponse, FrequencyResponseEvaluator,
        GainPoint, PointBreakdown, SmallSignalModel,
    },
    thevenin::{peak, PowerPoint, TheveninSource},
};
pub use crate::constants::*;
pub use crate::errors::{AmpError, Result};
pub use crate::io::{write_breakdown_csv, write_power_csv, write_response_csv};
pub use crate::math::{amplitude_db, power_db, Scalar};
pub use crate::sweep::{linspace, logspace, sweep_map, sweep_map_with, FrequencyGrid, ParallelConfig};
pub use crate::units::{Capacitance, Impedance, Quantity, Unit};
