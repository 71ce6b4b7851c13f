use amp_analyzer::prelude::*;

fn main() -> Result<()> {
    // Reference common-emitter stage: RC 4.7 kΩ, β 150, defaults elsewhere.
    let params = CircuitParameters {
        rc: 4.7e3,
        beta: 150.0,
        ..CircuitParameters::common_emitter()
    };
    let analysis = analyze(&params, &AnalysisConfig::default())?;

    let q = &analysis.bias;
    eprintln!(
        "Q-point: IC = {:.2} mA, VCE = {:.2} V, IB = {:.2} uA",
        q.ic * 1.0e3,
        q.vce,
        q.ib * 1.0e6
    );
    if let Some(corner) = analysis.response.lower_corner() {
        eprintln!("lower -3 dB corner ~ {corner:.1} Hz");
    }

    write_response_csv(std::io::stdout().lock(), &analysis.response)?;
    Ok(())
}
