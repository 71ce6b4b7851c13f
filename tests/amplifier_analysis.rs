use amp_analyzer::prelude::*;
use approx::assert_relative_eq;

fn reference_stage() -> CircuitParameters {
    CircuitParameters {
        configuration: Configuration::CommonEmitter,
        rc: 4.7e3,
        rb1: 47.0e3,
        rb2: 10.0e3,
        re: 1.0e3,
        rl: 10.0e3,
        vcc: 12.0,
        beta: 150.0,
        cin: 10.0e-6,
        cout: 10.0e-6,
        c_bypass: 100.0e-6,
    }
}

#[test]
fn reference_common_emitter_q_point() {
    let q = solve_bias(&reference_stage()).unwrap();
    let vb = 12.0 * 10.0e3 / 57.0e3;
    let ie = (vb - VBE) / 1.0e3;
    assert_relative_eq!(q.vb, vb, max_relative = 0.01);
    assert_relative_eq!(q.ve, vb - VBE, max_relative = 0.01);
    assert_relative_eq!(q.ie, ie, max_relative = 0.01);
    assert_relative_eq!(q.ic, ie, max_relative = 0.01);
    assert_relative_eq!(q.ib, ie / 150.0, max_relative = 0.01);
    assert_relative_eq!(q.vc, 12.0 - ie * 4.7e3, max_relative = 0.01);
    assert_relative_eq!(q.vce, q.vc - q.ve, epsilon = 1.0e-12);
}

#[test]
fn bias_identities_hold_across_control_ranges() {
    let ranges = ParameterRanges::default();
    for rb1 in linspace(ranges.rb1.min, ranges.rb1.max, 9) {
        for beta in linspace(ranges.beta.min, ranges.beta.max, 6) {
            for vcc in linspace(ranges.vcc.min, ranges.vcc.max, 5) {
                let params = SliderSettings {
                    rb1_kohm: rb1 / 1.0e3,
                    beta,
                    vcc,
                    ..SliderSettings::default()
                }
                .to_parameters(Configuration::CommonEmitter);
                match solve_bias(&params) {
                    Ok(q) => {
                        assert_relative_eq!(q.vce, q.vc - q.ve, epsilon = 1.0e-12);
                        assert_relative_eq!(q.ib * params.beta, q.ic, max_relative = 1.0e-12);
                        assert!(q.ie > 0.0 && q.vce > 0.0);
                    }
                    Err(AmpError::NonPhysicalBias { emitter_current, vce }) => {
                        assert!(emitter_current <= 0.0 || vce <= 0.0);
                    }
                    Err(other) => panic!("unexpected error {other}"),
                }
            }
        }
    }
}

#[test]
fn sweep_output_is_aligned_and_repeatable() {
    let config = AnalysisConfig::default();
    let first = analyze(&reference_stage(), &config).unwrap();
    let second = analyze(&reference_stage(), &config).unwrap();
    assert_eq!(first, second);

    let r = &first.response;
    assert_eq!(r.frequencies.len(), 500);
    assert_eq!(r.av_db.len(), 500);
    assert_eq!(r.ai_db.len(), 500);
    assert_eq!(r.ap_db.len(), 500);
    assert!(r.frequencies.windows(2).all(|w| w[1] > w[0]));
}

#[test]
fn high_frequency_gain_tends_to_collector_load_over_re() {
    let params = reference_stage();
    let q = solve_bias(&params).unwrap();
    let rc_eff = 4.7e3 * 10.0e3 / 14.7e3;
    let limit = 20.0 * (rc_eff / (VT / q.ie)).log10();

    let evaluator = FrequencyResponseEvaluator::new(&params, &q).unwrap();
    let near = evaluator.gain_at(1.0e6).av_db;
    let far = evaluator.gain_at(1.0e10).av_db;
    assert!((far - limit).abs() < (near - limit).abs() + 1.0e-12);
    assert_relative_eq!(far, limit, epsilon = 1.0e-6);
}

#[test]
fn low_frequency_gain_falls_toward_floor() {
    let params = reference_stage();
    let q = solve_bias(&params).unwrap();
    let evaluator = FrequencyResponseEvaluator::new(&params, &q).unwrap();

    let grid = FrequencyGrid::from_hz(vec![0.0, 1.0e-9, 1.0e-6, 1.0e-3]).unwrap();
    let response = evaluator.sweep(&grid, &ParallelConfig::sequential());
    assert_relative_eq!(response.av_db[0], DB_FLOOR);
    assert_relative_eq!(response.ai_db[0], DB_FLOOR);
    assert!(response.floored_points >= 1);
    assert!(response.av_db.windows(2).all(|w| w[1] >= w[0]));
    assert!(response.ai_db.windows(2).all(|w| w[1] >= w[0]));
}

#[test]
fn bypass_capacitor_only_raises_gain_above_corner() {
    let caps = linspace(1.0e-6, 1000.0e-6, 12);
    for f in [2.0e3, 5.0e4, 5.0e5] {
        let mut previous = Scalar::NEG_INFINITY;
        for &c_bypass in &caps {
            let params = CircuitParameters {
                c_bypass,
                ..reference_stage()
            };
            let q = solve_bias(&params).unwrap();
            let g = FrequencyResponseEvaluator::new(&params, &q)
                .unwrap()
                .gain_at(f)
                .av_db;
            assert!(g >= previous - 1.0e-9, "f = {f}, C = {c_bypass}");
            previous = g;
        }
    }
}

#[test]
fn common_base_has_sub_unity_current_gain_and_voltage_gain() {
    let analysis = analyze(&CircuitParameters::common_base(), &AnalysisConfig::default()).unwrap();
    assert!(analysis.response.ai_db.iter().all(|&g| g < 0.0));
    let (_, peak_av) = analysis.response.peak_voltage_gain().unwrap();
    assert!(peak_av > 20.0);
}

#[test]
fn maximum_power_transfer_at_matched_load() {
    let source = TheveninSource::new(10.0, 50.0).unwrap();
    let p_matched = source.load_power(50.0).unwrap();
    assert_relative_eq!(p_matched, 10.0_f64.powi(2) / (4.0 * 50.0));
    assert!(p_matched > source.load_power(10.0).unwrap());
    assert!(p_matched > source.load_power(500.0).unwrap());

    let best = peak(&source.default_sweep(800).unwrap()).unwrap();
    assert_relative_eq!(best.load, 50.0, max_relative = 0.02);
}

#[test]
fn exported_csv_round_trips_through_text() {
    let analysis = analyze(
        &reference_stage(),
        &AnalysisConfig::default().with_sweep(10.0, 1.0e4, 4),
    )
    .unwrap();
    let mut buf = Vec::new();
    write_response_csv(&mut buf, &analysis.response).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let rows: Vec<Vec<f64>> = text
        .lines()
        .skip(1)
        .map(|l| l.split(',').map(|v| v.parse().unwrap()).collect())
        .collect();
    assert_eq!(rows.len(), 4);
    for (row, p) in rows.iter().zip(analysis.response.points()) {
        assert_relative_eq!(row[0], p.frequency, max_relative = 1.0e-15);
        assert_relative_eq!(row[1], p.av_db, max_relative = 1.0e-15);
    }

    let mut detail = Vec::new();
    write_breakdown_csv(&mut detail, &analysis.bias, &analysis.selected).unwrap();
    let detail = String::from_utf8(detail).unwrap();
    assert!(detail.lines().any(|l| l.starts_with("fc_in,")));
}
