//! Plain CSV export for plotting front ends.

use std::io::{self, Write};

use crate::circuits::bias::BiasPoint;
use crate::circuits::response::{FrequencyResponse, PointBreakdown};
use crate::circuits::thevenin::PowerPoint;

/// Writes the three gain curves, one row per grid frequency.
pub fn write_response_csv<W: Write>(mut w: W, response: &FrequencyResponse) -> io::Result<()> {
    writeln!(w, "frequency_hz,av_db,ai_db,ap_db")?;
    for p in response.points() {
        writeln!(
            w,
            "{:.16e},{:.16e},{:.16e},{:.16e}",
            p.frequency, p.av_db, p.ai_db, p.ap_db
        )?;
    }
    Ok(())
}

/// Writes a load-power sweep.
pub fn write_power_csv<W: Write>(mut w: W, points: &[PowerPoint]) -> io::Result<()> {
    writeln!(w, "load_ohms,power_w")?;
    for p in points {
        writeln!(w, "{:.16e},{:.16e}", p.load, p.power)?;
    }
    Ok(())
}

/// Writes the operating point and a single-frequency breakdown as
/// `quantity,value` rows.
pub fn write_breakdown_csv<W: Write>(
    mut w: W,
    bias: &BiasPoint,
    breakdown: &PointBreakdown,
) -> io::Result<()> {
    let gains = breakdown.gains();
    let rows = [
        ("vb", bias.vb),
        ("ve", bias.ve),
        ("vc", bias.vc),
        ("vce", bias.vce),
        ("ie", bias.ie),
        ("ic", bias.ic),
        ("ib", bias.ib),
        ("frequency_hz", breakdown.frequency),
        ("re_ac", breakdown.re_ac),
        ("rc_eff", breakdown.rc_eff),
        ("rb_parallel", breakdown.rb_parallel),
        ("zc_in", breakdown.zc_in),
        ("zc_out", breakdown.zc_out),
        ("zc_bypass", breakdown.zc_bypass),
        ("z_bypassed", breakdown.z_bypassed),
        ("z_device", breakdown.z_device),
        ("rin", breakdown.rin),
        ("fc_in", breakdown.fc_in),
        ("cin_response", breakdown.cin_response),
        ("av_base", breakdown.av_base),
        ("input_division", breakdown.input_division),
        ("output_division", breakdown.output_division),
        ("av", breakdown.av),
        ("ai", breakdown.ai),
        ("ap", breakdown.ap),
        ("av_db", gains.av_db),
        ("ai_db", gains.ai_db),
        ("ap_db", gains.ap_db),
    ];
    writeln!(w, "quantity,value")?;
    for (name, value) in rows {
        writeln!(w, "{name},{value:.16e}")?;
    }
    Ok(())
}
