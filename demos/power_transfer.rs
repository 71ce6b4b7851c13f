use amp_analyzer::prelude::*;

fn main() -> Result<()> {
    let source = TheveninSource::new(10.0, 50.0)?;
    let points = source.default_sweep(800)?;

    if let Some(best) = peak(&points) {
        eprintln!(
            "maximum power delivered: {:.4} W at R_L = {:.2} Ω (R_th = {} Ω)",
            best.power, best.load, source.resistance
        );
    }

    write_power_csv(std::io::stdout().lock(), &points)?;
    Ok(())
}
