use std::path::Path;
use anyhow::bail;
use plotters::prelude::*;
use crate::data::SweepPoint;

/// Draws precision, recall and F1 against the confidence threshold as an SVG.
pub fn plot_sweep(points: &[SweepPoint], output_path: &Path) -> anyhow::Result<()> {
    if points.is_empty() {
        bail!("Nothing to plot: the sweep produced no points");
    }

    let (mut lo, mut hi) = points.iter().fold((f32::MAX, f32::MIN), |(lo, hi), p| {
        (lo.min(p.threshold), hi.max(p.threshold))
    });
    if hi - lo < f32::EPSILON {
        lo -= 0.05;
        hi += 0.05;
    }

    let root = SVGBackend::new(output_path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.margin(10, 10, 10, 10);

    let best = points.iter().map(|p| p.f1).fold(0f32, f32::max);
    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Metrics vs Confidence Threshold (best F1={:.3})", best), ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(lo..hi, 0f32..1f32)?;

    chart.configure_mesh()
        .x_desc("Confidence Threshold")
        .y_desc("Metric Value")
        .draw()?;

    let precision_series: Vec<(f32, f32)> = points.iter().map(|p| (p.threshold, p.precision)).collect();
    let recall_series: Vec<(f32, f32)> = points.iter().map(|p| (p.threshold, p.recall)).collect();
    let f1_series: Vec<(f32, f32)> = points.iter().map(|p| (p.threshold, p.f1)).collect();

    chart.draw_series(LineSeries::new(precision_series, &RED))?
        .label("Precision")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));

    chart.draw_series(LineSeries::new(recall_series, &BLUE))?
        .label("Recall")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));

    chart.draw_series(LineSeries::new(f1_series, &GREEN))?
        .label("F1 Score")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &GREEN));

    chart.configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    log::info!("Saved threshold sweep chart to {}", output_path.display());
    Ok(())
}
