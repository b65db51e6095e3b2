//! bvr_validate - scores saved detector output against annotated frames

use std::path::PathBuf;
use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use bvr_validate::common::{UnsurePolicy, ValidatorConfig};
use bvr_validate::data::FsAccess;
use bvr_validate::sweep_chart::plot_sweep;
use bvr_validate::validation_runners::{best_by_f1, linspace};
use bvr_validate::{run_sweep, run_validation};

#[derive(Parser, Debug)]
#[command(name = "bvr_validate", about = "Precision/recall validation of detector output")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score the predictions once and print the report
    Validate {
        #[command(flatten)]
        common: CommonArgs,
        /// Also write the report as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Re-run validation over a grid of confidence thresholds
    Sweep {
        #[command(flatten)]
        common: CommonArgs,
        #[arg(long, default_value_t = 0.05)]
        start: f32,
        #[arg(long, default_value_t = 0.95)]
        stop: f32,
        #[arg(long, default_value_t = 0.05)]
        step: f32,
        /// Where to write the SVG chart, defaults to ./runs/validate/threshold_sweep.svg
        #[arg(long)]
        chart: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Root folder holding one `<sequence><suffix>` annotation folder per sequence
    #[arg(long, env = "BVR_VALIDATE_LABELS")]
    labels: PathBuf,
    /// Root folder holding one prediction folder per sequence
    #[arg(long, env = "BVR_VALIDATE_PREDICTIONS")]
    predictions: PathBuf,
    #[arg(long)]
    iou: Option<f32>,
    #[arg(long)]
    conf: Option<f32>,
    /// include, exclude or ignore
    #[arg(long)]
    unsure: Option<String>,
    /// Only score predictions with this label (repeatable)
    #[arg(long = "label")]
    labels_wanted: Vec<String>,
    #[arg(long)]
    parallel: bool,
    #[arg(long)]
    config: Option<PathBuf>,
}

impl CommonArgs {
    /// Config file values, overridden by whatever was given on the command line.
    fn resolve_config(&self) -> Result<ValidatorConfig> {
        let mut cfg = ValidatorConfig::load(self.config.as_deref())?;
        if let Some(iou) = self.iou {
            cfg = cfg.with_iou_threshold(iou);
        }
        if let Some(conf) = self.conf {
            cfg = cfg.with_confidence_threshold(conf);
        }
        if let Some(policy) = &self.unsure {
            let parsed = UnsurePolicy::from_str(policy).ok_or_else(|| anyhow!(
                "Unknown unsure policy '{}', expected one of: {}",
                policy, UnsurePolicy::all_unsure_policies().join(", ")
            ))?;
            cfg = cfg.with_unsure_policy(parsed);
        }
        if !self.labels_wanted.is_empty() {
            cfg.wanted_labels = Some(self.labels_wanted.clone());
        }
        if self.parallel {
            cfg = cfg.with_parallel(true);
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Validate { common, json } => {
            let cfg = common.resolve_config()?;
            let report = run_validation(&cfg, &common.labels, &common.predictions)?;
            println!("{}", report);
            if let Some(path) = json {
                report.save_json(&path)?;
                log::info!("Saved report to {}", path.display());
            }
        }
        Command::Sweep { common, start, stop, step, chart } => {
            let cfg = common.resolve_config()?;
            let thresholds = linspace(start, stop, step)?;
            let points = run_sweep(&cfg, &common.labels, &common.predictions, &thresholds)?;

            println!("{:>9} {:>9} {:>9} {:>9} {:>7} {:>7} {:>7}", "threshold", "precision", "recall", "f1", "tp", "fp", "fn");
            for p in &points {
                println!("{:>9.3} {:>9.4} {:>9.4} {:>9.4} {:>7} {:>7} {:>7}",
                         p.threshold, p.precision, p.recall, p.f1, p.tp, p.fp, p.fn_count);
            }
            if let Some(best) = best_by_f1(&points) {
                println!("Best F1 {:.4} at confidence >= {:.3}", best.f1, best.threshold);
            }

            let chart_path = match chart {
                Some(path) => path,
                None => FsAccess::save_out(&[])?.join("threshold_sweep.svg"),
            };
            plot_sweep(&points, &chart_path)?;
        }
    }

    Ok(())
}
