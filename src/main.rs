use anyhow::Context;
use clap::Parser;
use log::info;

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;
use phongtrace::config::{load_config, JobConfig};
use phongtrace::output::save_image;

/// Build, render and save one job.
fn run_job(job: &JobConfig) -> anyhow::Result<()> {
    info!(
        "Rendering {:?} scene at {}x{}, reflect levels: {}, shadows: {}",
        job.scene, job.width, job.height, job.reflect_levels, job.shadows
    );

    let scene = job
        .build_scene()
        .with_context(|| format!("failed to build {:?} scene", job.scene))?;

    let image = scene.camera.render(&scene, &job.settings());

    save_image(&image, &job.output).with_context(|| format!("failed to write {}", job.output.display()))?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logger(args.log_level());

    // Log application startup with version information
    info!("phongtrace - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));

    let jobs = match &args.config {
        Some(path) => {
            load_config(path)
                .with_context(|| format!("failed to load {}", path.display()))?
                .jobs
        }
        None => vec![args.job()],
    };

    for (i, job) in jobs.iter().enumerate() {
        info!("Job {}/{}", i + 1, jobs.len());
        run_job(job)?;
    }

    info!("All done.");
    Ok(())
}
