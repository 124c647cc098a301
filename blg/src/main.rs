use std::fs;
use std::fs::File;
use std::io::BufReader;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use log::{info, warn};

use blg::config::BlgConfig;
use blg::io::cli::Cli;
use blg::io::output::BlgOutput;
use blg::{io, svg_export};
use gangnest::io::ext_repr;

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let config = match args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            BlgConfig::default()
        }
        Some(config_file) => {
            let file = File::open(config_file)?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).context("incorrect config file format")?
        }
    };

    info!("Successfully parsed BlgConfig: {config:?}");

    let input_file_stem = args
        .input_file
        .file_stem()
        .and_then(|stem| stem.to_str())
        .context("input file has no usable file stem")?;

    if !args.solution_folder.exists() {
        fs::create_dir_all(&args.solution_folder).with_context(|| {
            format!(
                "could not create solution folder: {:?}",
                args.solution_folder
            )
        })?;
    }

    let ext_job = io::read_job(args.input_file.as_path())?;
    let mut session = ext_repr::import_job(&ext_job)?;

    let report = session.auto_nest(&config.placement);
    if !report.unplaced.is_empty() {
        warn!(
            "[MAIN] {} of {} units could not be placed",
            report.unplaced.len(),
            report.placed + report.unplaced.len()
        );
    }

    let page = session
        .export_layout()
        .context("no layout to export, all units unplaced")?;

    {
        let output = BlgOutput {
            job: ext_job,
            config,
            report: ext_repr::export_report(&report),
            page,
        };

        let solution_path = args.solution_folder.join(format!("sol_{input_file_stem}.json"));
        io::write_json(&output, &solution_path)?;
    }

    {
        let svg = svg_export::session_to_svg(&session, config.svg_draw_options);
        let svg_path = args.solution_folder.join(format!("sol_{input_file_stem}.svg"));
        io::write_svg(&svg, &svg_path)?;
    }

    Ok(())
}
