use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;
use std::str::FromStr;

use dalab_analysis::config::{AnalysisConfig, AnalysisKind};
use dalab_cli::run::{run_demographic, run_mean_var_std, run_medical, run_page_views, run_sea_level};
use dalab_cli::util::resolve_config;

fn csv_arg(help: &'static str) -> Arg {
    Arg::new("csv")
        .help(help)
        .required(true)
        .value_parser(clap::value_parser!(PathBuf))
        .value_hint(ValueHint::FilePath)
}

fn config_arg() -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .help("Path to a JSON analysis configuration file. Defaults are used when omitted.")
        .value_parser(clap::value_parser!(PathBuf))
        .value_hint(ValueHint::FilePath)
}

fn output_dir_arg() -> Arg {
    Arg::new("output_dir")
        .short('o')
        .long("output-dir")
        .help("Directory charts are written to. Overrides output_dir from the configuration file.")
        .value_parser(clap::value_parser!(PathBuf))
        .value_hint(ValueHint::DirPath)
}

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("DALAB_LOG", "error,dalab=info"))
        .init();

    let matches = Command::new("dalab")
        .version(clap::crate_version!())
        .about("dalab - statistics and charts for small tabular datasets")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new(AnalysisKind::MeanVarStd.as_str())
                .about("Mean, variance, standard deviation, max, min and sum of a 3x3 matrix")
                .arg(
                    Arg::new("values")
                        .help("Nine numbers, read row by row")
                        .num_args(0..)
                        .allow_negative_numbers(true)
                        .value_parser(clap::value_parser!(f64)),
                ),
        )
        .subcommand(
            Command::new(AnalysisKind::Demographic.as_str())
                .about("Answer demographic questions about the adult census extract")
                .arg(csv_arg("Path to adult.data.csv"))
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the report as JSON instead of text.")
                        .action(ArgAction::SetTrue),
                )
                .arg(config_arg()),
        )
        .subcommand(
            Command::new(AnalysisKind::Medical.as_str())
                .about("Categorical plot and correlation heat map of medical examinations")
                .arg(csv_arg("Path to medical_examination.csv"))
                .arg(output_dir_arg())
                .arg(config_arg()),
        )
        .subcommand(
            Command::new(AnalysisKind::PageViews.as_str())
                .about("Line, bar and box plots of daily forum page views")
                .arg(csv_arg("Path to fcc-forum-pageviews.csv"))
                .arg(output_dir_arg())
                .arg(config_arg()),
        )
        .subcommand(
            Command::new(AnalysisKind::SeaLevel.as_str())
                .about("Fit and project the CSIRO adjusted sea level")
                .arg(csv_arg("Path to epa-sea-level.csv"))
                .arg(output_dir_arg())
                .arg(config_arg()),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    let Some((name, sub_m)) = matches.subcommand() else {
        unreachable!("Subcommand is required by CLI configuration")
    };
    let kind = AnalysisKind::from_str(name).map_err(anyhow::Error::msg)?;

    match handle(kind, sub_m) {
        Ok(()) => Ok(()),
        Err(e) => {
            log::error!("{} failed: {:#}", kind.as_str(), e);
            std::process::exit(1)
        }
    }
}

fn handle(kind: AnalysisKind, matches: &ArgMatches) -> Result<()> {
    if kind == AnalysisKind::MeanVarStd {
        let values: Vec<f64> = matches
            .get_many::<f64>("values")
            .map(|v| v.copied().collect())
            .unwrap_or_default();
        let stats = run_mean_var_std(&values)?;
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    let csv: &PathBuf = matches
        .get_one("csv")
        .ok_or_else(|| anyhow::anyhow!("Missing CSV path"))?;
    let config = load_config(matches)?;
    log::info!("[dalab::{}] Reading {:?}", kind.as_str(), csv);

    match kind {
        AnalysisKind::Demographic => {
            println!("{}", run_demographic(csv, &config, matches.get_flag("json"))?);
        }
        AnalysisKind::Medical => {
            let written = run_medical(csv, &config)?;
            log::info!("[dalab::medical] Wrote {} charts", written.len());
        }
        AnalysisKind::PageViews => {
            let summary = run_page_views(csv, &config)?;
            log::info!("[dalab::page-views] Wrote {} charts", summary.charts.len());
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        AnalysisKind::SeaLevel => {
            let summary = run_sea_level(csv, &config)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        AnalysisKind::MeanVarStd => unreachable!(),
    }
    Ok(())
}

fn load_config(matches: &ArgMatches) -> Result<AnalysisConfig> {
    // demographic has no output directory
    let output_dir = matches
        .try_get_one::<PathBuf>("output_dir")
        .ok()
        .flatten();
    resolve_config(matches.get_one::<PathBuf>("config"), output_dir)
}
