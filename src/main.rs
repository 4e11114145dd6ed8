use log::LevelFilter;
use rizer::{
    format_file_size, load_config, resolve, AssumeYes, Cli, Confirm, Rizer, RunOutcome,
    RunReport, TerminalPrompt,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_normalized();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .format_timestamp(None)
        .format_target(false)
        .init();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            log::error!("❌ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let file_config = load_config(cli.ignore_config, &cwd)?;
    let options = resolve(cli.to_options(), file_config);

    let confirm: Box<dyn Confirm> = if cli.yes {
        Box::new(AssumeYes)
    } else {
        Box::new(TerminalPrompt)
    };

    let rizer = Rizer::new(options);
    match rizer.run(&cli.file, confirm.as_ref())? {
        RunOutcome::Declined => {
            println!("Aborted, no images were written.");
        }
        RunOutcome::Completed(report) => print_summary(&rizer, &report),
    }

    Ok(ExitCode::SUCCESS)
}

fn print_summary(rizer: &Rizer, report: &RunReport) {
    println!(
        "Generated {} image(s) in {} ({})",
        report.generated(),
        rizer.options().output_directory.display(),
        format_file_size(report.total_bytes())
    );

    if report.skipped() > 0 {
        println!("Skipped {} level(s)", report.skipped());
    }
    if report.failed() > 0 {
        println!("Failed to write {} image(s)", report.failed());
    }
}
