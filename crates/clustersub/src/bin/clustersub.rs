use std::ffi::OsString;
use std::io;
use std::io::IsTerminal;

use clap::CommandFactory;
use clap_complete::generate;

use clustersub::client::commands::submit::submit_job;
use clustersub::client::globalsettings::GlobalSettings;
use clustersub::client::output::cli::CliOutput;
use clustersub::client::output::json::JsonOutput;
use clustersub::client::output::outputs::{Output, Outputs};
use clustersub::common::cli::{
    ColorPolicy, CommonOpts, GenerateCompletionOpts, RootOptions, SubCommand, exit_code,
    output_mode_hint, parse_root_options,
};
use clustersub::common::error::SubmitError;
use clustersub::common::setup::setup_logging;
use clustersub::common::utils::fs::absolute_path;

fn make_global_settings(opts: CommonOpts) -> GlobalSettings {
    match opts.colors {
        ColorPolicy::Always => colored::control::set_override(true),
        ColorPolicy::Never => colored::control::set_override(false),
        ColorPolicy::Auto => {
            if !io::stdout().is_terminal() {
                colored::control::set_override(false);
            }
        }
    }

    GlobalSettings::new(
        absolute_path(opts.log_dir),
        opts.sbatch,
        opts.dry_run,
        create_printer(opts.output_mode),
    )
}

fn generate_completion(opts: GenerateCompletionOpts) -> anyhow::Result<i32> {
    let generator = opts.shell;

    let mut app = RootOptions::command();
    eprintln!("Generating completion file for {generator}...");
    generate(generator, &mut app, "clustersub".to_string(), &mut io::stdout());
    Ok(0)
}

fn create_printer(output_mode: Outputs) -> Box<dyn Output> {
    match output_mode {
        Outputs::CLI => Box::<CliOutput>::default(),
        Outputs::JSON => Box::<JsonOutput>::default(),
    }
}

/// Prints the error of a failed run and returns the exit code of the wrapper.
fn report_result(printer: &dyn Output, result: anyhow::Result<i32>) -> i32 {
    let code = exit_code(&result);
    if let Err(error) = result {
        printer.print_error(error);
    }
    code
}

async fn run_command(gsettings: &GlobalSettings, subcmd: SubCommand) -> anyhow::Result<i32> {
    match subcmd {
        SubCommand::GenerateCompletion(opts) => generate_completion(opts),
        subcmd => match subcmd.into_submission() {
            Some((profile, request)) => submit_job(gsettings, profile, request).await,
            None => Ok(0),
        },
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args: Vec<OsString> = std::env::args_os().collect();

    let code = match parse_root_options(&args) {
        Ok(top_opts) => {
            setup_logging(top_opts.common.debug);
            let gsettings = make_global_settings(top_opts.common);
            let result = run_command(&gsettings, top_opts.subcmd).await;
            report_result(gsettings.printer(), result)
        }
        // Help and version go to stdout and exit successfully
        Err(SubmitError::UsageError(error)) if !error.use_stderr() => error.exit(),
        Err(error) => {
            let printer = create_printer(output_mode_hint(&args));
            report_result(printer.as_ref(), Err(error.into()))
        }
    };

    if code != 0 {
        std::process::exit(code);
    }
}
