use dt_extract::{
    Cli, Config, DtExtract, DtExtractError, OutputFormatter, OutputMode, ParseOutcome,
};
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = match Cli::parse_args() {
        Ok(ParseOutcome::Run(cli)) => cli,
        Ok(ParseOutcome::Exit) => return 0,
        Err(e) => {
            print_startup_error(&e);
            return 1;
        }
    };

    let config = match Config::load_with_defaults() {
        Ok(config) => config,
        Err(e) => {
            print_startup_error(&e);
            return 1;
        }
    };

    execute(&cli, config)
}

fn execute(cli: &Cli, config: Config) -> i32 {
    let app = match DtExtract::new(config) {
        Ok(app) => app,
        Err(e) => {
            print_startup_error(&e);
            return 1;
        }
    };

    match app.run(&cli.logfile) {
        Ok(report) => {
            app.output_formatter().print_run_report(&report);
            0
        }
        Err(e) => {
            app.handle_error(&e);
            1
        }
    }
}

fn print_startup_error(error: &DtExtractError) {
    // Create a basic formatter for startup errors
    let formatter = OutputFormatter::new(OutputMode::Human, 1);
    formatter.print_user_friendly_error(error);
}
