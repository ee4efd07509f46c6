mod commands;
mod input;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, Commands, batch, check, domain, ip, scan};
use terminal::{logging, output, print};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose, commands.quiet)?;

    let cfg = commands.config();
    let opts = commands.output_options();
    print::banner(cfg.quiet);

    let report = match commands.command {
        Commands::Ip { target, port } => ip::ip(&target, port, &cfg).await?,
        Commands::Domain { target, port } => domain::domain(&target, port, &cfg).await?,
        Commands::ScanIp {
            target,
            start_port,
            end_port,
            ports,
            ..
        } => scan::scan(&target, start_port, end_port, ports, &cfg).await?,
        Commands::Batch {
            file, port, mode, ..
        } => batch::batch(&file, port, mode.into(), &cfg).await?,
        Commands::Check { target, ports, .. } => check::check(&target, ports, &cfg).await?,
    };

    output::emit(&report, &opts)?;

    Ok(if report.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
