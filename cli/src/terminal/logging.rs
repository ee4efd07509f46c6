use colored::*;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::registry::LookupSpan;

use crate::terminal::print::PRINT_TARGET;
use crate::terminal::progress::ProgressWriter;

const SUCCESS_TARGET: &str = "netprobe::success";

/// HTTP client internals that are too chatty even at `-vv`.
const QUIET_DEPENDENCIES: &[&str] = &["hyper=warn", "hyper_util=warn", "reqwest=warn", "rustls=warn"];

pub struct ProbeFormatter;

impl<S, N> FormatEvent<S, N> for ProbeFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();

        if meta.target() != PRINT_TARGET {
            let (symbol, color_func): (&str, fn(ColoredString) -> ColoredString) =
                match *meta.level() {
                    Level::TRACE => ("[ ]", |s| s.dimmed()),
                    Level::DEBUG => ("[?]", |s| s.blue()),
                    Level::INFO if meta.target() == SUCCESS_TARGET => {
                        ("[+]", |s| s.bright_green().bold())
                    }
                    Level::INFO => ("[+]", |s| s.green()),
                    Level::WARN => ("[*]", |s| s.yellow().bold()),
                    Level::ERROR => ("[-]", |s| s.red().bold()),
                };

            write!(writer, "{} ", color_func(symbol.into()))?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides the level picked
/// from the `-v` and `-q` counts.
pub fn init_logging(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let level = match (verbose, quiet) {
        (0, q) if q >= 2 => Level::WARN,
        (0, _) => Level::INFO,
        (1, _) => Level::DEBUG,
        _ => Level::TRACE,
    };

    let mut filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    for directive in QUIET_DEPENDENCIES {
        filter = filter.add_directive(directive.parse::<Directive>()?);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .event_format(ProbeFormatter)
        .with_writer(|| ProgressWriter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("could not install the logger: {e}"))
}
