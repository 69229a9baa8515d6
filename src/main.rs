// SPDX-License-Identifier: MPL-2.0
use iced_uml::app::{self, paths, Flags};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
IcedUml - turn descriptions into UML diagrams

USAGE:
  iced_uml [OPTIONS]

OPTIONS:
  --lang <code>        UI language, e.g. en-US or fr
  --config-dir <dir>   Directory holding settings.toml
  -h, --help           Print this help
";

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("iced_uml=info")),
        )
        .init();

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let lang = args.opt_value_from_str("--lang").unwrap_or_else(|error| {
        tracing::warn!("ignoring --lang: {error}");
        None
    });
    let config_dir: Option<String> = args.opt_value_from_str("--config-dir").unwrap_or_else(|error| {
        tracing::warn!("ignoring --config-dir: {error}");
        None
    });
    for extra in args.finish() {
        tracing::warn!("ignoring unexpected argument {}", extra.to_string_lossy());
    }

    paths::init_cli_overrides(config_dir.clone());
    app::run(Flags { lang, config_dir })
}
