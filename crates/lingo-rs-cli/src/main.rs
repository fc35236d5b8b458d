use lingo_rs_cli::{default_registry, load_settings, CONFIG_ARG};
use lingo_rs_core::logging::setup_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let registry = default_registry();
    let matches = registry.build_cli().get_matches();

    let settings = load_settings(matches.get_one::<String>(CONFIG_ARG).map(String::as_str))?;
    setup_logging(&settings);

    let mut stdout = std::io::stdout();
    registry.execute(&matches, &settings, &mut stdout).await?;
    Ok(())
}
