use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use survey_core::SurveyConfig;
use survey_server::ServerConfig;
use tracing_subscriber::EnvFilter;

/// Survey game HTTP server
#[derive(Debug, Parser)]
#[command(name = "survey-server", version, about = "Survey game HTTP server")]
struct Cli {
    /// Listen address
    #[arg(long, env = "SURVEY_BIND", default_value = "127.0.0.1:8000")]
    bind: SocketAddr,

    /// Directory with scenarios_<lang>.json; the store is created here too
    #[arg(long, env = "SURVEY_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// TOML survey configuration; overrides --data-dir
    #[arg(long, env = "SURVEY_CONFIG")]
    config: Option<PathBuf>,

    /// Front-end directory served at / and /static
    #[arg(long, env = "SURVEY_STATIC_DIR", default_value = "static")]
    static_dir: PathBuf,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let survey = match &cli.config {
        Some(path) => SurveyConfig::from_toml_file(path)?,
        None => SurveyConfig::from_data_dir(&cli.data_dir),
    };
    let config = ServerConfig::new(survey)
        .with_bind(cli.bind)
        .with_static_dir(cli.static_dir);

    survey_server::serve(config).await
}
