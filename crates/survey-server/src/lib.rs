//! Survey Server
//!
//! HTTP boundary of the survey game. Exposes the survey core to a browser
//! client and serves the static front-end.
//!
//! # Architecture
//!
//! ```text
//! Browser → warp routes → handlers → Arc<Mutex<Survey>> → catalog / store files
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod handlers;
pub mod reply;
pub mod routes;

use anyhow::Context;
use parking_lot::Mutex;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use survey_core::{Survey, SurveyConfig};

/// Survey shared by all request handlers
pub type SharedSurvey = Arc<Mutex<Survey>>;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address
    pub bind: SocketAddr,
    /// Directory holding `index.html` and other front-end files
    pub static_dir: PathBuf,
    /// Survey data files
    pub survey: SurveyConfig,
}

impl ServerConfig {
    /// Create configuration with default bind address and static directory
    #[must_use]
    pub fn new(survey: SurveyConfig) -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8000)),
            static_dir: PathBuf::from("static"),
            survey,
        }
    }

    /// With listen address
    #[inline]
    #[must_use]
    pub fn with_bind(mut self, bind: SocketAddr) -> Self {
        self.bind = bind;
        self
    }

    /// With static directory
    #[inline]
    #[must_use]
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = dir.into();
        self
    }
}

/// Open the survey described by `config` for sharing between handlers
///
/// # Errors
/// Any error from [`Survey::open`]
pub fn open_shared(config: &SurveyConfig) -> survey_core::Result<SharedSurvey> {
    Ok(Arc::new(Mutex::new(Survey::open(config)?)))
}

/// Run the server until Ctrl-C
///
/// # Errors
/// If the survey cannot be opened or the address cannot be bound
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let survey = open_shared(&config.survey).context("failed to open survey")?;
    let app = routes::app(survey, &config.static_dir);

    let (addr, server) = warp::serve(app)
        .try_bind_with_graceful_shutdown(config.bind, async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %err, "failed to listen for shutdown signal");
            }
        })
        .with_context(|| format!("failed to bind {}", config.bind))?;

    tracing::info!(%addr, static_dir = %config.static_dir.display(), "survey server listening");
    server.await;
    tracing::info!("survey server stopped");
    Ok(())
}
