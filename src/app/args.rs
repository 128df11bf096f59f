use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "deeplink-handler")]
#[command(about = "Opens bfemulator:// deep links")]
pub struct AppArgs {
    #[arg(
        required = true,
        help = "Deep-link URLs to open (bfemulator://domain.action?args)"
    )]
    pub urls: Vec<String>,

    #[arg(long, help = "Settings file path")]
    pub config: Option<String>,

    #[arg(long, help = "Tunnel binary path (overrides the settings file)")]
    pub tunnel_path: Option<String>,

    #[arg(long, help = "Treat the tunnel as already connected")]
    pub tunnel_connected: bool,

    #[arg(
        long,
        help = "Sequence deferred actions with a fixed delay instead of the host-ready signal"
    )]
    pub use_timer: bool,

    #[arg(long, default_value_t = 1000, help = "Fixed delay used with --use-timer")]
    pub startup_delay_ms: u64,

    #[arg(
        long,
        default_value_t = 120,
        help = "How long deferred actions wait for readiness (0 waits forever)"
    )]
    pub readiness_timeout_secs: u64,

    #[arg(long, short, help = "Enable debug logging")]
    pub verbose: bool,
}

impl AppArgs {
    pub fn from_cli() -> Self {
        <Self as Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply() {
        let args = AppArgs::try_parse_from(["deeplink-handler", "bfemulator://bot.open"])
            .expect("valid args");
        assert_eq!(args.urls, vec!["bfemulator://bot.open".to_string()]);
        assert_eq!(args.startup_delay_ms, 1000);
        assert_eq!(args.readiness_timeout_secs, 120);
        assert!(!args.use_timer);
        assert!(!args.tunnel_connected);
    }

    #[test]
    fn at_least_one_url_is_required() {
        assert!(AppArgs::try_parse_from(["deeplink-handler"]).is_err());
    }
}
