pub mod args;
mod setup;

pub use args::AppArgs;

use anyhow::{bail, Result};
use tracing::{error, info};

use crate::host::BotStore;

pub async fn launch() -> Result<()> {
    launch_with_args(AppArgs::from_cli()).await
}

/// Dispatches every URL and waits for the deferred work to settle.
///
/// The links are dispatched one after the other without waiting in between,
/// so their actions run concurrently.
pub async fn launch_with_args(args: AppArgs) -> Result<()> {
    let setup::PreparedApp {
        args,
        handler,
        runtime,
        store,
    } = setup::prepare(args)?;

    let host = tokio::spawn(runtime.run());

    let mut pending = Vec::new();
    let mut rejected = 0;
    for url in &args.urls {
        match handler.parse_and_dispatch(url) {
            Ok(Some(task)) => pending.push(task),
            Ok(None) => info!("No action for {}", url),
            Err(e) => {
                error!("{}", e);
                rejected += 1;
            }
        }
    }

    for task in pending {
        if let Err(e) = task.await {
            error!("Deep link action panicked: {}", e);
        }
    }

    if let Some(bot) = store.active_bot() {
        info!("Active bot has {} endpoint(s)", bot.services.len());
    }

    // Dropping the handler closes the command channel and stops the host.
    drop(handler);
    host.await??;

    if rejected > 0 {
        bail!("{} of {} URLs were not valid protocol URLs", rejected, args.urls.len());
    }
    Ok(())
}
