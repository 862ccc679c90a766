//! EldenBanner - shows a transparent, click-through overlay message
//! Usage: EldenBanner.exe ["Your Custom Message"] [--nosound]

#![windows_subsystem = "windows"]

use elden_banner::args::{self, Invocation};
use elden_banner::{banner, usage};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    tracing::info!("EldenBanner starting...");

    let arguments = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned());

    match args::parse(arguments) {
        Ok(Invocation::Show(request)) => banner::run(request)?,
        Ok(Invocation::Help) => usage::show_usage(None),
        Err(e) => {
            tracing::warn!("Usage error: {}", e);
            usage::show_usage(Some(&e));
        }
    }

    Ok(())
}
