use std::io::{self, IsTerminal};

use crate::app::{AppContext, Result};
use crate::console::Console;
use crate::session::Options;

/// Run an interactive session on the process's stdin and stdout.
pub async fn read(ctx: &AppContext, options: Options) -> Result<()> {
    let stdout = io::stdout();
    let color = stdout.is_terminal();
    let console = Console::new(stdout.lock(), ctx.theme).with_color(color);
    let input = io::stdin().lock();

    tracing::debug!(backend = ctx.store.backend_name(), ?options, "Session options");

    let mut session = ctx.session(input, console, options);
    session.run().await
}
