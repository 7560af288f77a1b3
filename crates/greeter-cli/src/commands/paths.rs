use greeter_core::{MessageStyle, PrintOptions};

use crate::app::AppContext;

pub fn handle_paths(ctx: &AppContext) -> anyhow::Result<i32> {
    let paths = ctx.storage_paths();

    if ctx.ui().json {
        println!("{}", serde_json::to_string_pretty(&paths)?);
        return Ok(0);
    }

    let mut store = ctx.open_store()?;
    let plain = format!("file: {}", paths.plain().display());
    let container = format!("container: {}", paths.container().display());
    let console = store.console();
    console.print(&plain, PrintOptions::styled(MessageStyle::Notice))?;
    console.print(&container, PrintOptions::styled(MessageStyle::Notice))?;
    Ok(0)
}
