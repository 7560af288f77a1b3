use greeter_core::{MessageStyle, PrintOptions, StorageTarget, VERSION};

use crate::app::AppContext;
use crate::constants::demo;

/// Banner, three greetings, then one store call per target.
pub fn handle_demo(ctx: &AppContext) -> anyhow::Result<i32> {
    let mut store = ctx.open_store()?;

    let rule = PrintOptions::styled(MessageStyle::General)
        .accents(false)
        .whole_line(true);
    let notice = PrintOptions::styled(MessageStyle::Notice)
        .accents(false)
        .whole_line(true);
    let welcome = format!("Welcome to Greeter v{}!", VERSION);

    let console = store.console();
    console.print(demo::RULE, rule)?;
    console.print(&welcome, notice)?;
    console.print(demo::TAGLINE, notice)?;
    console.print(demo::RULE, rule)?;

    store.greet();
    store.print_greeting(demo::CUSTOM_GREETING, false);
    store.print_greeting(demo::SECRET_GREETING, true);

    store.store_data(demo::FILE_DATA, StorageTarget::PlainFile);
    store.store_data(demo::CONTAINER_DATA, StorageTarget::EncryptedContainer);
    store.store_data(demo::DATABASE_DATA, StorageTarget::Database);

    ctx.finish(store)
}
