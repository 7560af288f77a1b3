use crate::app::AppContext;

pub fn handle_greet(ctx: &AppContext, message: &str, encrypt: bool) -> anyhow::Result<i32> {
    let mut store = ctx.open_store()?;
    store.print_greeting(message, encrypt);
    ctx.finish(store)
}
