use greeter_core::StorageTarget;

use crate::app::AppContext;
use crate::cli::TargetArg;

pub fn handle_store(ctx: &AppContext, data: &str, target: TargetArg) -> anyhow::Result<i32> {
    let mut store = ctx.open_store()?;
    let target = StorageTarget::from(target);
    let outcome = store.store_data(data, target);
    tracing::debug!(%target, ?outcome, "store finished");
    ctx.finish(store)
}
