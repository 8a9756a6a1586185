use credhash_core::{inspect, needs_rehash};

use crate::app::AppContext;
use crate::cli::InspectArgs;
use crate::errors::credential_error;
use crate::output::print_json;
use crate::ui::kv;

pub fn handle_inspect(ctx: &AppContext, args: &InspectArgs) -> anyhow::Result<()> {
    let config = ctx.load_config()?;
    let encoded = args.encoded.trim();

    let info = inspect(encoded).map_err(|e| credential_error(e.into()))?;
    let outdated = needs_rehash(encoded, &config.cost).map_err(credential_error)?;

    if ctx.ui.json {
        print_json(&serde_json::json!({
            "credential": info,
            "needs_rehash": outdated,
        }))?;
        return Ok(());
    }

    let lines = [
        ("algorithm", info.algorithm.to_string()),
        ("version", info.version.to_string()),
        ("memory_cost", format!("{} KiB", info.memory_cost)),
        ("iterations", info.iterations.to_string()),
        ("parallelism", info.parallelism.to_string()),
        ("salt_length", format!("{} bytes", info.salt_length)),
        ("output_length", format!("{} bytes", info.output_length)),
        ("needs_rehash", if outdated { "yes" } else { "no" }.to_string()),
    ];
    for (key, value) in lines {
        println!("{}", kv(&ctx.ui, key, &value));
    }
    Ok(())
}
