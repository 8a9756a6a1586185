use crate::app::AppContext;
use crate::config::{write_config, CredhashConfig};
use crate::errors::CliError;
use crate::output::print_json;
use crate::ui::{badge, print_warning, Badge};

pub fn handle_config_init(ctx: &AppContext, force: bool) -> anyhow::Result<()> {
    let path = &ctx.config_location.path;
    if path.exists() && !force {
        return Err(CliError::invalid_input(format!(
            "Config already exists: {}\nHint: Pass --force to overwrite it.",
            path.display()
        ))
        .into());
    }

    write_config(path, &CredhashConfig::default())?;

    if ctx.ui.json {
        print_json(&serde_json::json!({ "path": path.display().to_string() }))?;
    } else if !ctx.ui.quiet {
        let message = format!("Wrote default config to {}", path.display());
        println!("{}", badge(ctx.ui.color, Badge::Ok, &message));
    }
    Ok(())
}

pub fn handle_config_show(ctx: &AppContext) -> anyhow::Result<()> {
    let config = ctx.load_config()?;
    let path = &ctx.config_location.path;

    if ctx.ui.json {
        return print_json(&config);
    }

    if !path.exists() {
        print_warning(
            &ctx.ui,
            &format!("No config file at {}; showing defaults.", path.display()),
        );
    }
    let rendered =
        toml::to_string_pretty(&config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    print!("{}", rendered);
    Ok(())
}
