use secrecy::ExposeSecret;

use credhash_core::{check, needs_rehash};

use crate::app::AppContext;
use crate::cli::VerifyArgs;
use crate::errors::{credential_error, stored_credential_error, CliError};
use crate::helpers::read_secret;
use crate::output::print_json;
use crate::ui::{badge, print_warning, Badge};

pub fn handle_verify(ctx: &AppContext, args: &VerifyArgs) -> anyhow::Result<()> {
    let config = ctx.load_config()?;
    let encoded = args.encoded.trim();

    let candidate = read_secret(&args.secret, "Secret", false)?;
    let matched =
        check(candidate.expose_secret().as_bytes(), encoded).map_err(stored_credential_error)?;
    let outdated = matched && needs_rehash(encoded, &config.cost).map_err(credential_error)?;

    if ctx.ui.json {
        print_json(&serde_json::json!({
            "match": matched,
            "needs_rehash": outdated,
        }))?;
    } else if matched && !ctx.ui.quiet {
        println!("{}", badge(ctx.ui.color, Badge::Ok, "Secret matches"));
    }

    if !matched {
        return Err(CliError::auth_failed("Secret does not match the stored credential").into());
    }
    if outdated && !ctx.ui.json {
        print_warning(
            &ctx.ui,
            "Credential uses costs other than the configured profile; rehash it.",
        );
    }
    Ok(())
}
