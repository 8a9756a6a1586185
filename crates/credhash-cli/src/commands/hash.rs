use secrecy::ExposeSecret;

use credhash_core::CredentialHasher;

use crate::app::AppContext;
use crate::cli::SecretArgs;
use crate::errors::credential_error;
use crate::helpers::{read_secret, validate_new_secret};
use crate::output::print_json;

pub fn handle_hash(ctx: &AppContext, args: &SecretArgs) -> anyhow::Result<()> {
    let config = ctx.load_config()?;
    let hasher = CredentialHasher::new(config.cost).map_err(credential_error)?;

    let secret = read_secret(args, "Secret", true)?;
    validate_new_secret(&secret)?;

    let encoded = hasher
        .hash_and_encode(secret.expose_secret().as_bytes())
        .map_err(credential_error)?;

    if ctx.ui.json {
        print_json(&serde_json::json!({ "credential": encoded }))?;
    } else {
        println!("{}", encoded);
    }
    Ok(())
}
