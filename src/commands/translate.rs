//! Translation commands.

use crate::cli::parse_params;
use crate::context::Context;
use crate::error::Result;
use crate::translator::Params;

/// Translate a message in the active locale.
pub fn trans(ctx: &Context, id: &str, params: &[String], domain: Option<&str>) -> Result<()> {
    let params: Params = parse_params(params)?.into_iter().collect();
    let translator = ctx.translator()?;

    let message = translator.trans(id, &params, domain, None)?;
    ctx.output.value(&message)
}

/// Translate a plural message for `number`.
pub fn choice(
    ctx: &Context,
    id: &str,
    number: i64,
    params: &[String],
    domain: Option<&str>,
) -> Result<()> {
    let params: Params = parse_params(params)?.into_iter().collect();
    let translator = ctx.translator()?;

    let message = translator.trans_choice(id, number, &params, domain, None)?;
    ctx.output.value(&message)
}

/// Resolve the domain of a bundle name.
pub fn domain(ctx: &Context, bundle: &str) -> Result<()> {
    ctx.output.value(&ctx.config.resolve_domain(bundle))
}
