//! Mock account commands.

use anyhow::Result;
use krstore_auth::{sign_in, sign_up, User};

use super::{LoginArgs, SignupArgs};
use crate::context::Context;

/// Sign in.
pub fn login(args: LoginArgs, ctx: &Context) -> Result<()> {
    let user = sign_in(&args.email, &args.password)?;
    remember(user, ctx)
}

/// Create an account and sign in.
pub fn signup(args: SignupArgs, ctx: &Context) -> Result<()> {
    let user = sign_up(&args.name, &args.email, &args.password, &args.confirm)?;
    remember(user, ctx)
}

fn remember(user: User, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    ctx.session(&store).login(&user)?;

    if ctx.output.is_json() {
        ctx.output.json(&user);
    } else {
        ctx.output
            .success(&format!("Welcome, {}!", user.display_name()));
    }
    Ok(())
}

/// Sign out.
pub fn logout(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let was_signed_in = ctx.session(&store).logout()?;

    if ctx.output.is_json() {
        ctx.output
            .json(&serde_json::json!({ "loggedOut": was_signed_in }));
    } else if was_signed_in {
        ctx.output.success("Signed out");
    } else {
        ctx.output.info("Not signed in");
    }
    Ok(())
}

/// Show the signed-in user.
pub fn whoami(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let user = ctx.session(&store).current()?;

    if ctx.output.is_json() {
        ctx.output.json(&user);
        return Ok(());
    }

    match user {
        Some(user) => {
            ctx.output.kv("name", user.display_name());
            ctx.output.kv("email", &user.email);
        }
        None => ctx.output.info("Not signed in. Use `krstore login` or `krstore signup`."),
    }
    Ok(())
}
