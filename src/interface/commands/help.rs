//! # Help Command
//!
//! Handles the `!help` command.
//! Lists every registered command with its description.

use crate::application::registry::{CommandContext, CommandHandler};
use crate::application::utils::say;
use anyhow::Result;
use async_trait::async_trait;

pub struct Help;

#[async_trait]
impl CommandHandler for Help {
    async fn call(&self, ctx: &CommandContext<'_>, _args: &[String]) -> Result<()> {
        say(ctx.chat, &crate::strings::messages::help(&ctx.registry.list())).await
    }
}
