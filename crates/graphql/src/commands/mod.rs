mod typegen;

use crate::Cli;
use crate::CommandResult;
use typegen::TypegenCmd;

#[derive(Debug, clap::Parser)]
#[command(name = "graphql")]
pub(crate) enum CommandEnum {
    /// Generate backing-type definitions for a GraphQL schema.
    Typegen(Box<TypegenCmd>),
}
impl CommandEnum {
    pub(crate) async fn run(self, cli: Cli) -> CommandResult {
        match self {
            Self::Typegen(cmd) => cmd.run(cli).await
        }
    }
}
