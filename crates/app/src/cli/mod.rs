use clap::{Parser, Subcommand};

mod cart;
mod db;

#[derive(Debug, Parser)]
#[command(name = "storefront-app", about = "Storefront cart admin CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Cart(cart::CartCommand),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Cart(command) => cart::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cart_show_requires_an_owner() {
        let result = Cli::try_parse_from([
            "storefront-app",
            "cart",
            "show",
            "--database-url",
            "postgres://localhost/storefront",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn cart_show_rejects_both_owners() {
        let result = Cli::try_parse_from([
            "storefront-app",
            "cart",
            "show",
            "--database-url",
            "postgres://localhost/storefront",
            "--user",
            "0190f3a8-6f5c-7cc1-9a55-0b6b4c1d2e3f",
            "--guest",
            "guest_1",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn cart_merge_parses_user_and_guest() {
        let result = Cli::try_parse_from([
            "storefront-app",
            "cart",
            "merge",
            "--database-url",
            "postgres://localhost/storefront",
            "--user",
            "0190f3a8-6f5c-7cc1-9a55-0b6b4c1d2e3f",
            "--guest",
            "guest_1",
        ]);

        assert!(result.is_ok(), "expected merge args to parse: {result:?}");
    }
}
