use clap::Args;
use storefront_app::{
    context::AppContext,
    identity::{CartIdentity, GuestId, UserUuid},
};

#[derive(Debug, Args)]
pub(crate) struct ShowCartArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Owning user UUID
    #[arg(long, conflicts_with = "guest", required_unless_present = "guest")]
    user: Option<UserUuid>,

    /// Owning guest id
    #[arg(long)]
    guest: Option<String>,
}

pub(crate) async fn run(args: ShowCartArgs) -> Result<(), String> {
    let context = AppContext::from_database_url(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let identity = CartIdentity {
        user: args.user,
        guest: args.guest.map(GuestId::from),
    };

    let cart = context
        .carts
        .get_cart(identity)
        .await
        .map_err(|error| format!("failed to load cart: {error}"))?;

    super::print_cart(&cart);

    Ok(())
}
