use clap::Args;
use storefront_app::{
    context::AppContext,
    identity::{GuestId, UserUuid},
};

#[derive(Debug, Args)]
pub(crate) struct MergeCartArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// User receiving the guest's items
    #[arg(long)]
    user: UserUuid,

    /// Guest whose cart is folded in
    #[arg(long)]
    guest: String,
}

pub(crate) async fn run(args: MergeCartArgs) -> Result<(), String> {
    let context = AppContext::from_database_url(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let cart = context
        .carts
        .merge_guest_cart(args.user, GuestId::from(args.guest))
        .await
        .map_err(|error| format!("failed to merge carts: {error}"))?;

    super::print_cart(&cart);

    Ok(())
}
