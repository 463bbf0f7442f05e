use clap::{Args, Subcommand};
use storefront_app::domain::carts::{matching::LineKey, models::Cart};

mod merge;
mod show;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Print a user's or guest's cart
    Show(show::ShowCartArgs),

    /// Fold a guest cart into a user's cart
    Merge(merge::MergeCartArgs),
}

pub(crate) async fn run(command: CartCommand) -> Result<(), String> {
    match command.command {
        CartSubcommand::Show(args) => show::run(args).await,
        CartSubcommand::Merge(args) => merge::run(args).await,
    }
}

fn print_cart(cart: &Cart) {
    println!("cart_uuid: {}", cart.uuid);

    match cart.owner.user_uuid() {
        Some(user) => println!("user_uuid: {user}"),
        None => {
            if let Some(guest) = cart.owner.guest_id() {
                println!("guest_id: {guest}");
            }
        }
    }

    for line in &cart.lines {
        let key = LineKey::of(line);

        println!(
            "  {} x{} @ {} [{} size={} color={}]",
            line.name,
            line.quantity,
            line.price,
            key.product_uuid,
            key.size.as_deref().unwrap_or("-"),
            key.color.as_deref().unwrap_or("-"),
        );
    }

    println!("total_price: {}", cart.total_price);
    println!("version: {}", cart.version);
}
