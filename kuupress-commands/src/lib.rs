pub mod dispatch;
pub mod kuupress;
pub mod reply;
pub mod router;

use kuupress_core::{Data, Error};

pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![kuupress::rank::rank(), kuupress::user::user()]
}
