pub mod animation;
pub mod clock;
pub mod config;
pub mod error;
pub mod lights;
pub mod show;

#[cfg(test)]
mod testing;

pub mod prelude {
    pub use crate::{
        animation::*, clock::*, config::*, error::*, lights::*, show::prelude::*,
    };
}
