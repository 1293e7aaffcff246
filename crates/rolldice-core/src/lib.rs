#![deny(warnings)]
pub mod probability;
pub mod shut_box;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "rolldice"
    }

    pub const fn tagline() -> &'static str {
        "Coins, dice and Shut the Box"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
