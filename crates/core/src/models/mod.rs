pub mod ads;
pub mod common;
pub mod group_update;
pub mod messages;
pub mod orders;
pub mod secure;
pub mod wall;
