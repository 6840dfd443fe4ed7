pub mod animation;
pub mod constants;
pub mod lighting;
pub mod model;
pub mod notify;
pub mod picking;
pub mod scene;
pub mod state;
pub mod theme;
pub mod world;

pub use animation::*;
pub use lighting::*;
pub use model::*;
pub use notify::*;
pub use picking::*;
pub use scene::*;
pub use state::*;
pub use theme::*;
pub use world::*;
