pub mod camera;
pub mod catalog;
pub mod choreography;
pub mod constants;
pub mod corridor;
pub mod curtain;
pub mod easing;
pub mod journey;
pub mod memory;
pub mod mount;
pub mod phase;
pub mod scripts;
pub mod store;
pub mod tween;

pub use camera::*;
pub use catalog::*;
pub use choreography::*;
pub use corridor::*;
pub use curtain::*;
pub use easing::*;
pub use journey::*;
pub use memory::*;
pub use mount::*;
pub use phase::*;
pub use store::*;
pub use tween::*;
