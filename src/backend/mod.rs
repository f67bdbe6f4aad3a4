//! Backend: typing, rendering, driver generation, injection, scaffolding
//!
//! ## Modules
//!
//! - `types` - target type inference and unification
//! - `render` - literal to target-language source text
//! - `harness` - test-driver assembly (statement blocks per case)
//! - `inject` - driver injection/removal as pure text transforms
//! - `scaffold` - initial solution skeletons

pub mod harness;
pub mod inject;
pub mod render;
pub mod scaffold;
pub mod types;

pub use harness::{build_driver, Binding, DriverEmitter, ParsedCase};
pub use inject::{inject_driver, remove_driver, InjectError};
pub use render::render;
pub use scaffold::scaffold;
pub use types::TargetType;
