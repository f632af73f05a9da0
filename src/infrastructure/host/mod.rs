//! Host implementations
//!
//! - `SystemHost` - the local machine
//! - `ScriptedHost` - in-memory host with scripted command output

mod scripted;
mod system;

pub use scripted::ScriptedHost;
pub use system::SystemHost;
