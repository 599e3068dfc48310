//! Application state.
//!
//! The service is stateless across requests: state holds only the
//! immutable configuration and the tool capabilities probed at startup.
//! No request ever mutates it.

use morph_core::Config;
use morph_processing::ToolCapabilities;

pub struct AppState {
    pub config: Config,
    pub tools: ToolCapabilities,
}
