mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    DEFAULT_SESSION_SECRET, LoggingSettings, ServerSettings, SessionSettings, Settings,
    SynthesisSettings, UpstreamSettings,
};
