pub mod endpoint;
pub mod session;

pub use endpoint::{ ChatEndpoint, EndpointOutcome };
pub use session::{ ChatSession, KeyInput, SessionError, SessionState, UiEffect };

/// Chat page served at `/`. Runs the same submit / receive / reset machine as
/// [`ChatSession`] in the browser.
pub const INDEX_HTML: &str = include_str!("../../static/index.html");
