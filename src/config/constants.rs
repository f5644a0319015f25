pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:5000";

pub const OPENAI_ENDPOINT: &str = "https://api.openai.com";

pub const DEFAULT_MODEL: &str = "gpt-5.1";

pub const DUCKDUCKGO_ENDPOINT: &str = "https://api.duckduckgo.com";

pub const WIKIPEDIA_ENDPOINT: &str = "https://en.wikipedia.org";

/// Max prior turns of a session forwarded to the model
pub const HISTORY_TURNS: usize = 20;

pub const ASSISTANT_NAME: &str = "Globalrate AI";

pub const ASSISTANT_CREATOR: &str = "Shreesh Shukla";

/// Answer used whenever no confirmed data could be gathered
pub const FALLBACK_ANSWER: &str = "Live confirmed data is not available right now.";

/// Sentinel source, substituted when a reply has nothing to cite
pub const FALLBACK_SOURCE: &str = "Live confirmed data is not available right now";
