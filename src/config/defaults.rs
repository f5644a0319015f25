use super::constants::*;

pub(crate) fn bind_address() -> String {
    DEFAULT_BIND_ADDRESS.to_string()
}

pub(crate) fn openai_endpoint() -> String {
    OPENAI_ENDPOINT.to_string()
}

pub(crate) fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

pub(crate) fn history_turns() -> usize {
    HISTORY_TURNS
}

pub(crate) fn assistant_name() -> String {
    ASSISTANT_NAME.to_string()
}

pub(crate) fn assistant_creator() -> String {
    ASSISTANT_CREATOR.to_string()
}

pub(crate) fn fallback_answer() -> String {
    FALLBACK_ANSWER.to_string()
}

pub(crate) fn fallback_source() -> String {
    FALLBACK_SOURCE.to_string()
}

pub(crate) fn log_level() -> Option<String> {
    Some("info".to_string())
}

pub(crate) fn default_true() -> bool {
    true
}
