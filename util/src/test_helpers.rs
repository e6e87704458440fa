use crate::config::AppConfig;

/// Disables every outbound integration (AI assessment) for tests.
pub fn disable_external_services() {
    AppConfig::set_gemini_api_key("");
}
