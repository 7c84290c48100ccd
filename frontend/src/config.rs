use web_sys::window;

const DEV_SERVER_PORT: &str = "8080";
const DEV_API_BASE_URL: &str = "http://127.0.0.1:3000";

pub fn get_api_base_url() -> String {
    if let Some(window) = window() {
        let location = window.location();
        if let Ok(host) = location.host() {
            // `trunk serve` hosts the app itself, the API stays on the backend port
            if location.port().map(|port| port == DEV_SERVER_PORT).unwrap_or(false) {
                return DEV_API_BASE_URL.to_string();
            }

            let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
            return format!("{}//{}", protocol, host);
        }
    }

    DEV_API_BASE_URL.to_string()
}

pub fn api_url(endpoint: &str) -> String {
    format!("{}{}", get_api_base_url(), endpoint)
}
