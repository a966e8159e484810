use tracing::{debug, warn};

use crate::error::Result;

/// Strategy for picking the User-Agent header of outgoing requests.
/// Composed into the fetch layer; a new value is pulled per request.
pub trait UserAgentProvider {
    fn next_user_agent(&mut self) -> String;
}

/// Rotating User-Agent backed by `ua_generator`'s pool of real browser
/// strings.
#[derive(Default)]
pub struct SpoofedUserAgent;

impl UserAgentProvider for SpoofedUserAgent {
    fn next_user_agent(&mut self) -> String {
        ua_generator::ua::spoof_ua().to_string()
    }
}

/// Fixed User-Agent, mainly for tests and reproducible runs.
pub struct StaticUserAgent(pub String);

impl UserAgentProvider for StaticUserAgent {
    fn next_user_agent(&mut self) -> String {
        self.0.clone()
    }
}

/// Fire one request with a rotated User-Agent before the browser run.
/// Carries no data into the survey; a failure is logged and swallowed.
pub async fn warm_up(url: &str, provider: &mut dyn UserAgentProvider) -> Result<()> {
    let ua = provider.next_user_agent();
    debug!(url, user_agent = %ua, "warm-up fetch");

    let client = match reqwest::Client::builder().user_agent(ua).build() {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, "warm-up client build failed; continuing without it");
            return Ok(());
        }
    };
    match client.get(url).send().await {
        Ok(response) => {
            debug!(status = %response.status(), "warm-up fetch done");
        }
        Err(e) => {
            warn!(error = %e, "warm-up fetch failed; continuing without it");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spoofed_agent_yields_nonempty_strings() {
        let mut provider = SpoofedUserAgent;
        let ua = provider.next_user_agent();
        assert!(ua.contains("Mozilla"), "unexpected UA: {ua}");
    }

    #[test]
    fn static_agent_repeats_its_string() {
        let mut provider = StaticUserAgent("test-agent/1.0".into());
        assert_eq!(provider.next_user_agent(), "test-agent/1.0");
        assert_eq!(provider.next_user_agent(), "test-agent/1.0");
    }

    #[tokio::test]
    async fn warm_up_swallows_bad_user_agent() {
        // Newlines make the UA an invalid header value, so the client
        // itself fails to build. That must not abort the run.
        let mut provider = StaticUserAgent("bad\nagent".into());
        let result = warm_up("https://example.invalid", &mut provider).await;
        assert!(result.is_ok());
    }
}
