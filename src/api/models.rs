use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::transform::{Action, Mode};

/// Body of `POST /process`. Missing and `null` fields take the browser
/// client's defaults.
#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub include_global: Option<bool>,
}

impl ProcessRequest {
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    pub fn mode(&self) -> Mode {
        Mode::from_flag(self.mode.as_deref().unwrap_or("AI"))
    }

    pub fn action_name(&self) -> &str {
        self.action.as_deref().unwrap_or("summarize")
    }

    pub fn action(&self) -> Result<Action> {
        self.action_name().parse()
    }

    pub fn include_global(&self) -> bool {
        self.include_global.unwrap_or(true)
    }

    /// A non-empty URL wins over literal text.
    pub fn url_source(&self) -> Option<&str> {
        let url = self.url.as_deref()?.trim();
        (!url.is_empty()).then_some(url)
    }
}

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub result: String,
}

#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub schedule: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let req: ProcessRequest = serde_json::from_str(r#"{"text": "Hi."}"#).unwrap();
        assert_eq!(req.mode(), Mode::Ai);
        assert_eq!(req.action().unwrap(), Action::Summarize);
        assert!(req.include_global());
        assert_eq!(req.url_source(), None);
    }

    #[test]
    fn null_fields_behave_like_missing_ones() {
        let req: ProcessRequest = serde_json::from_str(
            r#"{"text": null, "url": null, "mode": null, "action": null, "include_global": null}"#,
        )
        .unwrap();
        assert_eq!(req.text(), "");
        assert_eq!(req.url_source(), None);
        assert_eq!(req.mode(), Mode::Ai);
        assert_eq!(req.action_name(), "summarize");
        assert!(req.include_global());
    }

    #[test]
    fn url_takes_precedence_over_text() {
        let req: ProcessRequest =
            serde_json::from_str(r#"{"text": "Hi.", "url": " https://example.com/a ", "mode": "PLAIN"}"#).unwrap();
        assert_eq!(req.url_source(), Some("https://example.com/a"));
        assert_eq!(req.mode(), Mode::Plain);
    }
}
