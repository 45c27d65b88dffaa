use std::fmt;
use std::str::FromStr;
use tracing::info;
use crate::error::{AppError, Result};
use crate::formatter::format_paragraphs;
use crate::llm::TextProvider;
use crate::prompts;

pub const EMPTY_INPUT_MESSAGE: &str = "No valid text or URL provided.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Ai,
    Plain,
}

impl Mode {
    /// `"AI"` selects the provider; every other value is plain formatting.
    pub fn from_flag(flag: &str) -> Self {
        if flag == "AI" { Mode::Ai } else { Mode::Plain }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Summarize,
    Rewrite,
    GenerateTitle,
    GenerateHashtags,
}

impl FromStr for Action {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "summarize" => Ok(Action::Summarize),
            "rewrite" => Ok(Action::Rewrite),
            "generate_title" => Ok(Action::GenerateTitle),
            "generate_hashtags" => Ok(Action::GenerateHashtags),
            other => Err(AppError::ValidationError(format!("Unknown action: {}", other))),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Summarize => "summarize",
            Action::Rewrite => "rewrite",
            Action::GenerateTitle => "generate_title",
            Action::GenerateHashtags => "generate_hashtags",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct TransformRequest {
    pub text: String,
    pub mode: Mode,
    pub action: Action,
    pub include_global: bool,
}

pub async fn dispatch(provider: &dyn TextProvider, request: &TransformRequest) -> Result<String> {
    let text = request.text.as_str();
    if text.trim().is_empty() {
        return Err(AppError::ValidationError(EMPTY_INPUT_MESSAGE.to_string()));
    }
    info!(action = %request.action, mode = ?request.mode, chars = text.chars().count(), "dispatching transform");

    match (request.action, request.mode) {
        (Action::GenerateTitle, _) => {
            let title = provider.generate(&prompts::title(text)).await?;
            Ok(title_fragment(&title))
        }
        (Action::GenerateHashtags, _) => {
            let tags = provider
                .generate(&prompts::hashtags(text, request.include_global))
                .await?;
            Ok(hashtag_fragment(&tags))
        }
        (Action::Summarize, Mode::Ai) => {
            let raw = provider.generate(&prompts::summarize(text)).await?;
            Ok(format_paragraphs(&raw))
        }
        (Action::Rewrite, Mode::Ai) => {
            let raw = provider.generate(&prompts::rewrite(text)).await?;
            Ok(format_paragraphs(&raw))
        }
        (Action::Summarize | Action::Rewrite, Mode::Plain) => Ok(format_paragraphs(text)),
    }
}

fn title_fragment(raw: &str) -> String {
    let title: String = raw.chars().filter(|c| !matches!(c, '"' | '“' | '”')).collect();
    format!("<h2>{}</h2>", title.trim())
}

fn hashtag_fragment(raw: &str) -> String {
    let body = raw.trim().replace('\n', "<br>").replace("**", "");
    format!("<div style='margin-top:10px'>{}</div>", body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::GenerationRequest;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Recorder {
        reply: String,
        calls: Mutex<Vec<GenerationRequest>>,
    }

    impl Recorder {
        fn new(reply: &str) -> Self {
            Self { reply: reply.to_string(), calls: Mutex::new(Vec::new()) }
        }

        fn calls(&self) -> Vec<GenerationRequest> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TextProvider for Recorder {
        async fn generate(&self, request: &GenerationRequest) -> Result<String> {
            self.calls.lock().unwrap().push(request.clone());
            Ok(self.reply.clone())
        }
    }

    struct Failing;

    #[async_trait]
    impl TextProvider for Failing {
        async fn generate(&self, _request: &GenerationRequest) -> Result<String> {
            Err(AppError::LlmError("quota exceeded".into()))
        }
    }

    fn request(text: &str, mode: Mode, action: Action) -> TransformRequest {
        TransformRequest { text: text.to_string(), mode, action, include_global: true }
    }

    #[test]
    fn parses_actions_and_modes() {
        assert_eq!("generate_hashtags".parse::<Action>().unwrap(), Action::GenerateHashtags);
        assert!(matches!("translate".parse::<Action>(), Err(AppError::ValidationError(_))));
        assert_eq!(Mode::from_flag("AI"), Mode::Ai);
        assert_eq!(Mode::from_flag("ai"), Mode::Plain);
        assert_eq!(Mode::from_flag("manual"), Mode::Plain);
        assert_eq!(Action::GenerateTitle.to_string(), "generate_title");
    }

    #[tokio::test]
    async fn plain_mode_formats_without_provider() {
        let provider = Recorder::new("unused");
        let req = request("Hello World. This is great! Another sentence here.", Mode::Plain, Action::Summarize);

        let out = dispatch(&provider, &req).await.unwrap();
        assert_eq!(out, "<p>Hello World. This is great! Another sentence here.</p>");
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn empty_text_is_rejected_before_provider() {
        let provider = Recorder::new("unused");
        let err = dispatch(&provider, &request("   ", Mode::Ai, Action::GenerateTitle)).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(msg) if msg == EMPTY_INPUT_MESSAGE));
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn ai_summary_is_paragraph_formatted() {
        let provider = Recorder::new("Short   version.\n\nStill   informative.");
        let out = dispatch(&provider, &request("Long article.", Mode::Ai, Action::Summarize)).await.unwrap();

        assert_eq!(out, "<p>Short version. Still informative.</p>");
        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].prompt.starts_with("Summarize"));
        assert_eq!(calls[0].max_tokens, 1000);
    }

    #[tokio::test]
    async fn rewrite_uses_rewrite_prompt() {
        let provider = Recorder::new("Fresh take.");
        dispatch(&provider, &request("Old take.", Mode::Ai, Action::Rewrite)).await.unwrap();
        assert!(provider.calls()[0].prompt.starts_with("Rewrite"));
    }

    #[tokio::test]
    async fn title_loses_quotes_even_in_plain_mode() {
        let provider = Recorder::new("\"Rain Floods “Jakarta” Streets\"");
        let out = dispatch(&provider, &request("Article.", Mode::Plain, Action::GenerateTitle)).await.unwrap();

        assert_eq!(out, "<h2>Rain Floods Jakarta Streets</h2>");
        assert!(!out.contains('"'));
        let calls = provider.calls();
        assert_eq!((calls[0].temperature, calls[0].max_tokens), (0.8, 60));
    }

    #[tokio::test]
    async fn hashtags_become_line_broken_fragment() {
        let provider = Recorder::new("**🎵 TikTok Hashtags:** #news #fyp\n**📸 Instagram Hashtags:** #explore");
        let mut req = request("Article.", Mode::Ai, Action::GenerateHashtags);
        req.include_global = false;

        let out = dispatch(&provider, &req).await.unwrap();
        assert_eq!(
            out,
            "<div style='margin-top:10px'>🎵 TikTok Hashtags: #news #fyp<br>📸 Instagram Hashtags: #explore</div>"
        );
        assert!(!provider.calls()[0].prompt.contains("Global Hashtags"));
    }

    #[tokio::test]
    async fn provider_failure_propagates() {
        let err = dispatch(&Failing, &request("Text.", Mode::Ai, Action::Summarize)).await.unwrap_err();
        assert!(matches!(err, AppError::LlmError(_)));
    }
}
