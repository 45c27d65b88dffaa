//! Prompt templates and sampling parameters for every provider call.

use crate::llm::GenerationRequest;

const SUMMARIZE_TEMPLATE: &str =
    "Summarize the following news article so it is shorter and clear while staying informative:\n\n";

const REWRITE_TEMPLATE: &str = "Rewrite the following news article so it keeps the same meaning, \
    but in a fresh style that will not be detected as a copy:\n\n";

const TITLE_TEMPLATE: &str = "Write a new news headline that is catchy, short (at most 12 words) \
    and relevant to the following text:\n\n";

const HASHTAG_INTRO: &str = "Analyze the following news text in depth and produce lists of relevant \
hashtags with viral potential.

Take into account the current algorithms and trends on TikTok and Instagram for the Indonesia region \
(and global when it fits). Mix topical, lifestyle and general trending tags to improve the chances of \
showing up on the TikTok For You page and on Instagram Explore.

Format the output like this:
🎵 TikTok Hashtags: (at most 10)
📸 Instagram Hashtags: (at most 10)
";

const HASHTAG_GLOBAL_LINE: &str = "🌍 Global Hashtags: (at most 5, optional)\n";

const HASHTAG_OUTRO: &str = "\nMake sure the hashtags fit the theme of the article and use a natural, \
popular hashtag style.";

pub fn summarize(text: &str) -> GenerationRequest {
    GenerationRequest::new(format!("{}{}", SUMMARIZE_TEMPLATE, text), 0.7, 1000)
}

pub fn rewrite(text: &str) -> GenerationRequest {
    GenerationRequest::new(format!("{}{}", REWRITE_TEMPLATE, text), 0.7, 1000)
}

pub fn title(text: &str) -> GenerationRequest {
    GenerationRequest::new(format!("{}{}", TITLE_TEMPLATE, text), 0.8, 60)
}

pub fn hashtags(text: &str, include_global: bool) -> GenerationRequest {
    let mut prompt = String::with_capacity(text.len() + 1024);
    prompt.push_str(HASHTAG_INTRO);
    if include_global {
        prompt.push_str(HASHTAG_GLOBAL_LINE);
    }
    prompt.push_str("\nArticle:\n");
    prompt.push_str(text);
    prompt.push('\n');
    prompt.push_str(HASHTAG_OUTRO);
    GenerationRequest::new(prompt, 0.9, 500)
}

/// `weekday` is a full English day name, `time` is `HH:MM` in WIB (UTC+7).
pub fn schedule(weekday: &str, time: &str) -> GenerationRequest {
    let prompt = format!(
        "Today is {weekday}, {time} WIB.\n\
         Based on the latest TikTok and Instagram algorithms, build a content upload schedule \
         for today with the best chance of reaching FYP and trending.\n\n\
         Also consider the usual weekly TikTok patterns (for example weekends are more relaxed, \
         weekdays more productive).\n\n\
         Explain the reason for each time slot briefly and use emoji."
    );
    GenerationRequest::new(prompt, 0.7, 500)
}
