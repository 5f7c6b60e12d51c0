//! Static display strings per language.

use serde::{Deserialize, Serialize};

/// Supported display languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "zh-TW")]
    ZhTw,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::ZhTw];

    pub fn tag(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::ZhTw => "zh-TW",
        }
    }

    /// Parse a language tag; unknown tags fall back to English.
    pub fn from_tag(tag: &str) -> Self {
        if tag.eq_ignore_ascii_case("zh-TW") || tag.eq_ignore_ascii_case("zh_TW") {
            Self::ZhTw
        } else {
            Self::En
        }
    }
}

/// Flat table of display strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Strings {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub upload: &'static str,
    pub paste: &'static str,
    pub docs: &'static str,
    pub ocr: &'static str,
    pub wordgraph: &'static str,
    pub smartnote: &'static str,
    pub qna: &'static str,
    pub settings: &'static str,
    pub theme: &'static str,
    pub select_style: &'static str,
    pub generate: &'static str,
    pub processing: &'static str,
    pub no_key: &'static str,
    pub transform: &'static str,
    pub analyzing: &'static str,
    pub entities: &'static str,
    pub mindgraph: &'static str,
    pub formatted: &'static str,
    pub questions: &'static str,
    pub preview: &'static str,
    pub ask_placeholder: &'static str,
    pub send: &'static str,
    pub model: &'static str,
    pub max_tokens: &'static str,
    pub markdown_view: &'static str,
    pub raw_view: &'static str,
    pub ask_title: &'static str,
    pub ask_subtitle: &'static str,
    pub ocr_settings: &'static str,
    pub agent_analysis: &'static str,
    pub run_analysis: &'static str,
    pub edit_result: &'static str,
    pub agent_prompt: &'static str,
    pub ocr_placeholder: &'static str,
    pub analysis_placeholder: &'static str,
}

pub static EN: Strings = Strings {
    title: "FDA Document Intelligence Workbench",
    subtitle: "Advanced Document Analysis & Multi-Agent Processing System",
    upload: "Upload Documents",
    paste: "Paste Text Content",
    docs: "Documents",
    ocr: "OCR Processing",
    wordgraph: "Word Graph Analysis",
    smartnote: "Smart Note",
    qna: "Ask AI",
    settings: "Settings",
    theme: "Visual Style",
    select_style: "Use Magic Wheel to select style",
    generate: "Run OCR",
    processing: "Processing...",
    no_key: "Please enter your Gemini API Key in settings.",
    transform: "Transform to Smart Note",
    analyzing: "Analyzing...",
    entities: "Extracted Entities",
    mindgraph: "Mind Graph",
    formatted: "Formatted Note",
    questions: "Follow-up Questions",
    preview: "Preview",
    ask_placeholder: "Ask a question about your documents...",
    send: "Send",
    model: "Model",
    max_tokens: "Max Tokens",
    markdown_view: "Markdown View",
    raw_view: "Raw Text",
    ask_title: "Document Q&A",
    ask_subtitle: "Query your documents with custom parameters",
    ocr_settings: "OCR Settings",
    agent_analysis: "Agent Analysis",
    run_analysis: "Run Analysis",
    edit_result: "Edit Result",
    agent_prompt: "Agent Prompt",
    ocr_placeholder: "OCR text will appear here. Select a document and run OCR.",
    analysis_placeholder: "Agent analysis results will appear here.",
};

pub static ZH_TW: Strings = Strings {
    title: "FDA 文件智能工作台",
    subtitle: "進階文件分析與多代理處理系統",
    upload: "上傳文件",
    paste: "貼上文字內容",
    docs: "文件",
    ocr: "OCR 處理",
    wordgraph: "詞彙圖分析",
    smartnote: "智能筆記",
    qna: "AI 問答",
    settings: "設定",
    theme: "視覺風格",
    select_style: "使用魔法輪盤選擇風格",
    generate: "執行 OCR",
    processing: "處理中...",
    no_key: "請在設定中輸入 Gemini API 金鑰。",
    transform: "轉換為智能筆記",
    analyzing: "分析中...",
    entities: "擷取實體",
    mindgraph: "思維圖",
    formatted: "格式化筆記",
    questions: "後續問題",
    preview: "預覽",
    ask_placeholder: "關於文件提出問題...",
    send: "發送",
    model: "模型",
    max_tokens: "最大 Token",
    markdown_view: "Markdown 檢視",
    raw_view: "純文字",
    ask_title: "文件問答",
    ask_subtitle: "使用自訂參數查詢您的文件",
    ocr_settings: "OCR 設定",
    agent_analysis: "代理分析",
    run_analysis: "執行分析",
    edit_result: "編輯結果",
    agent_prompt: "代理提示詞",
    ocr_placeholder: "OCR 文字將顯示於此。請選擇文件並執行 OCR。",
    analysis_placeholder: "代理分析結果將顯示於此。",
};

pub fn strings(language: Language) -> &'static Strings {
    match language {
        Language::En => &EN,
        Language::ZhTw => &ZH_TW,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_round_trip() {
        for lang in Language::ALL {
            assert_eq!(Language::from_tag(lang.tag()), lang);
        }
    }

    #[test]
    fn test_unknown_tag_falls_back_to_english() {
        assert_eq!(Language::from_tag("fr"), Language::En);
        assert_eq!(Language::from_tag(""), Language::En);
    }

    #[test]
    fn test_serde_uses_tags() {
        assert_eq!(serde_json::to_string(&Language::ZhTw).unwrap(), "\"zh-TW\"");
        let lang: Language = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(lang, Language::En);
    }

    #[test]
    fn test_tables_differ_and_are_complete() {
        let en = serde_json::to_value(strings(Language::En)).unwrap();
        let zh = serde_json::to_value(strings(Language::ZhTw)).unwrap();
        let en = en.as_object().unwrap();
        let zh = zh.as_object().unwrap();

        assert_eq!(en.len(), zh.len());
        for (key, value) in en {
            assert!(!value.as_str().unwrap().is_empty(), "empty en.{}", key);
            assert!(!zh[key].as_str().unwrap().is_empty(), "empty zh-TW.{}", key);
        }
        assert_ne!(en["title"], zh["title"]);
    }

    #[test]
    fn test_no_key_matches_gateway_message() {
        assert_eq!(EN.no_key, crate::defaults::MSG_NO_API_KEY);
    }
}
