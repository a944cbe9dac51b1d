// ABOUTME: Sidebar tabs, interface languages and the static string table behind them.
// ABOUTME: Only English and Traditional Chinese are bundled.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    /// Parse a language code such as `en` or `zh`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Language::En),
            "zh" => Some(Language::Zh),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }

    pub fn strings(&self) -> &'static Strings {
        match self {
            Language::En => &EN,
            Language::Zh => &ZH,
        }
    }
}

/// The five panels reachable from the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Dashboard,
    Studio,
    Pdf,
    Orchestration,
    Agents,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Dashboard,
        Tab::Studio,
        Tab::Pdf,
        Tab::Orchestration,
        Tab::Agents,
    ];

    /// Sidebar label in the given language.
    pub fn label(&self, language: Language) -> &'static str {
        let s = language.strings();
        match self {
            Tab::Dashboard => s.dashboard,
            Tab::Studio => s.summary_studio,
            Tab::Pdf => s.pdf_tools,
            Tab::Orchestration => s.orchestration,
            Tab::Agents => s.agents_config,
        }
    }
}

/// Static interface strings for one language.
#[derive(Debug)]
pub struct Strings {
    pub dashboard: &'static str,
    pub summary_studio: &'static str,
    pub pdf_tools: &'static str,
    pub orchestration: &'static str,
    pub agents_config: &'static str,
    pub analyzing: &'static str,
    pub chat_greeting: &'static str,
    pub agent_results: &'static str,
    pub interactive_page: &'static str,
}

static EN: Strings = Strings {
    dashboard: "Dashboard",
    summary_studio: "510(k) Studio",
    pdf_tools: "PDF Tools",
    orchestration: "Orchestration",
    agents_config: "Agents Config",
    analyzing: "Analyzing with Gemini...",
    chat_greeting: "Hello! I am ready to answer questions about this 510(k).",
    agent_results: "Agent Results",
    interactive_page: "Generate Interactive Page",
};

static ZH: Strings = Strings {
    dashboard: "儀表板",
    summary_studio: "510(k) 工作室",
    pdf_tools: "PDF 工具",
    orchestration: "協調中心",
    agents_config: "代理配置",
    analyzing: "正在使用 Gemini 分析...",
    chat_greeting: "你好！我準備好回答有關此 510(k) 的問題。",
    agent_results: "代理結果",
    interactive_page: "生成交互式頁面",
};
