//! Knowledge Base content: category tree and captured items

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub children: Vec<Category>,
    /// Initial expanded state; the view tracks changes separately
    pub open: bool,
}

impl Category {
    fn group(id: &str, name: &str, open: bool, children: &[(&str, &str)]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            open,
            children: children
                .iter()
                .map(|(id, name)| Category {
                    id: id.to_string(),
                    name: name.to_string(),
                    children: Vec::new(),
                    open: false,
                })
                .collect(),
        }
    }
}

pub fn categories() -> Vec<Category> {
    vec![
        Category::group(
            "culture",
            "Culture",
            true,
            &[("food", "Food"), ("art", "Art"), ("music", "Music")],
        ),
        Category::group(
            "finance",
            "Finance",
            true,
            &[
                ("trading", "Trading"),
                ("crypto", "Crypto"),
                ("investing", "Investing"),
            ],
        ),
        Category::group(
            "relationships",
            "Relationships",
            true,
            &[("dating", "Dating"), ("networking", "Networking")],
        ),
        Category::group(
            "technology",
            "Technology",
            false,
            &[
                ("ai", "AI"),
                ("automotive", "Automotive"),
                ("social_media", "Social Media"),
            ],
        ),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnowledgeKind {
    Text,
    Image,
    Video,
    Audio,
}

impl KnowledgeKind {
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Text => "📄",
            Self::Image => "🖼",
            Self::Video => "🎬",
            Self::Audio => "🎙",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KnowledgeItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub kind: KnowledgeKind,
    pub source: Option<String>,
    pub date: String,
    pub tags: Vec<String>,
}

pub fn items() -> Vec<KnowledgeItem> {
    let item = |id: &str,
                title: &str,
                description: &str,
                kind: KnowledgeKind,
                date: &str,
                source: &str,
                tags: &[&str]| KnowledgeItem {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        kind,
        source: Some(source.to_string()),
        date: date.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    };

    vec![
        item(
            "1",
            "MineContext/README_zh.md at main · ...",
            "We read every piece of feedback, and take your input very seriously.",
            KnowledgeKind::Text,
            "Fri Nov 28 2025",
            "Github",
            &["Documentation"],
        ),
        item(
            "2",
            "lifecontext宣发 - 飞书云文档",
            "LifeContext launch strategy and marketing materials.",
            KnowledgeKind::Image,
            "Fri Nov 21 2025",
            "Feishu",
            &["Marketing"],
        ),
        item(
            "3",
            "TicNote：你的随身AI思考伙伴",
            "TicNote是出门问问发布的新一代Agentic AI软硬件结合的产品，通过内置「Shadow AI」为用户构建“有记忆的AI记录+主动洞察+主...",
            KnowledgeKind::Text,
            "Fri Nov 21 2025",
            "TicNote",
            &["Product"],
        ),
        item(
            "4",
            "Google Gemini",
            "认识 Gemini：Google 旗下的 AI 助理，在写作、规划和开展头脑风暴等方面获得帮助。体验生成式 AI 的强大功能。",
            KnowledgeKind::Image,
            "Fri Nov 21 2025",
            "Google",
            &["AI", "Tool"],
        ),
        item(
            "5",
            "SORA: the all Ai TikTok Clone. will slop end creativity?",
            "Sora is an AI-powered TikTok clone that generates videos using artificial intelligence, allowing users to create...",
            KnowledgeKind::Video,
            "Fri Nov 21 2025",
            "YouTube",
            &["Dating", "AI"],
        ),
    ]
}

/// Items grouped by date, preserving first-seen order of dates
pub fn group_by_date(items: &[KnowledgeItem]) -> Vec<(&str, Vec<&KnowledgeItem>)> {
    let mut groups: Vec<(&str, Vec<&KnowledgeItem>)> = Vec::new();
    for item in items {
        match groups.iter_mut().find(|(date, _)| *date == item.date) {
            Some((_, group)) => group.push(item),
            None => groups.push((item.date.as_str(), vec![item])),
        }
    }
    groups
}
