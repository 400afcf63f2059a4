// Context filter: domain prose and brand names that explain a short finding

use std::sync::LazyLock;

use regex::Regex;
use wordguard_core::character::{char_len, is_pure_latin};

use super::{FilterStrategy, find_chars};

/// Content pattern and the short words it explains. A finding is rejected
/// when it is one of the words and the content matches the pattern.
type ContextRule = (&'static str, &'static [&'static str]);

/// Technical, scientific, agricultural, geographic and date vocabulary.
const PROFESSIONAL_RULES: &[ContextRule] = &[
    (
        "音频|视频|数字|信号|编码|解码|压缩|传输|保真|音质|画质",
        &["保真", "真"],
    ),
    (
        "系统|软件|程序|代码|算法|数据|网络|服务器|数据库",
        &["ur", "url", "保真"],
    ),
    (
        "研究|实验|测试|分析|检测|科学|技术|方法|理论|假设",
        &["测试", "真", "保真"],
    ),
    (
        "农业|种植|播种|收获|产量|品种|土壤|肥料|灌溉|示范",
        &["保真", "测试"],
    ),
    (
        "地貌|地质|地形|地理|地震|震级|北纬|东经|喀斯特|平原|山地|丘陵|盆地",
        &["喀特", "地震", "北", "东"],
    ),
    (
        r"\d+年|\d+月|\d+日|上午|下午|凌晨|时\d+分|年月日",
        &["日", "月", "年", "时", "分"],
    ),
    (
        "质量|精度|准确|可靠|标准|规范|检验|验证|测量",
        &["保真", "真", "测试"],
    ),
];

/// Commerce, corporate, news, emergency, entertainment and fashion vocabulary.
const BUSINESS_RULES: &[ContextRule] = &[
    (
        "店铺|淘宝|京东|拼多多|电商|购买|售卖|价格|折扣|商品|销量",
        &["淘宝", "价格", "售", "卖"],
    ),
    (
        "公司|企业|品牌|运营|管理|成立|创立|经营|业务",
        &["运营", "运营商", "营"],
    ),
    (
        "记者|报道|新闻|媒体|采访|爆料|消息|据悉|报告|网民|社交平台|发布|核实|情况说明",
        &["爆料", "料", "日", "报"],
    ),
    (
        "地震|灾害|应急|管理厅|受损|伤亡|突发|危房|隐患|救援|监测",
        &["地震", "日", "灾", "害", "伤", "亡"],
    ),
    (
        "演员|明星|艺人|女星|男星|娱乐|影视|作品",
        &["星", "演"],
    ),
    (
        "服装|衣服|T恤|外套|袜子|时尚|潮牌|面料|材质",
        &["卖", "服"],
    ),
    (
        "市场|标准|质量|产品|服务|消费者|客户",
        &["其他", "他"],
    ),
];

/// Patterns marking a brand, company or shop name near a short Latin word.
const BRAND_PATTERNS: &[&str] = &[
    r"[A-Z]{2,}\s+[A-Z]+",
    r"(?-u:\b)[a-zA-Z]+\s*[a-zA-Z]+(?-u:\b).*(?:品牌|公司|集团|有限公司)",
    r"(?:潮牌|品牌|商标|logo|LOGO).*[a-zA-Z]+",
    r"[a-zA-Z]+.*(?:店铺|旗舰店|专卖店)",
];

/// Quoting and bracketing punctuation that marks a proper noun.
const QUOTE_CLASS: &str = r#"["“”「」『』()\[\]【】《》]"#;

/// Longest Latin finding checked against brand context.
const BRAND_WORD_MAX_LEN: usize = 3;

/// Characters of context taken on each side of a brand candidate.
const BRAND_WINDOW: usize = 10;

fn compile(rules: &[ContextRule]) -> Vec<(Regex, &'static [&'static str])> {
    rules
        .iter()
        .map(|&(pattern, words)| (Regex::new(pattern).expect("valid context pattern"), words))
        .collect()
}

static PROFESSIONAL: LazyLock<Vec<(Regex, &'static [&'static str])>> =
    LazyLock::new(|| compile(PROFESSIONAL_RULES));

static BUSINESS: LazyLock<Vec<(Regex, &'static [&'static str])>> =
    LazyLock::new(|| compile(BUSINESS_RULES));

static BRAND: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    BRAND_PATTERNS
        .iter()
        .map(|p| Regex::new(p).expect("valid brand pattern"))
        .collect()
});

/// Rejects findings explained by the surrounding prose: domain vocabulary
/// that makes a short word innocent, or a brand/proper-noun context around
/// a short Latin word.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextFilter;

impl ContextFilter {
    fn explained_by(rules: &[(Regex, &'static [&'static str])], word: &str, content: &str) -> bool {
        rules
            .iter()
            .any(|(pattern, words)| words.contains(&word) && pattern.is_match(content))
    }

    /// Whether `word` is a professional term in `content`.
    pub fn is_professional_term(word: &str, content: &str) -> bool {
        Self::explained_by(&PROFESSIONAL, word, content)
    }

    /// Whether `word` is ordinary business or news vocabulary in `content`.
    pub fn is_business_news_term(word: &str, content: &str) -> bool {
        Self::explained_by(&BUSINESS, word, content)
    }

    /// Whether a short Latin `word` is part of a brand or proper noun around
    /// its first occurrence in `content`.
    pub fn is_brand_or_proper_noun(word: &str, content: &str) -> bool {
        if char_len(word) > BRAND_WORD_MAX_LEN || !is_pure_latin(word) {
            return false;
        }
        let word_chars: Vec<char> = word.chars().collect();
        let content_chars: Vec<char> = content.chars().collect();
        let Some(pos) = find_chars(&content_chars, &word_chars) else {
            return false;
        };
        let start = pos.saturating_sub(BRAND_WINDOW);
        let end = (pos + word_chars.len() + BRAND_WINDOW).min(content_chars.len());
        let context: String = content_chars[start..end].iter().collect();

        if BRAND.iter().any(|p| p.is_match(&context)) {
            return true;
        }
        let quoted = format!(
            "{QUOTE_CLASS}.*{}.*{QUOTE_CLASS}",
            regex::escape(word)
        );
        Regex::new(&quoted).is_ok_and(|re| re.is_match(&context))
    }
}

impl FilterStrategy for ContextFilter {
    fn should_reject(&self, word: &str, content: &str) -> bool {
        Self::is_professional_term(word, content)
            || Self::is_business_news_term(word, content)
            || Self::is_brand_or_proper_noun(word, content)
    }

    fn name(&self) -> &str {
        "context_filter"
    }
}
