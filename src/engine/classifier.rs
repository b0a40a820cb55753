// ==========================================
// 餐饮备餐聚合引擎 - 明细分类器
// ==========================================
// 职责: 明细名称 → 排除（酱料/餐具） 或 保留 + 可选优先标签
// 规则: 子串匹配,大小写不敏感,不要求词边界
// 红线: 优先规则自上而下,首个命中即返回（顺序即平局裁决）
// ==========================================

use crate::domain::prep::Classification;
use crate::domain::types::PriorityTag;
use crate::engine::normalizer::merge_key;

// ==========================================
// 排除关键字（酱料 / 调味品 / 一次性用品）
// ==========================================
pub const EXCLUDE_KEYWORDS: &[&str] = &[
    "sauce",
    "packet",
    "packets",
    "dressing",
    "utensil",
    "utensils",
    "napkin",
    "napkins",
    "plate",
    "plates",
    "cup",
    "cups",
    "ice",
    "ketchup",
    "mustard",
    "mayo",
    "mayonnaise",
    "pickle",
    "bbq",
    "barbeque",
    "polynesian",
    "ranch",
    "honey",
    "buffalo",
    "sriracha",
    "vinaigrette",
];

// ==========================================
// 优先规则（规则即数据）
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCondition {
    /// 至少包含一个
    IncludeAny(&'static [&'static str]),
    /// 全部包含
    IncludeAll(&'static [&'static str]),
    /// 全部包含 all，且至少包含一个 any
    Combined {
        all: &'static [&'static str],
        any: &'static [&'static str],
    },
}

impl RuleCondition {
    fn matches(&self, name: &str) -> bool {
        match self {
            RuleCondition::IncludeAny(any) => contains_any(name, *any),
            RuleCondition::IncludeAll(all) => contains_all(name, *all),
            RuleCondition::Combined { all, any } => {
                contains_all(name, *all) && contains_any(name, *any)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityRule {
    pub tag: PriorityTag,
    pub condition: RuleCondition,
    /// 命中任一则本条规则失效（区分冷热托盘）
    pub exclude_any: &'static [&'static str],
}

impl PriorityRule {
    pub fn matches(&self, name: &str) -> bool {
        self.condition.matches(name) && !contains_any(name, self.exclude_any)
    }
}

const COLD: &[&str] = &["cold", "chilled"];

/// 热托盘优先于其他托盘; "tray" 兜底放在专用托盘规则之后
pub const PRIORITY_RULES: &[PriorityRule] = &[
    PriorityRule {
        tag: PriorityTag::Sandwich,
        condition: RuleCondition::IncludeAny(&["sandwich"]),
        exclude_any: &[],
    },
    PriorityRule {
        tag: PriorityTag::HotNuggetTray,
        condition: RuleCondition::IncludeAll(&["tray", "nugget", "hot"]),
        exclude_any: COLD,
    },
    PriorityRule {
        tag: PriorityTag::HotStripTray,
        condition: RuleCondition::IncludeAll(&["tray", "strip", "hot"]),
        exclude_any: COLD,
    },
    PriorityRule {
        tag: PriorityTag::ColdNuggetTray,
        condition: RuleCondition::Combined {
            all: &["tray", "nugget"],
            any: COLD,
        },
        exclude_any: &[],
    },
    PriorityRule {
        tag: PriorityTag::MacTray,
        condition: RuleCondition::Combined {
            all: &["tray"],
            any: &["mac", "macaroni"],
        },
        exclude_any: &[],
    },
    PriorityRule {
        tag: PriorityTag::SaladTray,
        condition: RuleCondition::Combined {
            all: &["tray"],
            any: &["salad", "cobb", "southwest", "market"],
        },
        exclude_any: &[],
    },
    PriorityRule {
        tag: PriorityTag::WrapTray,
        condition: RuleCondition::Combined {
            all: &["tray"],
            any: &["wrap"],
        },
        exclude_any: &[],
    },
    PriorityRule {
        tag: PriorityTag::Tray,
        condition: RuleCondition::IncludeAll(&["tray"]),
        exclude_any: &[],
    },
    PriorityRule {
        tag: PriorityTag::GrilledBundle,
        condition: RuleCondition::IncludeAll(&["grilled", "bundle"]),
        exclude_any: &[],
    },
];

fn contains_any<S: AsRef<str>>(name: &str, keywords: &[S]) -> bool {
    keywords.iter().any(|k| name.contains(k.as_ref()))
}

fn contains_all(name: &str, keywords: &[&str]) -> bool {
    keywords.iter().all(|k| name.contains(k))
}

// ==========================================
// ItemClassifier
// ==========================================
#[derive(Debug, Clone)]
pub struct ItemClassifier {
    exclude_keywords: Vec<String>,
    rules: &'static [PriorityRule],
}

impl Default for ItemClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemClassifier {
    pub fn new() -> Self {
        Self {
            exclude_keywords: EXCLUDE_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            rules: PRIORITY_RULES,
        }
    }

    /// 在内置排除表之后追加关键字（小写化，忽略空串）
    pub fn with_extra_exclusions<S: AsRef<str>>(mut self, extra: &[S]) -> Self {
        for keyword in extra {
            let k = merge_key(keyword.as_ref());
            if !k.is_empty() && !self.exclude_keywords.contains(&k) {
                self.exclude_keywords.push(k);
            }
        }
        self
    }

    pub fn exclude_keywords(&self) -> &[String] {
        &self.exclude_keywords
    }

    /// 是否为酱料 / 餐具类（不进入备餐清单）
    pub fn is_excluded(&self, name: &str) -> bool {
        contains_any(&merge_key(name), self.exclude_keywords.as_slice())
    }

    /// 优先标签（不检查排除）
    pub fn priority_tag(&self, name: &str) -> Option<PriorityTag> {
        let normalized = merge_key(name);
        self.rules
            .iter()
            .find(|rule| rule.matches(&normalized))
            .map(|rule| rule.tag)
    }

    /// 完整分类: 先判排除，保留的再匹配优先规则
    pub fn classify(&self, name: &str) -> Classification {
        if self.is_excluded(name) {
            Classification::excluded()
        } else {
            Classification::kept(self.priority_tag(name))
        }
    }
}
