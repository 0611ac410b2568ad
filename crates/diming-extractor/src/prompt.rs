//! LLM prompt for place-name extraction
//!
//! The analyzed text is embedded verbatim between two delimiter lines. Nothing
//! is escaped; the delimiters are the only marker of where the text begins and
//! ends.

/// Line placed directly before and after the analyzed text
pub const TEXT_DELIMITER: &str = "====================";

/// Categories the model must not report as places
pub const EXCLUDED_CATEGORIES: &[&str] = &[
    "人物",
    "组织",
    "学校",
    "公司",
    "医院",
    "职业",
    "情节总结",
    "分析解释",
    "推理事件",
    "医学信息",
    "人物关系",
    "病情描述",
    "任何非地名内容",
];

/// Builds the extraction prompt around a piece of text
pub struct PromptBuilder<'a> {
    text: &'a str,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::with_capacity(self.text.len() + 1024);

        // 1. Role and task
        prompt.push_str(TASK_INSTRUCTIONS);
        prompt.push_str("\n\n");

        // 2. What must never be reported
        prompt.push_str("⚠️禁止输出以下内容：\n");
        for category in EXCLUDED_CATEGORIES {
            prompt.push_str("- ");
            prompt.push_str(category);
            prompt.push('\n');
        }
        prompt.push('\n');

        // 3. Hints and output schema
        prompt.push_str(EXTRACTION_NOTES);
        prompt.push_str("\n\n");
        prompt.push_str(OUTPUT_SCHEMA);
        prompt.push_str("\n\n");

        // 4. The text to analyze
        prompt.push_str("下面是文本内容：\n");
        prompt.push_str(TEXT_DELIMITER);
        prompt.push('\n');
        prompt.push_str(self.text);
        prompt.push('\n');
        prompt.push_str(TEXT_DELIMITER);
        prompt.push_str("\n\n");

        // 5. Output format reminder
        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        prompt
    }
}

/// Build the extraction prompt for `text`
pub fn build_prompt(text: &str) -> String {
    PromptBuilder::new(text).build()
}

const TASK_INSTRUCTIONS: &str = r#"你是一个高精度中文地名识别模型，只负责抽取地名。

【任务要求】
从下面文本中严格提取所有地名词，包括真实与虚构地名，并统计每个地名的出现次数。"#;

const EXTRACTION_NOTES: &str = r#"⚠️注意事项：
- 地名可能由多个字组成（如纽约州、东海之滨、魔王城）
- 地名可以是虚构的（如天龙国）
- 必须统计出现次数
- 如果文本中没有地名，返回空数组"#;

const OUTPUT_SCHEMA: &str = r#"【输出要求】
必须严格返回以下结构的 JSON 数组，每个元素只包含 place_name 和 count 两个字段，无其他内容：

[
  {"place_name": "xxx", "count": 3},
  {"place_name": "yyy", "count": 1}
]"#;

const OUTPUT_FORMAT_REMINDER: &str =
    "⚠️必须只输出 JSON 数组，不允许附加任何说明或代码块标记；如果没有地名，输出 []。";


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the text is embedded unmodified, whatever it contains
        #[test]
        fn test_text_embedded_verbatim(text in "\\PC*") {
            let prompt = build_prompt(&text);
            let section = format!("{}\n{}\n{}", TEXT_DELIMITER, text, TEXT_DELIMITER);
            prop_assert!(prompt.contains(&section));
        }

        /// Property: the fixed template parts never depend on the input
        #[test]
        fn test_template_is_fixed(text in "\\PC*") {
            let prompt = build_prompt(&text);
            prop_assert!(prompt.starts_with(TASK_INSTRUCTIONS));
            prop_assert!(prompt.contains(OUTPUT_SCHEMA));
            prop_assert!(prompt.ends_with(OUTPUT_FORMAT_REMINDER));
            for category in EXCLUDED_CATEGORIES {
                prop_assert!(prompt.contains(category));
            }
        }
    }
}
