use crate::context::ContextWindow;

/// System instruction sent with every request.
pub const DEFAULT_SYSTEM_MESSAGE: &str = "Bạn là chuyên gia du lịch, tư vấn bán tour cho khách hàng.";

/// Formatting rules appended to grounded prompts, in order.
pub const DEFAULT_RULES: &[&str] = &[
    "Chỉ sử dụng dữ liệu nội bộ được cung cấp ở trên, không tự bịa thông tin.",
    "Không bỏ sót ngày nào trong lịch trình tour.",
    "Trả lời bằng tiếng Việt.",
    "Nếu dữ liệu không có câu trả lời, hãy nói rõ là dữ liệu công ty chưa có thông tin này.",
];

/// Builds the instruction strings for the language model.
///
/// Composition is pure string assembly; the model call happens elsewhere.
#[derive(Debug, Clone)]
pub struct PromptComposer {
    system_message: String,
    rules: Vec<String>,
}

impl PromptComposer {
    pub fn new() -> Self {
        Self {
            system_message: DEFAULT_SYSTEM_MESSAGE.to_string(),
            rules: DEFAULT_RULES.iter().map(|rule| rule.to_string()).collect(),
        }
    }

    pub fn with_system_message(mut self, message: impl Into<String>) -> Self {
        self.system_message = message.into();
        self
    }

    /// Replace the formatting rules.
    pub fn with_rules<I, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules = rules.into_iter().map(Into::into).collect();
        self
    }

    pub fn system_message(&self) -> &str {
        &self.system_message
    }

    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    /// Embed a context window and the customer's question in the grounded template.
    pub fn compose(&self, window: &ContextWindow<'_>, question: &str) -> String {
        self.compose_text(window.as_str(), question)
    }

    /// Same as [`compose`](Self::compose) for context that is not a window.
    pub fn compose_text(&self, context: &str, question: &str) -> String {
        let mut prompt = String::with_capacity(context.len() + question.len() + 512);

        prompt.push_str("Dữ liệu nội bộ công ty:\n\n");
        prompt.push_str(context.trim_end());
        prompt.push_str("\n\nCâu hỏi:\n");
        prompt.push_str(question.trim());
        prompt.push_str("\n\nTrả lời chính xác theo dữ liệu công ty");

        if self.rules.is_empty() {
            prompt.push_str(".\n");
            return prompt;
        }

        prompt.push_str(", tuân thủ các quy tắc sau:\n");
        for (index, rule) in self.rules.iter().enumerate() {
            prompt.push_str(&format!("{}. {}\n", index + 1, rule));
        }
        prompt
    }

    /// Ungrounded request for three ways to answer a customer objection.
    pub fn objection_prompt(&self, message: &str) -> String {
        format!(
            "Khách nói: \"{}\". Đưa ra 3 cách xử lý từ chối chuyên nghiệp, ngắn gọn, bằng tiếng Việt.",
            message.trim()
        )
    }

    /// Question comparing two tours, to be answered from company data.
    pub fn comparison_question(&self, first: &str, second: &str) -> String {
        format!(
            "So sánh 2 tour {} và {} của công ty (lịch trình, giá, thời gian, điểm nổi bật).",
            first.trim(),
            second.trim()
        )
    }

    /// Visa question for a nationality and destination, to be answered from company data.
    pub fn visa_question(&self, nationality: &str, destination: &str) -> String {
        format!(
            "Khách quốc tịch {} đi {} cần visa gì?",
            nationality.trim(),
            destination.trim()
        )
    }
}

impl Default for PromptComposer {
    fn default() -> Self {
        Self::new()
    }
}
